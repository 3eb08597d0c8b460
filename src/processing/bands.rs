// src/processing/bands.rs
//! Aggregation of spectrum magnitudes into physiological frequency bands

use serde::{Deserialize, Serialize};

/// Canonical EEG band identities, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandKind {
    /// 0-4 Hz
    Delta,
    /// 4-8 Hz
    Theta,
    /// 8-12 Hz
    Alpha,
    /// 12-20 Hz
    LowBeta,
    /// 20-30 Hz
    HighBeta,
    /// 30-45 Hz
    Gamma,
}

impl BandKind {
    /// Human-readable label for the display layer
    pub fn label(&self) -> &'static str {
        match self {
            BandKind::Delta => "Delta",
            BandKind::Theta => "Theta",
            BandKind::Alpha => "Alpha",
            BandKind::LowBeta => "Low Beta",
            BandKind::HighBeta => "High Beta",
            BandKind::Gamma => "Gamma",
        }
    }
}

/// A named closed frequency interval `[low_hz, high_hz]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandDefinition {
    /// Band identity
    pub kind: BandKind,
    /// Lower edge, inclusive
    pub low_hz: f32,
    /// Upper edge, inclusive
    pub high_hz: f32,
}

impl BandDefinition {
    /// Whether `freq` lies within the band, edges inclusive
    pub fn contains(&self, freq: f32) -> bool {
        freq >= self.low_hz && freq <= self.high_hz
    }
}

/// The six standard bands in canonical order
pub fn default_bands() -> Vec<BandDefinition> {
    use BandKind::*;
    [
        (Delta, 0.0, 4.0),
        (Theta, 4.0, 8.0),
        (Alpha, 8.0, 12.0),
        (LowBeta, 12.0, 20.0),
        (HighBeta, 20.0, 30.0),
        (Gamma, 30.0, 45.0),
    ]
    .into_iter()
    .map(|(kind, low_hz, high_hz)| BandDefinition {
        kind,
        low_hz,
        high_hz,
    })
    .collect()
}

/// Stateless averager of spectrum magnitudes over a fixed band table
pub struct BandAggregator {
    bands: Vec<BandDefinition>,
}

impl BandAggregator {
    /// Create an aggregator over an ordered band table
    pub fn new(bands: Vec<BandDefinition>) -> Self {
        Self { bands }
    }

    /// Band table in aggregation order
    pub fn bands(&self) -> &[BandDefinition] {
        &self.bands
    }

    /// Arithmetic mean magnitude per band, one value per `BandDefinition`
    ///
    /// `frequencies` and `magnitudes` are parallel slices; bins whose
    /// frequency falls within a band (edges inclusive) contribute to that
    /// band's mean. A band matching zero bins yields 0.0, never NaN.
    pub fn aggregate(&self, frequencies: &[f32], magnitudes: &[f32]) -> Vec<f32> {
        self.bands
            .iter()
            .map(|band| {
                let mut sum = 0.0f32;
                let mut count = 0usize;
                for (&freq, &mag) in frequencies.iter().zip(magnitudes.iter()) {
                    if band.contains(freq) {
                        sum += mag;
                        count += 1;
                    }
                }
                if count == 0 {
                    0.0
                } else {
                    sum / count as f32
                }
            })
            .collect()
    }
}
