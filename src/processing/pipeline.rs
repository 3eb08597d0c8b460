// src/processing/pipeline.rs
//! Per-block processing pipeline
//!
//! One synchronous step per capture block, always in the same order: notch
//! filter the raw block, transform the filtered block, average the spectrum
//! into bands. Given the same raw block and prior filter state the output is
//! reproducible.

use tracing::{debug, warn};

use crate::config::{PipelineConfig, DISPLAY_SPECTRUM_BINS};
use crate::error::{EegError, ProcessingStage};
use crate::processing::bands::BandAggregator;
use crate::processing::filters::{design_notch, IirFilter};
use crate::processing::spectrum::SpectralAnalyzer;

/// Everything the display layer consumes for one cycle
#[derive(Debug, Clone)]
pub struct BlockOutput {
    /// Notch-filtered waveform, same length as the raw block
    pub filtered: Vec<f32>,
    /// Magnitude per frequency bin, `fft_size / 2 + 1` values
    pub spectrum: Vec<f32>,
    /// Mean magnitude per band, in band-table order
    pub band_powers: Vec<f32>,
}

impl BlockOutput {
    /// The low-frequency spectrum slice shown by the frequency-bar display
    pub fn display_bins(&self) -> &[f32] {
        let end = DISPLAY_SPECTRUM_BINS.min(self.spectrum.len());
        &self.spectrum[..end]
    }
}

/// Orchestrates one notch filter, one analyzer, and one aggregator
///
/// Holds the only mutable state in the pipeline (the notch delay lines), so
/// one instance serves exactly one stream.
pub struct PipelineOrchestrator {
    notch: IirFilter,
    analyzer: SpectralAnalyzer,
    aggregator: BandAggregator,
    consecutive_failures: u32,
}

impl PipelineOrchestrator {
    /// Build the pipeline from a validated configuration
    pub fn new(config: &PipelineConfig) -> Result<Self, EegError> {
        config.validate()?;

        let coefficients = design_notch(config.notch_freq_hz, config.sample_rate_hz, config.notch_q)?;
        let notch = IirFilter::new(coefficients);
        let analyzer = SpectralAnalyzer::new(config.fft_size, config.sample_rate_hz);
        let aggregator = BandAggregator::new(config.bands.clone());

        Ok(Self {
            notch,
            analyzer,
            aggregator,
            consecutive_failures: 0,
        })
    }

    /// Process one raw capture block
    ///
    /// A non-finite result anywhere in the chain fails the whole cycle; the
    /// caller decides whether to skip the display update or stop. Successive
    /// failures are counted (see [`consecutive_failures`](Self::consecutive_failures));
    /// a successful cycle resets the count.
    pub fn process_block(&mut self, raw: &[f32]) -> Result<BlockOutput, EegError> {
        let result = self.run_stages(raw);
        match &result {
            Ok(output) => {
                self.consecutive_failures = 0;
                debug!(
                    block_len = raw.len(),
                    alpha_power = output.band_powers.get(2).copied().unwrap_or(0.0),
                    "processed block"
                );
            }
            Err(err) => {
                self.consecutive_failures += 1;
                warn!(
                    failures = self.consecutive_failures,
                    error = %err,
                    "block processing failed"
                );
            }
        }
        result
    }

    fn run_stages(&mut self, raw: &[f32]) -> Result<BlockOutput, EegError> {
        let filtered = self.notch.process_block(raw);
        ensure_finite(&filtered, ProcessingStage::Filtering)?;

        let spectrum = self.analyzer.analyze(&filtered);
        ensure_finite(&spectrum, ProcessingStage::SpectralTransform)?;

        let band_powers = self
            .aggregator
            .aggregate(self.analyzer.frequency_bins(), &spectrum);
        ensure_finite(&band_powers, ProcessingStage::BandAggregation)?;

        Ok(BlockOutput {
            filtered,
            spectrum,
            band_powers,
        })
    }

    /// Cycles that have failed since the last successful one
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Fixed frequency of each spectrum bin
    pub fn frequency_bins(&self) -> &[f32] {
        self.analyzer.frequency_bins()
    }

    /// Clear filter state and the failure count
    ///
    /// For stream restarts or device reconnects, where the next block is
    /// discontinuous with the previous one.
    pub fn reset(&mut self) {
        self.notch.reset();
        self.consecutive_failures = 0;
    }
}

fn ensure_finite(values: &[f32], stage: ProcessingStage) -> Result<(), EegError> {
    match values.iter().position(|v| !v.is_finite()) {
        None => Ok(()),
        Some(index) => Err(EegError::Processing {
            stage,
            reason: format!("non-finite value at index {index}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn test_config() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn test_output_shapes() {
        let mut pipeline = PipelineOrchestrator::new(&test_config()).unwrap();
        let block: Vec<f32> = (0..240)
            .map(|i| (2.0 * PI * 10.0 * i as f32 / 256.0).sin())
            .collect();

        let output = pipeline.process_block(&block).unwrap();
        assert_eq!(output.filtered.len(), 240);
        assert_eq!(output.spectrum.len(), 129);
        assert_eq!(output.band_powers.len(), 6);
        assert_eq!(output.display_bins().len(), 30);
    }

    #[test]
    fn test_deterministic_given_same_state() {
        let block: Vec<f32> = (0..240)
            .map(|i| (2.0 * PI * 10.0 * i as f32 / 256.0).sin())
            .collect();

        let mut first = PipelineOrchestrator::new(&test_config()).unwrap();
        let mut second = PipelineOrchestrator::new(&test_config()).unwrap();
        let a = first.process_block(&block).unwrap();
        let b = second.process_block(&block).unwrap();

        assert_eq!(a.filtered, b.filtered);
        assert_eq!(a.spectrum, b.spectrum);
        assert_eq!(a.band_powers, b.band_powers);
    }

    #[test]
    fn test_non_finite_input_fails_and_counts() {
        let mut pipeline = PipelineOrchestrator::new(&test_config()).unwrap();
        let bad = vec![f32::NAN; 240];

        for expected in 1..=3u32 {
            let err = pipeline.process_block(&bad).unwrap_err();
            assert!(matches!(err, EegError::Processing { .. }));
            assert_eq!(pipeline.consecutive_failures(), expected);
        }

        // A clean block recovers the counter
        pipeline.reset();
        let good = vec![0.0f32; 240];
        pipeline.process_block(&good).unwrap();
        assert_eq!(pipeline.consecutive_failures(), 0);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = test_config();
        config.notch_freq_hz = 300.0;
        assert!(PipelineOrchestrator::new(&config).is_err());
    }
}
