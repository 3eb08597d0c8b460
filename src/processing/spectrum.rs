// src/processing/spectrum.rs
//! Real-input spectral transform
//!
//! Fixed-size FFT of one filtered block, exposing unnormalized magnitude per
//! non-negative frequency bin.

use rustfft::{num_complex::Complex32, Fft, FftPlanner};
use std::sync::Arc;

/// Fixed-configuration spectral analyzer
///
/// The frequency bin table is computed once at construction and never
/// changes; only magnitudes are recomputed per block.
///
/// Padding policy: a block shorter than `fft_size` is zero-padded at the
/// tail, a longer block is truncated, so the transform length (and therefore
/// the frequency resolution, `sample_rate / fft_size`) is always the same.
/// In the reference configuration capture blocks are 240 samples against a
/// 256-point transform, so the last 16 input points of every transform are
/// zeros; this costs a little spectral leakage but keeps the bin grid fixed.
pub struct SpectralAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    frequency_bins: Vec<f32>,
}

impl SpectralAnalyzer {
    /// Create an analyzer for `fft_size`-point transforms at `sample_rate` Hz
    pub fn new(fft_size: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(fft_size);

        let frequency_bins = (0..=fft_size / 2)
            .map(|k| k as f32 * sample_rate / fft_size as f32)
            .collect();

        Self {
            fft,
            fft_size,
            frequency_bins,
        }
    }

    /// Frequency of each spectrum bin, `fft_size / 2 + 1` entries from DC to
    /// Nyquist
    pub fn frequency_bins(&self) -> &[f32] {
        &self.frequency_bins
    }

    /// Transform size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Magnitude spectrum of one block, one value per frequency bin
    ///
    /// Magnitude is the absolute value of the complex coefficient of the
    /// unnormalized transform (not power, not dB).
    pub fn analyze(&self, block: &[f32]) -> Vec<f32> {
        let mut buffer: Vec<Complex32> = block
            .iter()
            .take(self.fft_size)
            .map(|&x| Complex32::new(x, 0.0))
            .collect();
        buffer.resize(self.fft_size, Complex32::ZERO);

        self.fft.process(&mut buffer);

        buffer
            .iter()
            .take(self.fft_size / 2 + 1)
            .map(|c| c.norm())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_frequency_bins_fixed_grid() {
        let analyzer = SpectralAnalyzer::new(256, 256.0);
        let bins = analyzer.frequency_bins();
        assert_eq!(bins.len(), 129);
        assert_eq!(bins[0], 0.0);
        assert!((bins[1] - 1.0).abs() < 1e-6);
        assert!((bins[128] - 128.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_block_gives_zero_spectrum() {
        let analyzer = SpectralAnalyzer::new(256, 256.0);
        let spectrum = analyzer.analyze(&[0.0; 240]);
        assert_eq!(spectrum.len(), 129);
        assert!(spectrum.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_bin_aligned_sinusoid_peaks_sharply() {
        let analyzer = SpectralAnalyzer::new(256, 256.0);
        // 32 Hz lands exactly on bin 32 at 1 Hz resolution
        let block: Vec<f32> = (0..256)
            .map(|i| (2.0 * PI * 32.0 * i as f32 / 256.0).sin())
            .collect();

        let spectrum = analyzer.analyze(&block);
        // Unnormalized transform of a unit sinusoid: N/2 at the bin
        assert!((spectrum[32] - 128.0).abs() < 0.5);
        for (k, &mag) in spectrum.iter().enumerate() {
            if k != 32 {
                assert!(mag < 0.5, "leakage at bin {k}: {mag}");
            }
        }
    }

    #[test]
    fn test_short_block_is_zero_padded() {
        let analyzer = SpectralAnalyzer::new(256, 256.0);
        let short: Vec<f32> = (0..240)
            .map(|i| (2.0 * PI * 10.0 * i as f32 / 256.0).sin())
            .collect();
        let mut padded = short.clone();
        padded.resize(256, 0.0);

        let from_short = analyzer.analyze(&short);
        let from_padded = analyzer.analyze(&padded);
        for (a, b) in from_short.iter().zip(from_padded.iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_long_block_is_truncated() {
        let analyzer = SpectralAnalyzer::new(256, 256.0);
        let long: Vec<f32> = (0..512)
            .map(|i| (2.0 * PI * 10.0 * i as f32 / 256.0).sin())
            .collect();

        let from_long = analyzer.analyze(&long);
        let from_prefix = analyzer.analyze(&long[..256]);
        assert_eq!(from_long, from_prefix);
    }
}
