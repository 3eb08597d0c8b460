// src/processing/filters/iir.rs
//! Streaming IIR filter application
//!
//! Direct Form I recursion whose delay lines persist across blocks: filtering
//! consecutive blocks through one instance is numerically identical to
//! filtering the concatenated signal in a single pass.

use super::IirCoefficients;

/// IIR filter with per-instance delay-line state
///
/// Not safe to share between callers: every `process_sample` call mutates the
/// delay lines. Use one instance per logical signal path.
pub struct IirFilter {
    coefficients: IirCoefficients,
    x_delay: Vec<f32>, // past inputs, newest first
    y_delay: Vec<f32>, // past outputs, newest first
}

impl IirFilter {
    /// Create a filter from designed coefficients with zeroed state
    pub fn new(coefficients: IirCoefficients) -> Self {
        Self {
            x_delay: vec![0.0; coefficients.b.len().saturating_sub(1)],
            y_delay: vec![0.0; coefficients.a.len().saturating_sub(1)],
            coefficients,
        }
    }

    /// Process a single sample
    pub fn process_sample(&mut self, input: f32) -> f32 {
        let b = &self.coefficients.b;
        let a = &self.coefficients.a;

        let mut output = b[0] * input;
        for i in 1..b.len() {
            output += b[i] * self.x_delay[i - 1];
        }
        for i in 1..a.len() {
            output -= a[i] * self.y_delay[i - 1];
        }
        output /= a[0];

        // Shift delay lines, newest first
        for i in (1..self.x_delay.len()).rev() {
            self.x_delay[i] = self.x_delay[i - 1];
        }
        if let Some(first) = self.x_delay.first_mut() {
            *first = input;
        }
        for i in (1..self.y_delay.len()).rev() {
            self.y_delay[i] = self.y_delay[i - 1];
        }
        if let Some(first) = self.y_delay.first_mut() {
            *first = output;
        }

        output
    }

    /// Filter one block, carrying state from previous blocks
    ///
    /// Output has the same length as the input.
    pub fn process_block(&mut self, block: &[f32]) -> Vec<f32> {
        block.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Zero the delay lines
    ///
    /// Call when the input stream restarts or is known to be discontinuous
    /// (device reconnect), otherwise stale state bleeds into the new stream.
    pub fn reset(&mut self) {
        self.x_delay.fill(0.0);
        self.y_delay.fill(0.0);
    }

    /// Filter order
    pub fn order(&self) -> usize {
        self.coefficients.order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::filters::design::{design_bandpass, design_notch};
    use std::f32::consts::PI;

    fn sine(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_block_split_matches_single_pass() {
        let signal = sine(10.0, 256.0, 960);
        let coeffs = design_notch(60.0, 256.0, 30.0).unwrap();

        let mut whole = IirFilter::new(coeffs.clone());
        let expected = whole.process_block(&signal);

        for block_len in [240, 320, 96] {
            let mut split = IirFilter::new(coeffs.clone());
            let mut actual = Vec::with_capacity(signal.len());
            for chunk in signal.chunks(block_len) {
                actual.extend(split.process_block(chunk));
            }
            for (i, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
                assert!(
                    (e - a).abs() < 1e-5,
                    "sample {i} diverged for block length {block_len}: {e} vs {a}"
                );
            }
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let coeffs = design_bandpass(12.0, 2.0, 256.0, 4).unwrap();
        let mut filter = IirFilter::new(coeffs);

        let first = filter.process_block(&sine(12.0, 256.0, 64));
        filter.reset();
        let second = filter.process_block(&sine(12.0, 256.0, 64));

        for (a, b) in first.iter().zip(second.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_output_length_matches_input() {
        let coeffs = design_notch(60.0, 256.0, 30.0).unwrap();
        let mut filter = IirFilter::new(coeffs);
        assert_eq!(filter.process_block(&[0.0; 240]).len(), 240);
        assert_eq!(filter.order(), 2);
    }

    #[test]
    fn test_notch_attenuates_mains_passes_signal() {
        let sample_rate = 256.0;
        let coeffs = design_notch(60.0, sample_rate, 30.0).unwrap();

        // Steady-state amplitude after the transient settles
        let steady_state_gain = |freq: f32| -> f32 {
            let mut filter = IirFilter::new(coeffs.clone());
            let output = filter.process_block(&sine(freq, sample_rate, 2048));
            output[1792..]
                .iter()
                .fold(0.0f32, |m, y| m.max(y.abs()))
        };

        // >= 20 dB down at the notch frequency
        assert!(steady_state_gain(60.0) < 0.1);
        // < 1 dB loss at 10 Hz
        assert!(steady_state_gain(10.0) > 0.891);
    }
}
