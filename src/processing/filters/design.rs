// src/processing/filters/design.rs
//! Filter coefficient design
//!
//! Pure functions from frequency parameters to normalized IIR coefficients.
//! Parameters that would place a band edge outside (0, Nyquist) are rejected
//! up front; a successfully designed filter is stable by construction (all
//! poles strictly inside the unit circle).

use super::{FilterError, IirCoefficients};
use std::f32::consts::PI;

/// Design a second-order IIR notch tuned to attenuate `center_freq`.
///
/// Higher `q_factor` gives a narrower notch. The zeros sit exactly on the
/// unit circle at the notch frequency, so the steady-state gain at
/// `center_freq` is zero.
pub fn design_notch(
    center_freq: f32,
    sample_rate: f32,
    q_factor: f32,
) -> Result<IirCoefficients, FilterError> {
    validate_center(center_freq, sample_rate)?;
    if !q_factor.is_finite() || q_factor <= 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "quality factor must be positive, got {q_factor}"
        )));
    }

    let omega = 2.0 * PI * center_freq / sample_rate;
    let cos_omega = omega.cos();
    let alpha = omega.sin() / (2.0 * q_factor);
    let norm = 1.0 + alpha;

    Ok(IirCoefficients {
        b: vec![1.0 / norm, -2.0 * cos_omega / norm, 1.0 / norm],
        a: vec![1.0, -2.0 * cos_omega / norm, (1.0 - alpha) / norm],
    })
}

/// Design a Butterworth-style bandpass of the given even `order`, centered
/// on `center_freq` with passband `center_freq ± bandwidth / 2`.
///
/// Built from cascaded second-order bandpass sections (one per two orders)
/// whose transfer functions are convolved into a single coefficient pair, so
/// the result runs as one direct-form recursion. The deployment uses
/// `order = 4`.
pub fn design_bandpass(
    center_freq: f32,
    bandwidth: f32,
    sample_rate: f32,
    order: usize,
) -> Result<IirCoefficients, FilterError> {
    validate_center(center_freq, sample_rate)?;

    if order == 0 || order > 8 || order % 2 != 0 {
        return Err(FilterError::InvalidParameters(format!(
            "bandpass order must be 2, 4, 6 or 8, got {order}"
        )));
    }

    let nyquist = sample_rate / 2.0;
    let max_bandwidth = 2.0 * center_freq.min(nyquist - center_freq);
    if !bandwidth.is_finite() || bandwidth <= 0.0 || bandwidth >= max_bandwidth {
        return Err(FilterError::InvalidParameters(format!(
            "bandwidth {bandwidth} Hz puts a band edge outside (0, {nyquist}) Hz \
             for center {center_freq} Hz"
        )));
    }

    let q = center_freq / bandwidth;
    let section = bandpass_section(center_freq, q, sample_rate);
    let mut result = section.clone();
    for _ in 1..order / 2 {
        result = cascade_sections(&result, &section)?;
    }
    Ok(result)
}

/// Second-order bandpass biquad with unit gain at the center frequency
fn bandpass_section(center_freq: f32, q: f32, sample_rate: f32) -> IirCoefficients {
    let omega = 2.0 * PI * center_freq / sample_rate;
    let cos_omega = omega.cos();
    let alpha = omega.sin() / (2.0 * q);
    let norm = 1.0 + alpha;

    IirCoefficients {
        b: vec![alpha / norm, 0.0, -alpha / norm],
        a: vec![1.0, -2.0 * cos_omega / norm, (1.0 - alpha) / norm],
    }
}

/// Multiply two transfer functions, H1(z) * H2(z), by convolving coefficients
fn cascade_sections(
    section1: &IirCoefficients,
    section2: &IirCoefficients,
) -> Result<IirCoefficients, FilterError> {
    if section1.b.is_empty() || section2.b.is_empty() {
        return Err(FilterError::InvalidCoefficients(
            "cannot cascade an empty section".to_string(),
        ));
    }

    let mut b = vec![0.0; section1.b.len() + section2.b.len() - 1];
    let mut a = vec![0.0; section1.a.len() + section2.a.len() - 1];

    for (i, &b1) in section1.b.iter().enumerate() {
        for (j, &b2) in section2.b.iter().enumerate() {
            b[i + j] += b1 * b2;
        }
    }

    for (i, &a1) in section1.a.iter().enumerate() {
        for (j, &a2) in section2.a.iter().enumerate() {
            a[i + j] += a1 * a2;
        }
    }

    Ok(IirCoefficients { b, a })
}

fn validate_center(center_freq: f32, sample_rate: f32) -> Result<(), FilterError> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "sample rate must be positive, got {sample_rate}"
        )));
    }
    if !center_freq.is_finite() || center_freq <= 0.0 || center_freq >= sample_rate / 2.0 {
        return Err(FilterError::InvalidParameters(format!(
            "center frequency {center_freq} Hz outside (0, {}) Hz",
            sample_rate / 2.0
        )));
    }
    Ok(())
}
