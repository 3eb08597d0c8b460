// src/processing/filters/mod.rs
//! IIR digital filters for line-noise removal

pub mod design;
pub mod iir;

pub use design::*;
pub use iir::*;

use thiserror::Error;

/// Filter coefficients for IIR filters, normalized so `a[0] == 1.0`
#[derive(Debug, Clone, PartialEq)]
pub struct IirCoefficients {
    /// Numerator (feedforward) coefficients
    pub b: Vec<f32>,
    /// Denominator (feedback) coefficients
    pub a: Vec<f32>,
}

impl IirCoefficients {
    /// Filter order (length of the denominator minus one)
    pub fn order(&self) -> usize {
        self.a.len() - 1
    }
}

/// Errors raised during filter design
#[derive(Debug, Error)]
pub enum FilterError {
    /// Frequency parameters are inconsistent with the sampling rate
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    /// Coefficient sets that cannot form a realizable filter
    #[error("invalid coefficients: {0}")]
    InvalidCoefficients(String),
}
