// src/error.rs
//! Unified error handling for the EEG processing core
//!
//! Filter design keeps its own local error type in `processing::filters`;
//! everything is converted into `EegError` at the pipeline boundary so callers
//! deal with a single taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::processing::filters::FilterError;

/// Unified error type for the EEG processing core
#[derive(Debug, Error)]
pub enum EegError {
    /// A filter's frequency parameters are inconsistent with the sampling
    /// rate. Fatal to that filter's construction; there is no fallback to an
    /// unstable design.
    #[error("invalid filter parameters: {reason}")]
    InvalidFilterParameters {
        /// What was wrong with the requested design
        reason: String,
    },

    /// A per-block computation produced a non-finite result
    #[error("processing failure in {stage}: {reason}")]
    Processing {
        /// Pipeline stage that produced the failure
        stage: ProcessingStage,
        /// Description of the failure
        reason: String,
    },

    /// Configuration values rejected at construction time
    #[error("configuration error in {component}: {reason}")]
    Configuration {
        /// Component whose configuration was rejected
        component: String,
        /// Why the configuration was rejected
        reason: String,
    },

    /// Hard failure reported by the capture device collaborator
    #[error("capture device error: {reason}")]
    Device {
        /// Device-reported failure description
        reason: String,
    },
}

/// Pipeline stages, for failure attribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingStage {
    /// Notch filtering of the raw block
    Filtering,
    /// Real FFT of the filtered block
    SpectralTransform,
    /// Averaging spectrum bins into bands
    BandAggregation,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Filtering => write!(f, "filtering"),
            ProcessingStage::SpectralTransform => write!(f, "spectral transform"),
            ProcessingStage::BandAggregation => write!(f, "band aggregation"),
        }
    }
}

impl From<FilterError> for EegError {
    fn from(err: FilterError) -> Self {
        EegError::InvalidFilterParameters {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_conversion() {
        let err: EegError =
            FilterError::InvalidParameters("center frequency above Nyquist".to_string()).into();
        match err {
            EegError::InvalidFilterParameters { reason } => {
                assert!(reason.contains("Nyquist"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(ProcessingStage::Filtering.to_string(), "filtering");
        assert_eq!(
            ProcessingStage::SpectralTransform.to_string(),
            "spectral transform"
        );
    }
}
