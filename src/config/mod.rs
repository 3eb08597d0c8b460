// src/config/mod.rs
//! Pipeline configuration
//!
//! Supplied once at construction; nothing here is reloaded at runtime.

pub mod constants;

pub use constants::*;

use serde::{Deserialize, Serialize};

use crate::error::EegError;
use crate::processing::bands::{default_bands, BandDefinition};

/// Complete pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Capture sampling rate in Hz
    #[serde(default = "defaults::sample_rate_hz")]
    pub sample_rate_hz: f32,

    /// Samples per capture block
    #[serde(default = "defaults::block_len")]
    pub block_len: usize,

    /// FFT transform size; blocks are zero-padded or truncated to this
    #[serde(default = "defaults::fft_size")]
    pub fft_size: usize,

    /// Notch center frequency in Hz
    #[serde(default = "defaults::notch_freq_hz")]
    pub notch_freq_hz: f32,

    /// Notch quality factor
    #[serde(default = "defaults::notch_q")]
    pub notch_q: f32,

    /// Band table, in display order
    #[serde(default = "default_bands")]
    pub bands: Vec<BandDefinition>,

    /// Consumer tick period in milliseconds
    #[serde(default = "defaults::tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Consecutive failing cycles tolerated before the runner stops
    #[serde(default = "defaults::max_consecutive_failures")]
    pub max_consecutive_failures: u32,
}

mod defaults {
    use super::constants;

    pub fn sample_rate_hz() -> f32 {
        constants::DEFAULT_SAMPLE_RATE_HZ
    }
    pub fn block_len() -> usize {
        constants::DEFAULT_BLOCK_LEN
    }
    pub fn fft_size() -> usize {
        constants::DEFAULT_FFT_SIZE
    }
    pub fn notch_freq_hz() -> f32 {
        constants::MAINS_FREQ_HZ
    }
    pub fn notch_q() -> f32 {
        constants::DEFAULT_NOTCH_Q
    }
    pub fn tick_interval_ms() -> u64 {
        constants::DEFAULT_TICK_INTERVAL_MS
    }
    pub fn max_consecutive_failures() -> u32 {
        constants::DEFAULT_MAX_CONSECUTIVE_FAILURES
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: defaults::sample_rate_hz(),
            block_len: defaults::block_len(),
            fft_size: defaults::fft_size(),
            notch_freq_hz: defaults::notch_freq_hz(),
            notch_q: defaults::notch_q(),
            bands: default_bands(),
            tick_interval_ms: defaults::tick_interval_ms(),
            max_consecutive_failures: defaults::max_consecutive_failures(),
        }
    }
}

impl PipelineConfig {
    /// Parse configuration from a TOML document, filling absent fields with
    /// the reference deployment defaults
    pub fn from_toml_str(content: &str) -> Result<Self, EegError> {
        let config: Self =
            toml::from_str(content).map_err(|e| EegError::Configuration {
                component: "pipeline".to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &std::path::Path) -> Result<Self, EegError> {
        let content = std::fs::read_to_string(path).map_err(|e| EegError::Configuration {
            component: "pipeline".to_string(),
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Check internal consistency before any component is constructed
    pub fn validate(&self) -> Result<(), EegError> {
        let reject = |reason: String| {
            Err(EegError::Configuration {
                component: "pipeline".to_string(),
                reason,
            })
        };

        if !self.sample_rate_hz.is_finite() || self.sample_rate_hz <= 0.0 {
            return reject(format!("sample rate must be positive, got {}", self.sample_rate_hz));
        }
        if self.block_len == 0 {
            return reject("block length must be nonzero".to_string());
        }
        if self.fft_size == 0 {
            return reject("FFT size must be nonzero".to_string());
        }
        if self.notch_freq_hz <= 0.0 || self.notch_freq_hz >= self.sample_rate_hz / 2.0 {
            return reject(format!(
                "notch frequency {} Hz outside (0, {}) Hz",
                self.notch_freq_hz,
                self.sample_rate_hz / 2.0
            ));
        }
        if self.notch_q <= 0.0 {
            return reject(format!("notch Q must be positive, got {}", self.notch_q));
        }
        if self.bands.is_empty() {
            return reject("band table must not be empty".to_string());
        }
        for band in &self.bands {
            if !band.low_hz.is_finite() || !band.high_hz.is_finite() || band.low_hz > band.high_hz {
                return reject(format!(
                    "band {} has invalid range [{}, {}]",
                    band.kind.label(),
                    band.low_hz,
                    band.high_hz
                ));
            }
        }
        if self.max_consecutive_failures == 0 {
            return reject("failure limit must be nonzero".to_string());
        }
        Ok(())
    }
}
