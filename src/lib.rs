//! EEG-Core: real-time EEG filtering and spectral band aggregation
//!
//! This library is the processing core of a live EEG visualizer. It consumes
//! fixed-size sample blocks from a capture collaborator and produces, per
//! display cycle:
//!
//! - the notch-filtered waveform (mains interference removed)
//! - the magnitude spectrum of the filtered block
//! - mean magnitude over the six canonical EEG bands (delta through gamma)
//!
//! Rendering and device I/O live outside this crate: the producer pushes
//! blocks into a [`BlockSlot`](acquisition::BlockSlot) and the
//! [`PipelineRunner`](acquisition::PipelineRunner) emits
//! [`BlockOutput`](processing::BlockOutput)s for the display layer.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use eeg_core::acquisition::{BlockSlot, PipelineRunner};
//! use eeg_core::config::PipelineConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::default();
//!     let slot = Arc::new(BlockSlot::new());
//!     let runner = PipelineRunner::spawn(&config, Arc::clone(&slot))?;
//!
//!     // The capture callback publishes each block as it arrives
//!     slot.publish(vec![0.0; config.block_len]);
//!
//!     // The display layer drains outputs at its own pace
//!     if let Ok(output) = runner.outputs().recv() {
//!         println!("alpha power: {}", output.band_powers[2]);
//!     }
//!
//!     runner.shutdown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod acquisition;
pub mod config;
pub mod error;
pub mod processing;

// Re-export commonly used types for convenience
pub use acquisition::{BlockSlot, PipelineRunner};
pub use config::PipelineConfig;
pub use error::{EegError, ProcessingStage};
pub use processing::{
    default_bands, design_bandpass, design_notch, BandAggregator, BandDefinition, BandKind,
    BlockOutput, IirFilter, PipelineOrchestrator, SpectralAnalyzer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "eeg-core");
    }
}
