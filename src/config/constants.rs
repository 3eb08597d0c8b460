// src/config/constants.rs
//! Reference deployment constants

/// Capture sampling rate in Hz
pub const DEFAULT_SAMPLE_RATE_HZ: f32 = 256.0;

/// Samples delivered per capture block
pub const DEFAULT_BLOCK_LEN: usize = 240;

/// Real FFT transform size
pub const DEFAULT_FFT_SIZE: usize = 256;

/// Local mains interference frequency (US deployment)
pub const MAINS_FREQ_HZ: f32 = 60.0;

/// Notch quality factor; higher is narrower
pub const DEFAULT_NOTCH_Q: f32 = 30.0;

/// Spectrum bins handed to the frequency-bar display
pub const DISPLAY_SPECTRUM_BINS: usize = 30;

/// Consumer tick period in milliseconds (~30 fps display refresh)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 30;

/// Consecutive failing cycles before the pipeline stops; persistent NaN
/// output indicates a configuration bug, not transient noise
pub const DEFAULT_MAX_CONSECUTIVE_FAILURES: u32 = 8;
