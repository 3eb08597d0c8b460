// src/processing/mod.rs
//! Signal processing pipeline for EEG blocks

pub mod bands;
pub mod filters;
pub mod pipeline;
pub mod spectrum;

pub use bands::*;
pub use filters::*;
pub use pipeline::*;
pub use spectrum::*;
