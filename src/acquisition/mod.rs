// src/acquisition/mod.rs
//! Block exchange between the capture device and the processing loop

pub mod runner;
pub mod slot;

pub use runner::PipelineRunner;
pub use slot::BlockSlot;
