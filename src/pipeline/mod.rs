//! Batch packaging of a font directory

pub mod batch;
pub mod processor;

pub use batch::{BatchPipeline, PipelineState};
pub use processor::{process_font, Toolchain};
