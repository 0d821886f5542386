//! Data structures shared across the pipeline

pub mod config;
pub mod font;
pub mod summary;

pub use config::Config;
pub use font::{ConversionResult, FontFailure, FontMetadata, FontStyle, ProcessingResult, UNKNOWN};
pub use summary::BatchSummary;
