//! FontPack turns a directory of .ttf/.otf fonts into a self-hostable web
//! font package: copied fonts, optional WOFF2 versions, a `fonts.css`
//! stylesheet and a `README.md` manifest with checksums and CSP hashes.

pub mod cli;
pub mod error;
pub mod font;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod utils;

pub use error::{Error, Result};
pub use models::{BatchSummary, Config};
pub use pipeline::{BatchPipeline, PipelineState, Toolchain};
