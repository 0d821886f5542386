use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Custom error type for the FontPack application
#[derive(Debug, Error)]
pub enum Error {
    /// IO operations errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Font parsing or processing errors
    #[error("Font error: {0}")]
    Font(String),
    /// Invalid file or directory path
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
    /// A required external tool is not on PATH
    #[error("Missing dependency: '{0}' was not found on PATH")]
    MissingTool(String),
    /// Input directory holds no .ttf/.otf files
    #[error("No font files (.ttf, .otf) found in {}", .0.display())]
    NoFonts(PathBuf),
    /// Output directory exists and overwrite was not requested
    #[error("Output directory {} already exists (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),
    /// External tool ran but did not succeed
    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },
    /// External tool exceeded its time limit
    #[error("{tool} timed out after {}s", .limit.as_secs())]
    Timeout { tool: String, limit: Duration },
    /// Font metadata extraction errors
    #[error("Metadata extraction error: {0}")]
    Metadata(String),
}

/// Result type alias for FontPack operations
pub type Result<T> = std::result::Result<T, Error>;
