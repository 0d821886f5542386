use std::path::PathBuf;
use std::time::Duration;

/// Default per-tool time limit in seconds
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 120;

/// Configuration for a packaging run, built once from the command line
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for .ttf/.otf files
    pub input_dir: PathBuf,
    /// Directory the package is written to
    pub output_dir: PathBuf,
    /// Replace an existing output directory
    pub force: bool,
    /// Produce .woff2 siblings
    pub convert_woff2: bool,
    /// Enable debug output
    pub verbose: bool,
    /// Read name tables in-process instead of running ttx
    pub builtin_dump: bool,
    /// Number of fonts processed concurrently
    pub jobs: usize,
    /// Wall-clock limit for each external tool invocation
    pub tool_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./fonts"),
            output_dir: PathBuf::from("./output"),
            force: false,
            convert_woff2: true,
            verbose: false,
            builtin_dump: false,
            jobs: 1,
            tool_timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Create a configuration for the given input and output directories
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// External tools that must resolve on PATH for this configuration
    pub fn required_tools(&self) -> Vec<&'static str> {
        let mut tools = Vec::new();
        if !self.builtin_dump {
            tools.push(crate::font::name_table::TTX_TOOL);
        }
        if self.convert_woff2 {
            tools.push(crate::font::convert::WOFF2_TOOL);
        }
        tools
    }
}
