use std::fmt;
use std::path::PathBuf;

/// Placeholder used for any name-table entry that could not be read
pub const UNKNOWN: &str = "Unknown";

/// Metadata extracted from a font's name table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontMetadata {
    /// Font family name (never empty)
    pub family_name: String,
    /// Font subfamily (style variant)
    pub subfamily: String,
    /// Full font name
    pub full_name: String,
    pub version: String,
    pub postscript_name: String,
    pub designer: String,
    pub license_text: String,
    pub license_url: String,
    pub copyright: String,
}

impl Default for FontMetadata {
    fn default() -> Self {
        Self {
            family_name: UNKNOWN.to_string(),
            subfamily: UNKNOWN.to_string(),
            full_name: UNKNOWN.to_string(),
            version: UNKNOWN.to_string(),
            postscript_name: UNKNOWN.to_string(),
            designer: UNKNOWN.to_string(),
            license_text: UNKNOWN.to_string(),
            license_url: UNKNOWN.to_string(),
            copyright: UNKNOWN.to_string(),
        }
    }
}

/// CSS style keyword for a font face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_css(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Outcome of a woff2 conversion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Location of the converted file inside the output directory
    pub converted_path: Option<PathBuf>,
    pub succeeded: bool,
}

impl ConversionResult {
    pub fn converted(path: PathBuf) -> Self {
        Self {
            converted_path: Some(path),
            succeeded: true,
        }
    }

    pub fn failed() -> Self {
        Self {
            converted_path: None,
            succeeded: false,
        }
    }
}

/// Why a single font dropped out of the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontFailure {
    /// Name table could not be dumped
    Metadata(String),
    /// Copying the original into the output directory failed
    Copy(String),
    /// Hashing the font failed
    Checksum(String),
}

impl fmt::Display for FontFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFailure::Metadata(msg) => write!(f, "metadata extraction failed: {}", msg),
            FontFailure::Copy(msg) => write!(f, "copy to output failed: {}", msg),
            FontFailure::Checksum(msg) => write!(f, "checksum failed: {}", msg),
        }
    }
}

/// Everything learned about one input font
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub source_path: PathBuf,
    /// Copy of the original inside the output directory
    pub output_path: Option<PathBuf>,
    pub metadata: Option<FontMetadata>,
    pub checksum_hex: Option<String>,
    pub converted_path: Option<PathBuf>,
    pub converted_hash_b64: Option<String>,
    pub succeeded: bool,
    pub failure_reason: Option<FontFailure>,
}

impl ProcessingResult {
    /// Start a result for a font that has not been processed yet
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            source_path,
            output_path: None,
            metadata: None,
            checksum_hex: None,
            converted_path: None,
            converted_hash_b64: None,
            succeeded: false,
            failure_reason: None,
        }
    }

    /// Mark this font as failed and return it
    pub fn fail(mut self, reason: FontFailure) -> Self {
        self.succeeded = false;
        self.failure_reason = Some(reason);
        self
    }

    /// File name of the original font
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
