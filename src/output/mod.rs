//! Manifest, stylesheet and integrity output

pub mod integrity;
pub mod manifest;
pub mod stylesheet;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::error::Result;
use crate::font::{determine_style, determine_weight};
use crate::models::{FontMetadata, ProcessingResult};

pub use integrity::{Digester, IntegrityComputer, Sha256Digester};
pub use manifest::{ConversionInfo, Footer};

pub const MANIFEST_FILE: &str = "README.md";
pub const STYLESHEET_FILE: &str = "fonts.css";
pub const LOG_FILE: &str = "build.log";

/// Facts stamped at the top of both documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader {
    pub generated_at: String,
    pub version: String,
}

impl DocumentHeader {
    pub fn new(generated_at: impl Into<String>) -> Self {
        Self {
            generated_at: generated_at.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// A text file that only ever grows
#[derive(Debug)]
struct AppendOnlyDocument {
    path: PathBuf,
}

impl AppendOnlyDocument {
    fn create(path: PathBuf, contents: &str) -> Result<Self> {
        fs::write(&path, contents)?;
        Ok(Self { path })
    }

    fn append(&self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }
}

/// Writes per-font sections into the manifest and stylesheet.
///
/// Every call appends; nothing is deduplicated.
#[derive(Debug)]
pub struct OutputAssembler {
    manifest: AppendOnlyDocument,
    stylesheet: AppendOnlyDocument,
}

impl OutputAssembler {
    /// Create both documents in `output_dir` with their headers
    pub fn create(output_dir: &Path, header: &DocumentHeader) -> Result<Self> {
        Ok(Self {
            manifest: AppendOnlyDocument::create(
                output_dir.join(MANIFEST_FILE),
                &manifest::render_header(header),
            )?,
            stylesheet: AppendOnlyDocument::create(
                output_dir.join(STYLESHEET_FILE),
                &stylesheet::render_header(header),
            )?,
        })
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest.path
    }

    pub fn stylesheet_path(&self) -> &Path {
        &self.stylesheet.path
    }

    pub fn append_font_section(
        &self,
        file_name: &str,
        metadata: &FontMetadata,
        checksum_hex: &str,
        conversion: Option<&ConversionInfo>,
    ) -> Result<()> {
        self.manifest
            .append(&manifest::render_font_section(file_name, metadata, checksum_hex, conversion))
    }

    pub fn append_font_face(
        &self,
        family_name: &str,
        weight: u16,
        style: &str,
        preferred_source: Option<&Path>,
        fallback_source: &Path,
    ) -> Result<()> {
        self.stylesheet.append(&stylesheet::render_font_face(
            family_name,
            weight,
            style,
            preferred_source,
            fallback_source,
        ))
    }

    /// Append both sections for a successfully processed font.
    ///
    /// Results without metadata or checksum are skipped.
    pub fn append_result(&self, result: &ProcessingResult, integrity: &IntegrityComputer) -> Result<()> {
        let (Some(metadata), Some(checksum)) = (&result.metadata, &result.checksum_hex) else {
            return Ok(());
        };

        let conversion = match (&result.converted_path, &result.converted_hash_b64) {
            (Some(path), Some(hash)) => Some(ConversionInfo {
                file_name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                csp_source: integrity.csp_source(hash),
            }),
            _ => None,
        };
        let fallback = result.output_path.as_deref().unwrap_or(&result.source_path);

        self.append_font_section(&result.file_name(), metadata, checksum, conversion.as_ref())?;
        self.append_font_face(
            &metadata.family_name,
            determine_weight(&metadata.subfamily),
            determine_style(&metadata.subfamily).as_css(),
            conversion.as_ref().and(result.converted_path.as_deref()),
            fallback,
        )
    }

    pub fn append_footer(&self, footer: &Footer<'_>) -> Result<()> {
        self.manifest.append(&manifest::render_footer(footer))
    }
}
