use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tracing::{debug, info, warn};
use crate::error::{Error, Result};
use crate::models::ConversionResult;
use crate::utils::{font_base_name, run_tool, safe_move_file};

/// Google's woff2 encoder
pub const WOFF2_TOOL: &str = "woff2_compress";
pub const WOFF2_EXTENSION: &str = "woff2";

/// Produces a compressed sibling of a font file
pub trait Converter: Send + Sync {
    /// Compress `font` and return the path of the sibling it wrote
    fn compress(&self, font: &Path) -> Result<PathBuf>;
}

/// Runs `woff2_compress`, which writes `<name>.woff2` next to its input
#[derive(Debug, Clone)]
pub struct Woff2Compress {
    timeout: Duration,
}

impl Woff2Compress {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Converter for Woff2Compress {
    fn compress(&self, font: &Path) -> Result<PathBuf> {
        run_tool(WOFF2_TOOL, [font.as_os_str()], font.parent(), self.timeout)?;
        Ok(font.with_extension(WOFF2_EXTENSION))
    }
}

/// `<base>.woff2` inside `output_dir`
pub fn woff2_target(font: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}.{}", font_base_name(font), WOFF2_EXTENSION))
}

/// Give every font its own WOFF2 file name in `output_dir`.
///
/// Names are claimed in the order given. A font whose base name was already
/// claimed, ignoring case, gets the first free `<base>-N.woff2`.
pub fn woff2_targets(fonts: &[PathBuf], output_dir: &Path) -> Vec<PathBuf> {
    let mut claimed = HashSet::new();
    fonts
        .iter()
        .map(|font| {
            let base = font_base_name(font);
            let mut name = format!("{}.{}", base, WOFF2_EXTENSION);
            let mut suffix = 2;
            while !claimed.insert(name.to_lowercase()) {
                name = format!("{}-{}.{}", base, suffix, WOFF2_EXTENSION);
                suffix += 1;
            }
            if suffix > 2 {
                debug!("{} shares its base name with an earlier font, using {}", font.display(), name);
            }
            output_dir.join(name)
        })
        .collect()
}

/// Converts fonts into the output directory without ever failing the batch
pub struct FontConverter {
    converter: Box<dyn Converter>,
}

impl FontConverter {
    pub fn new(converter: Box<dyn Converter>) -> Self {
        Self { converter }
    }

    /// Convert `font` and place the result in `output_dir`.
    ///
    /// Failures are logged as warnings and reported through the result.
    pub fn convert(&self, font: &Path, output_dir: &Path) -> ConversionResult {
        self.convert_to(font, &woff2_target(font, output_dir))
    }

    /// Convert `font` and place the result at `target`
    pub fn convert_to(&self, font: &Path, target: &Path) -> ConversionResult {
        match self.try_convert(font, target) {
            Ok(path) => {
                info!("Converted {} to WOFF2", font.display());
                ConversionResult::converted(path)
            }
            Err(e) => {
                warn!("WOFF2 conversion failed for {}: {}", font.display(), e);
                ConversionResult::failed()
            }
        }
    }

    fn try_convert(&self, font: &Path, target: &Path) -> Result<PathBuf> {
        let file_name = font
            .file_name()
            .ok_or_else(|| Error::InvalidPath(font.to_path_buf()))?;

        // The encoder writes beside its input; stage a private copy so the
        // input directory is never written to
        let workdir = TempDir::new()?;
        let staged = workdir.path().join(file_name);
        fs::copy(font, &staged)?;

        let produced = self.converter.compress(&staged)?;
        if !produced.is_file() {
            return Err(Error::Tool {
                tool: WOFF2_TOOL.to_string(),
                message: format!("expected output {} was not produced", produced.display()),
            });
        }

        safe_move_file(&produced, target)?;
        Ok(target.to_path_buf())
    }
}
