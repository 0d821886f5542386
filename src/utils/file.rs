use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use crate::error::{Error, Result};
use crate::utils::naming::is_font_extension;

/// Extensions picked up from the input directory, in listing order
pub const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

/// Create a directory if it doesn't exist
pub fn ensure_directory_exists(dir: &Path) -> Result<()> {
    if !dir.exists() {
        debug!("Directory {} does not exist. Creating it now.", dir.display());
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Replace `dir` with a fresh, empty directory.
///
/// An existing directory is left untouched unless `force` is set.
pub fn prepare_output_dir(dir: &Path, force: bool) -> Result<()> {
    if dir.exists() {
        if !force {
            return Err(Error::OutputExists(dir.to_path_buf()));
        }
        warn!("Removing existing output directory {}", dir.display());
        if dir.is_dir() {
            fs::remove_dir_all(dir)?;
        } else {
            fs::remove_file(dir)?;
        }
    }
    ensure_directory_exists(dir)
}

/// Safely move a file with fallback to copy+delete if rename fails
pub fn safe_move_file(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(_) => Ok(()),
        Err(e) => {
            // Temp directories often live on another filesystem
            debug!("Rename failed for {}, trying copy+delete: {}", src.display(), e);

            fs::copy(src, dest)?;

            if let Err(e) = fs::remove_file(src) {
                warn!("Could not delete source file {} after copying: {}", src.display(), e);
            }
            Ok(())
        }
    }
}

/// Copy `src` into `dir` under its own file name
pub fn copy_into(src: &Path, dir: &Path) -> Result<PathBuf> {
    let file_name = src
        .file_name()
        .ok_or_else(|| Error::InvalidPath(src.to_path_buf()))?;
    let dest = dir.join(file_name);
    fs::copy(src, &dest)?;
    Ok(dest)
}

/// List the font files directly inside `dir`.
///
/// All .ttf files come before all .otf files; each group is ordered by file name.
pub fn find_font_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            entries.push(path);
        }
    }
    entries.sort();

    let mut fonts = Vec::new();
    for extension in FONT_EXTENSIONS {
        fonts.extend(
            entries
                .iter()
                .filter(|path| is_font_extension(path, extension))
                .cloned(),
        );
    }
    Ok(fonts)
}
