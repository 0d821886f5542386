use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    static ref CONTROL_CHARS: Regex = Regex::new(r"[\x00-\x1F\x7F]").unwrap();
    static ref FONT_EXTENSION: Regex = Regex::new(r"(?i)\.(ttf|otf)$").unwrap();
}

/// Strip control characters and surrounding whitespace from a name-table value
pub fn normalize_field(value: &str) -> String {
    CONTROL_CHARS.replace_all(value, "").trim().to_string()
}

/// File name of a font without its .ttf/.otf extension
pub fn font_base_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    FONT_EXTENSION.replace(&file_name, "").into_owned()
}

/// Check whether a path carries a recognised font extension
pub fn is_font_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case(extension))
}

/// CSS `format()` keyword for an original font file
pub fn css_format(path: &Path) -> &'static str {
    if is_font_extension(path, "otf") {
        "opentype"
    } else {
        "truetype"
    }
}

/// Quote a string for use inside a CSS double-quoted value
pub fn css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
