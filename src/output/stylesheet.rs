use std::path::Path;
use crate::utils::{css_format, css_string};
use super::DocumentHeader;

pub fn render_header(header: &DocumentHeader) -> String {
    format!(
        "/*\n * Web Font Package\n * Generated: {}\n * Generator: FontPack {}\n */\n\n",
        header.generated_at, header.version
    )
}

/// One `@font-face` rule.
///
/// The woff2 source, when there is one, is listed before the original.
pub fn render_font_face(
    family_name: &str,
    weight: u16,
    style: &str,
    preferred_source: Option<&Path>,
    fallback_source: &Path,
) -> String {
    let mut sources = Vec::with_capacity(2);
    if let Some(preferred) = preferred_source {
        sources.push(format!("url(\"{}\") format(\"woff2\")", source_url(preferred)));
    }
    sources.push(format!(
        "url(\"{}\") format(\"{}\")",
        source_url(fallback_source),
        css_format(fallback_source)
    ));

    format!(
        "@font-face {{\n  font-family: \"{}\";\n  src: {};\n  font-weight: {};\n  font-style: {};\n  font-display: swap;\n}}\n\n",
        css_string(family_name),
        sources.join(",\n       "),
        weight,
        style
    )
}

/// Sources are referenced relative to the stylesheet, which sits beside them
fn source_url(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    css_string(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn woff2_source_comes_first() {
        let rule = render_font_face(
            "Alpha",
            700,
            "normal",
            Some(Path::new("/out/A.woff2")),
            Path::new("/out/A.ttf"),
        );
        assert_eq!(
            rule,
            "@font-face {\n  font-family: \"Alpha\";\n  src: url(\"A.woff2\") format(\"woff2\"),\n       url(\"A.ttf\") format(\"truetype\");\n  font-weight: 700;\n  font-style: normal;\n  font-display: swap;\n}\n\n"
        );
    }

    #[test]
    fn original_only_without_conversion() {
        let rule = render_font_face("Beta", 400, "italic", None, Path::new("B.otf"));
        assert!(rule.contains("  src: url(\"B.otf\") format(\"opentype\");\n"));
        assert!(!rule.contains("woff2"));
        assert!(rule.contains("font-style: italic;"));
    }
}
