use std::fmt::Write as _;
use crate::models::{BatchSummary, FontMetadata};
use super::{DocumentHeader, STYLESHEET_FILE};

/// Compressed variant of a font, as listed in the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionInfo {
    pub file_name: String,
    /// CSP source expression, e.g. `sha256-...`
    pub csp_source: String,
}

/// Integrity data written once all fonts are in
#[derive(Debug, Clone)]
pub struct Footer<'a> {
    /// CSP source expression for the finished stylesheet
    pub stylesheet_csp: String,
    pub summary: &'a BatchSummary,
}

pub fn render_header(header: &DocumentHeader) -> String {
    format!(
        "# Web Font Package\n\
         \n\
         Self-hostable web fonts with checksums and integrity hashes.\n\
         \n\
         - Generated: {}\n\
         - Generator: FontPack {}\n\
         \n\
         ## Fonts\n\
         \n",
        header.generated_at, header.version
    )
}

/// One manifest record. Field order is fixed.
pub fn render_font_section(
    file_name: &str,
    metadata: &FontMetadata,
    checksum_hex: &str,
    conversion: Option<&ConversionInfo>,
) -> String {
    let mut section = format!("### {}\n\n", file_name);
    let rows = [
        ("File", file_name),
        ("Family", metadata.family_name.as_str()),
        ("Subfamily", metadata.subfamily.as_str()),
        ("Designer", metadata.designer.as_str()),
        ("Version", metadata.version.as_str()),
        ("PostScript Name", metadata.postscript_name.as_str()),
        ("Copyright", metadata.copyright.as_str()),
        ("License", metadata.license_text.as_str()),
        ("License URL", metadata.license_url.as_str()),
    ];
    for (label, value) in rows {
        let _ = writeln!(section, "- **{}:** {}", label, value);
    }
    let _ = writeln!(section, "- **SHA-256:** `{}`", checksum_hex);
    if let Some(conversion) = conversion {
        let _ = writeln!(section, "- **WOFF2:** {}", conversion.file_name);
        let _ = writeln!(section, "- **CSP Hash:** `'{}'`", conversion.csp_source);
    }
    section.push('\n');
    section
}

pub fn render_footer(footer: &Footer<'_>) -> String {
    let csp = &footer.stylesheet_csp;
    let summary = footer.summary;
    format!(
        "## Integrity\n\
         \n\
         Stylesheet hash (`{stylesheet}`): `{csp}`\n\
         \n\
         **Content-Security-Policy header:**\n\
         \n\
         ```\n\
         Content-Security-Policy: style-src 'self' '{csp}'; font-src 'self'\n\
         ```\n\
         \n\
         **HTML:**\n\
         \n\
         ```html\n\
         <link rel=\"stylesheet\" href=\"{stylesheet}\" integrity=\"{csp}\" crossorigin=\"anonymous\">\n\
         ```\n\
         \n\
         ## Usage\n\
         \n\
         1. Copy every file in this directory to a path served by your web server.\n\
         2. Add the `<link>` element above to the `<head>` of your pages.\n\
         3. Reference the families from CSS with `font-family`.\n\
         4. Regenerate the package, and the hashes above, whenever a font changes.\n\
         \n\
         WOFF2 files are listed first in each `src` so browsers that support them skip the larger originals.\n\
         \n\
         ## Notice\n\
         \n\
         This package is generated for educational purposes. Check each font's license above before \
         redistributing or serving it publicly.\n\
         \n\
         ## Summary\n\
         \n\
         - Fonts processed: {processed}\n\
         - Fonts failed: {failed}\n",
        stylesheet = STYLESHEET_FILE,
        csp = csp,
        processed = summary.processed_count,
        failed = summary.failed_count,
    )
}
