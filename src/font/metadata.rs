use std::path::Path;
use tracing::debug;
use crate::error::Result;
use crate::models::{FontMetadata, UNKNOWN};
use crate::utils::{font_base_name, normalize_field};
use super::name_table::{
    MetadataDumper, NameDocument, StructuredQuery, NAME_COPYRIGHT, NAME_DESIGNER, NAME_FAMILY,
    NAME_FULL_NAME, NAME_LICENSE, NAME_LICENSE_URL, NAME_POSTSCRIPT, NAME_SUBFAMILY, NAME_VERSION,
};

/// Reads a font's name table into [`FontMetadata`]
pub struct NameTableExtractor {
    dumper: Box<dyn MetadataDumper>,
    query: Box<dyn StructuredQuery>,
}

impl NameTableExtractor {
    pub fn new(dumper: Box<dyn MetadataDumper>, query: Box<dyn StructuredQuery>) -> Self {
        Self { dumper, query }
    }

    /// Extract metadata from a font file.
    ///
    /// Only a failed dump is an error. Each missing or unreadable record
    /// falls back to "Unknown" on its own.
    pub fn extract(&self, path: &Path) -> Result<FontMetadata> {
        debug!("Extracting metadata from: {}", path.display());

        let document = self.dumper.dump(path)?;
        let field = |name_id| self.read_field(&document, name_id);

        let mut metadata = FontMetadata {
            family_name: field(NAME_FAMILY),
            subfamily: field(NAME_SUBFAMILY),
            full_name: field(NAME_FULL_NAME),
            version: field(NAME_VERSION),
            postscript_name: field(NAME_POSTSCRIPT),
            designer: field(NAME_DESIGNER),
            license_text: field(NAME_LICENSE),
            license_url: field(NAME_LICENSE_URL),
            copyright: field(NAME_COPYRIGHT),
        };
        metadata.family_name = resolve_family_name(&metadata.family_name, &metadata.full_name, path);

        debug!(
            "Metadata extracted - Family: {}, Subfamily: {}, Version: {}, PostScript: {}",
            metadata.family_name, metadata.subfamily, metadata.version, metadata.postscript_name
        );
        Ok(metadata)
    }

    fn read_field(&self, document: &NameDocument, name_id: u16) -> String {
        match self.query.query(document, name_id) {
            Ok(Some(value)) => {
                let value = normalize_field(&value);
                if value.is_empty() {
                    UNKNOWN.to_string()
                } else {
                    value
                }
            }
            Ok(None) => UNKNOWN.to_string(),
            Err(e) => {
                debug!("Name ID {} unreadable, using {}: {}", name_id, UNKNOWN, e);
                UNKNOWN.to_string()
            }
        }
    }
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || value == UNKNOWN
}

/// Family name, falling back to the full name and then the file's base name
pub fn resolve_family_name(family: &str, full_name: &str, path: &Path) -> String {
    let family = normalize_field(family);
    if !is_missing(&family) {
        return family;
    }
    let full_name = normalize_field(full_name);
    if !is_missing(&full_name) {
        return full_name;
    }
    normalize_field(&font_base_name(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    struct StaticDump(Option<&'static str>);

    impl MetadataDumper for StaticDump {
        fn dump(&self, font: &Path) -> Result<NameDocument> {
            self.0
                .map(NameDocument::new)
                .ok_or_else(|| Error::Font(format!("cannot read {}", font.display())))
        }
    }

    /// Answers from a fixed table; IDs listed in `broken` error out
    struct TableQuery {
        values: HashMap<u16, &'static str>,
        broken: Vec<u16>,
    }

    impl StructuredQuery for TableQuery {
        fn query(&self, _document: &NameDocument, name_id: u16) -> Result<Option<String>> {
            if self.broken.contains(&name_id) {
                return Err(Error::Metadata("query failed".to_string()));
            }
            Ok(self.values.get(&name_id).map(|v| v.to_string()))
        }
    }

    fn extractor(values: &[(u16, &'static str)], broken: &[u16]) -> NameTableExtractor {
        NameTableExtractor::new(
            Box::new(StaticDump(Some("<ttFont/>"))),
            Box::new(TableQuery {
                values: values.iter().copied().collect(),
                broken: broken.to_vec(),
            }),
        )
    }

    #[test]
    fn fields_are_normalized() {
        let metadata = extractor(
            &[
                (NAME_FAMILY, "\n   Alpha  \n"),
                (NAME_SUBFAMILY, "Bold\tItalic"),
                (NAME_COPYRIGHT, "(c) 2024"),
            ],
            &[],
        )
        .extract(Path::new("A.ttf"))
        .unwrap();

        assert_eq!(metadata.family_name, "Alpha");
        assert_eq!(metadata.subfamily, "BoldItalic");
        assert_eq!(metadata.copyright, "(c) 2024");
        assert_eq!(metadata.designer, UNKNOWN);
    }

    #[test]
    fn failing_queries_do_not_abort() {
        let metadata = extractor(
            &[(NAME_FAMILY, "Alpha"), (NAME_VERSION, "Version 1.000")],
            &[NAME_VERSION, NAME_LICENSE],
        )
        .extract(Path::new("A.ttf"))
        .unwrap();

        assert_eq!(metadata.family_name, "Alpha");
        assert_eq!(metadata.version, UNKNOWN);
        assert_eq!(metadata.license_text, UNKNOWN);
    }

    #[test]
    fn family_falls_back_to_full_name_then_file() {
        let metadata = extractor(&[(NAME_FULL_NAME, "Alpha Bold")], &[NAME_FAMILY])
            .extract(Path::new("A.ttf"))
            .unwrap();
        assert_eq!(metadata.family_name, "Alpha Bold");

        let metadata = extractor(&[(NAME_FAMILY, "  "), (NAME_FULL_NAME, UNKNOWN)], &[])
            .extract(Path::new("fonts/MyFont.ttf"))
            .unwrap();
        assert_eq!(metadata.family_name, "MyFont");
    }

    #[test]
    fn fallback_chain_is_total() {
        assert_eq!(resolve_family_name(UNKNOWN, UNKNOWN, Path::new("MyFont.ttf")), "MyFont");
        assert_eq!(resolve_family_name("", "", Path::new("dir/Other.otf")), "Other");
        assert_eq!(resolve_family_name("Alpha", "Beta", Path::new("x.ttf")), "Alpha");
    }

    #[test]
    fn failed_dump_fails_extraction() {
        let extractor = NameTableExtractor::new(
            Box::new(StaticDump(None)),
            Box::new(TableQuery {
                values: HashMap::new(),
                broken: Vec::new(),
            }),
        );
        assert!(extractor.extract(Path::new("B.otf")).is_err());
    }
}
