use std::path::Path;
use tracing::{error, warn};
use crate::font::{
    BuiltinDumper, Converter, FontConverter, MetadataDumper, NameTableExtractor, StructuredQuery,
    TtxDumper, Woff2Compress, XmlNameQuery,
};
use crate::models::{Config, FontFailure, ProcessingResult};
use crate::output::{Digester, IntegrityComputer, Sha256Digester};
use crate::utils::copy_into;

/// The capabilities a batch runs on
pub struct Toolchain {
    pub extractor: NameTableExtractor,
    pub converter: FontConverter,
    pub integrity: IntegrityComputer,
    /// External programs that must be on PATH before processing starts
    pub required_tools: Vec<&'static str>,
}

impl Toolchain {
    pub fn new(
        dumper: Box<dyn MetadataDumper>,
        query: Box<dyn StructuredQuery>,
        converter: Box<dyn Converter>,
        digester: Box<dyn Digester>,
    ) -> Self {
        Self {
            extractor: NameTableExtractor::new(dumper, query),
            converter: FontConverter::new(converter),
            integrity: IntegrityComputer::new(digester),
            required_tools: Vec::new(),
        }
    }

    /// Real tools, chosen by configuration
    pub fn system(config: &Config) -> Self {
        let dumper: Box<dyn MetadataDumper> = if config.builtin_dump {
            Box::new(BuiltinDumper)
        } else {
            Box::new(TtxDumper::new(config.tool_timeout))
        };
        let mut toolchain = Self::new(
            dumper,
            Box::new(XmlNameQuery),
            Box::new(Woff2Compress::new(config.tool_timeout)),
            Box::new(Sha256Digester),
        );
        toolchain.required_tools = config.required_tools();
        toolchain
    }
}

/// Run one font through extraction, copy, checksum and conversion.
///
/// The font is converted to `woff2_target` when one is given. Never fails:
/// problems end up in the returned result.
pub fn process_font(
    toolchain: &Toolchain,
    config: &Config,
    font: &Path,
    woff2_target: Option<&Path>,
) -> ProcessingResult {
    let mut result = ProcessingResult::new(font.to_path_buf());
    let name = result.file_name();

    let metadata = match toolchain.extractor.extract(font) {
        Ok(metadata) => metadata,
        Err(e) => {
            error!("Failed to extract metadata from {}: {}", name, e);
            return result.fail(FontFailure::Metadata(e.to_string()));
        }
    };

    let copied = match copy_into(font, &config.output_dir) {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to copy {} to {}: {}", name, config.output_dir.display(), e);
            return result.fail(FontFailure::Copy(e.to_string()));
        }
    };

    let checksum = match toolchain.integrity.hash_hex(&copied) {
        Ok(hex) => hex,
        Err(e) => {
            error!("Failed to checksum {}: {}", name, e);
            return result.fail(FontFailure::Checksum(e.to_string()));
        }
    };

    if let Some(target) = woff2_target {
        let conversion = toolchain.converter.convert_to(font, target);
        if let Some(converted) = conversion.converted_path {
            match toolchain.integrity.hash_base64(&converted) {
                Ok(hash) => {
                    result.converted_path = Some(converted);
                    result.converted_hash_b64 = Some(hash);
                }
                Err(e) => warn!("Could not hash {}, leaving it out: {}", converted.display(), e),
            }
        }
    }

    result.metadata = Some(metadata);
    result.output_path = Some(copied);
    result.checksum_hex = Some(checksum);
    result.succeeded = true;
    result
}
