//! Name table dumping and querying.
//!
//! A font's name table is first dumped into a ttx-style XML document, then
//! individual records are looked up by name ID. Both steps sit behind traits
//! so the pipeline can run against fakes.

use std::ffi::OsStr;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Duration;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tempfile::TempDir;
use ttf_parser::{Face, PlatformId};
use crate::error::{Error, Result};
use crate::utils::run_tool;

/// fontTools' dump tool
pub const TTX_TOOL: &str = "ttx";

pub const NAME_COPYRIGHT: u16 = 0;
pub const NAME_FAMILY: u16 = 1;
pub const NAME_SUBFAMILY: u16 = 2;
pub const NAME_FULL_NAME: u16 = 4;
pub const NAME_VERSION: u16 = 5;
pub const NAME_POSTSCRIPT: u16 = 6;
pub const NAME_DESIGNER: u16 = 9;
pub const NAME_LICENSE: u16 = 13;
pub const NAME_LICENSE_URL: u16 = 14;

const WINDOWS_PLATFORM: u16 = 3;
const LANG_EN_US: u16 = 0x409;

/// Dumped name table in ttx XML form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameDocument {
    xml: String,
}

impl NameDocument {
    pub fn new(xml: impl Into<String>) -> Self {
        Self { xml: xml.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.xml
    }
}

/// Produces a structured dump of a font's name table
pub trait MetadataDumper: Send + Sync {
    fn dump(&self, font: &Path) -> Result<NameDocument>;
}

/// Looks up a single name record in a dump
pub trait StructuredQuery: Send + Sync {
    /// Text of the record with `name_id`, or `None` when absent
    fn query(&self, document: &NameDocument, name_id: u16) -> Result<Option<String>>;
}

/// Dumps the name table with `ttx -t name`
#[derive(Debug, Clone)]
pub struct TtxDumper {
    timeout: Duration,
}

impl TtxDumper {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl MetadataDumper for TtxDumper {
    fn dump(&self, font: &Path) -> Result<NameDocument> {
        // One scratch directory per call keeps concurrent dumps apart
        let scratch = TempDir::new()?;
        let target = scratch.path().join("name.ttx");

        run_tool(
            TTX_TOOL,
            [
                OsStr::new("-q"),
                OsStr::new("-t"),
                OsStr::new("name"),
                OsStr::new("-o"),
                target.as_os_str(),
                font.as_os_str(),
            ],
            None,
            self.timeout,
        )?;

        if !target.is_file() {
            return Err(Error::Tool {
                tool: TTX_TOOL.to_string(),
                message: format!("no dump written for {}", font.display()),
            });
        }
        Ok(NameDocument::new(fs::read_to_string(&target)?))
    }
}

/// Reads the name table in-process with ttf-parser
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDumper;

/// One decoded name record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub name_id: u16,
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub text: String,
}

fn platform_number(platform: PlatformId) -> u16 {
    match platform {
        PlatformId::Unicode => 0,
        PlatformId::Macintosh => 1,
        PlatformId::Iso => 2,
        PlatformId::Windows => 3,
        PlatformId::Custom => 4,
    }
}

impl MetadataDumper for BuiltinDumper {
    fn dump(&self, font: &Path) -> Result<NameDocument> {
        let data = fs::read(font)?;
        let face = Face::parse(&data, 0)
            .map_err(|e| Error::Font(format!("{}: {}", font.display(), e)))?;

        let records: Vec<NameRecord> = face
            .names()
            .into_iter()
            .filter_map(|name| {
                name.to_string().map(|text| NameRecord {
                    name_id: name.name_id,
                    platform_id: platform_number(name.platform_id),
                    encoding_id: name.encoding_id,
                    language_id: name.language_id,
                    text,
                })
            })
            .collect();

        Ok(render_name_table(&records))
    }
}

/// Render records the way `ttx -t name` lays them out
pub fn render_name_table(records: &[NameRecord]) -> NameDocument {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<ttFont>\n  <name>\n");
    for record in records {
        let _ = write!(
            xml,
            "    <namerecord nameID=\"{}\" platformID=\"{}\" platEncID=\"{}\" langID=\"0x{:x}\">\n      {}\n    </namerecord>\n",
            record.name_id,
            record.platform_id,
            record.encoding_id,
            record.language_id,
            escape(record.text.as_str()),
        );
    }
    xml.push_str("  </name>\n</ttFont>\n");
    NameDocument::new(xml)
}

/// Queries `namerecord` elements with quick-xml.
///
/// When several records share a name ID, the Windows US English record wins,
/// then the first Windows record, then the first one in document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlNameQuery;

impl StructuredQuery for XmlNameQuery {
    fn query(&self, document: &NameDocument, name_id: u16) -> Result<Option<String>> {
        let mut reader = Reader::from_str(document.as_str());
        reader.config_mut().trim_text(true);

        let wanted = name_id.to_string();
        let mut current: Option<(u8, String)> = None;
        let mut best: Option<(u8, String)> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == b"namerecord" => {
                    if attribute(&e, "nameID")?.as_deref() == Some(wanted.as_str()) {
                        current = Some((record_rank(&e)?, String::new()));
                    }
                }
                Ok(Event::Text(t)) => {
                    if let Some((_, text)) = current.as_mut() {
                        let value = t.unescape().map_err(|e| Error::Metadata(e.to_string()))?;
                        text.push_str(&value);
                    }
                }
                Ok(Event::CData(c)) => {
                    if let Some((_, text)) = current.as_mut() {
                        text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Ok(Event::End(e)) if e.name().as_ref() == b"namerecord" => {
                    if let Some((rank, text)) = current.take() {
                        if rank == 0 {
                            return Ok(Some(text));
                        }
                        if best.as_ref().map_or(true, |(held, _)| rank < *held) {
                            best = Some((rank, text));
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::Metadata(format!("malformed name dump: {}", e))),
            }
        }
        Ok(best.map(|(_, text)| text))
    }
}

/// 0 for Windows US English, 1 for other Windows records, 2 otherwise
fn record_rank(element: &quick_xml::events::BytesStart<'_>) -> Result<u8> {
    let platform = attribute(element, "platformID")?.and_then(|p| p.parse::<u16>().ok());
    if platform != Some(WINDOWS_PLATFORM) {
        return Ok(2);
    }
    let language = attribute(element, "langID")?.and_then(|l| {
        let digits = l.trim_start_matches("0x").trim_start_matches("0X");
        u16::from_str_radix(digits, 16).ok()
    });
    Ok(if language == Some(LANG_EN_US) { 0 } else { 1 })
}

fn attribute(element: &quick_xml::events::BytesStart<'_>, key: &str) -> Result<Option<String>> {
    let attr = element
        .try_get_attribute(key)
        .map_err(|e| Error::Metadata(e.to_string()))?;
    match attr {
        Some(attr) => {
            let value = attr.unescape_value().map_err(|e| Error::Metadata(e.to_string()))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}
