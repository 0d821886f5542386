//! Font metadata extraction, classification and conversion

pub mod convert;
pub mod metadata;
pub mod name_table;
pub mod weight;

pub use convert::{woff2_target, woff2_targets, Converter, FontConverter, Woff2Compress};
pub use metadata::{resolve_family_name, NameTableExtractor};
pub use name_table::{BuiltinDumper, MetadataDumper, NameDocument, StructuredQuery, TtxDumper, XmlNameQuery};
pub use weight::{determine_style, determine_weight, is_italic_font};
