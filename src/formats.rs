/// msdf-atlas-gen JSON convertor
pub mod json;
/// String-decoding wrapper around the JSON convertor
pub mod json_string;
/// BMFont text (.fnt) convertor
pub mod text;
/// BMFont XML convertor
pub mod xml;
/// String-decoding wrapper around the XML convertor
pub mod xml_string;

use crate::{AtlasfontError, FontData};

pub use json::JsonFormat;
pub use json_string::JsonStringFormat;
pub use text::TextFormat;
pub use xml::XmlFormat;
pub use xml_string::XmlStringFormat;

/// A raw font descriptor payload, borrowed from the caller and never
/// mutated: either an already-decoded tree or the serialized text.
#[derive(Debug, Clone, Copy)]
pub enum FontSource<'a> {
    /// A decoded JSON tree.
    Json(&'a serde_json::Value),
    /// A pre-parsed XML document.
    Xml(&'a roxmltree::Document<'a>),
    /// Serialized descriptor text whose format is not yet known.
    Text(&'a str),
}

/// A bitmap font descriptor format.
///
/// `test` reports whether the data belongs to this format and never
/// fails: undecodable or structurally alien input is a non-match, so a
/// registry probe can move on to the next candidate. `parse` assumes
/// `test` passed; calling it directly on arbitrary input may surface a
/// decode error.
pub trait FontFormat: Sync {
    fn name(&self) -> &'static str;
    fn test(&self, data: &FontSource) -> bool;
    fn parse(&self, data: &FontSource) -> Result<FontData, AtlasfontError>;
}

// Registered formats, maybe make this extensible in the future?
pub static FORMATS: &[&dyn FontFormat] = &[
    &JsonFormat,
    &JsonStringFormat,
    &TextFormat,
    &XmlFormat,
    &XmlStringFormat,
];

// Formats which accept raw text, ordered by increasing detection cost.
pub static STRING_FORMATS: &[&dyn FontFormat] =
    &[&JsonStringFormat, &TextFormat, &XmlStringFormat];

/// Auto-detect the font descriptor format based on data.
///
/// Probes the registered formats in priority order and returns the
/// first that claims the data, or `None` when nothing does.
pub fn detect_format(data: &FontSource) -> Option<&'static dyn FontFormat> {
    for format in FORMATS {
        if format.test(data) {
            log::debug!("Detected {} font data", format.name());
            return Some(*format);
        }
    }
    None
}

/// Auto-detect and parse a string-encoded font descriptor.
///
/// Probes only the string-accepting formats. Returns
/// [`AtlasfontError::UnrecognizedFormat`] when no format claims the
/// text; that outcome is expected for unsupported input and must be
/// checked by the caller rather than treated as an empty font.
pub fn detect_and_parse(text: &str) -> Result<FontData, AtlasfontError> {
    let data = FontSource::Text(text);
    for format in STRING_FORMATS {
        if format.test(&data) {
            log::debug!("Parsing font data as {}", format.name());
            return format.parse(&data);
        }
    }
    Err(AtlasfontError::UnrecognizedFormat)
}
