use crate::{
    formats::{FontFormat, FontSource, XmlFormat},
    AtlasfontError, FontData,
};

/// String-encoded variant of [`XmlFormat`].
pub struct XmlStringFormat;

impl FontFormat for XmlStringFormat {
    fn name(&self) -> &'static str {
        "XML string"
    }

    fn test(&self, data: &FontSource) -> bool {
        let FontSource::Text(text) = data else {
            return false;
        };
        match roxmltree::Document::parse(text) {
            Ok(document) => XmlFormat.test(&FontSource::Xml(&document)),
            Err(_) => false,
        }
    }

    fn parse(&self, data: &FontSource) -> Result<FontData, AtlasfontError> {
        let FontSource::Text(text) = data else {
            return Err(AtlasfontError::WrongConvertor { format: self.name() });
        };
        let document = roxmltree::Document::parse(text)?;
        XmlFormat.parse(&FontSource::Xml(&document))
    }
}
