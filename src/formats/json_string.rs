use serde_json::Value;

use crate::{
    formats::{FontFormat, FontSource, JsonFormat},
    AtlasfontError, FontData,
};

/// String-encoded variant of [`JsonFormat`]: decodes the text and
/// delegates detection and conversion to the JSON convertor.
pub struct JsonStringFormat;

impl FontFormat for JsonStringFormat {
    fn name(&self) -> &'static str {
        "JSON string"
    }

    /// A decode failure here is a normal non-match, not an error, so
    /// registry probing can continue with the next candidate format.
    fn test(&self, data: &FontSource) -> bool {
        let FontSource::Text(text) = data else {
            return false;
        };
        match serde_json::from_str::<Value>(text) {
            Ok(value) => JsonFormat.test(&FontSource::Json(&value)),
            Err(_) => false,
        }
    }

    /// Assumes `test` passed. Called directly on undecodable text this
    /// surfaces the decode error rather than masking it.
    fn parse(&self, data: &FontSource) -> Result<FontData, AtlasfontError> {
        let FontSource::Text(text) = data else {
            return Err(AtlasfontError::WrongConvertor { format: self.name() });
        };
        let value: Value = serde_json::from_str(text)?;
        JsonFormat.parse(&FontSource::Json(&value))
    }
}
