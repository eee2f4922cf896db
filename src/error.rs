use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasfontError {
    /// No registered format claimed the data. This is the normal outcome
    /// for unsupported input, not a malfunction.
    #[error("No registered format recognises this data")]
    UnrecognizedFormat,

    /// A convertor was handed data it cannot read. Only reachable by
    /// calling `parse` on a format whose `test` was never consulted.
    #[error("Data handed to the {format} convertor was not in that format")]
    WrongConvertor { format: &'static str },

    #[error("Error decoding JSON font data: {0}")]
    JsonDecode(#[from] serde_json::Error),

    #[error("Error decoding XML font data: {0}")]
    XmlDecode(#[from] roxmltree::Error),

    #[error("Malformed font descriptor: {0}")]
    Malformed(String),
}
