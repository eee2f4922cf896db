#![deny(clippy::unwrap_used, clippy::expect_used)]

//! Converts bitmap font descriptors (msdf-atlas-gen JSON, BMFont text
//! and XML, raw or string-encoded) into one canonical [`FontData`]
//! structure for a text rendering pipeline. Pure, synchronous, no I/O:
//! the caller supplies an in-memory payload and owns the result.

mod error;
mod font;
pub mod formats;

pub use crate::{
    error::AtlasfontError,
    font::{Char, DistanceField, FontCommon, FontData, FontInfo, KerningPair, Page},
    formats::{detect_and_parse, detect_format, FontFormat, FontSource},
};

/// Detect the format of an already-decoded payload and convert it.
///
/// Returns [`AtlasfontError::UnrecognizedFormat`] when no registered
/// format claims the data; for unsupported input that is the expected
/// outcome, not a malfunction.
pub fn parse(data: &FontSource) -> Result<FontData, AtlasfontError> {
    match detect_format(data) {
        Some(format) => format.parse(data),
        None => Err(AtlasfontError::UnrecognizedFormat),
    }
}
