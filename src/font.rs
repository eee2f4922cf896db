use serde::{Deserialize, Serialize};

/// Canonical bitmap font metrics, as produced by any of the format
/// convertors. A pure value: freshly allocated per parse, owned by the
/// caller, with no reference back to the source descriptor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontData {
    pub info: FontInfo,
    pub common: FontCommon,
    /// Never empty after a successful parse; convertors synthesize a
    /// single page when the source omits its page list.
    pub pages: Vec<Page>,
    pub chars: Vec<Char>,
    pub kerning: Vec<KerningPair>,
    /// `Some` only for SDF-family formats.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub distance_field: Option<DistanceField>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontInfo {
    pub face: String,
    /// Font pixel size; for SDF atlases this is the em size.
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontCommon {
    /// Pixel distance between baselines.
    pub line_height: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    pub id: u32,
    pub file: String,
}

/// One glyph record. The bounding box is in atlas pixel space with a
/// top-left origin; offsets are pixel displacements of the glyph ink
/// from the pen position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Char {
    /// Unicode codepoint.
    pub id: u32,
    /// Index into [`FontData::pages`].
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub xoffset: f32,
    pub yoffset: f32,
    pub xadvance: f32,
}

/// Pixel adjustment applied to the advance between two adjacent glyphs.
/// Codepoints are passed through from the source without being checked
/// against the glyph list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KerningPair {
    pub first: u32,
    pub second: u32,
    pub amount: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DistanceField {
    /// One of the supported SDF variants ("msdf", "mtsdf", "sdf").
    pub field_type: String,
    pub distance_range: f32,
}

impl FontData {
    pub fn char(&self, codepoint: u32) -> Option<&Char> {
        self.chars.iter().find(|c| c.id == codepoint)
    }

    pub fn kerning_amount(&self, first: u32, second: u32) -> f32 {
        self.kerning
            .iter()
            .find(|k| k.first == first && k.second == second)
            .map(|k| k.amount)
            .unwrap_or(0.0)
    }
}
