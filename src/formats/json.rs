use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    font::{Char, DistanceField, FontCommon, FontData, FontInfo, KerningPair, Page},
    formats::{FontFormat, FontSource},
    AtlasfontError,
};

/// Distance field variants produced by msdf-atlas-gen which this
/// convertor understands.
pub const SUPPORTED_FIELD_TYPES: &[&str] = &["msdf", "mtsdf", "sdf"];

/// Source schema for the msdf-atlas-gen JSON descriptor. Field names
/// are fixed by the generator and must match exactly.
#[derive(Serialize, Deserialize, Default)]
pub(crate) struct Descriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub atlas: Atlas,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(default)]
    pub glyphs: Vec<Glyph>,
    #[serde(default)]
    pub kerning: Vec<Kern>,
    #[serde(default)]
    pub page: Vec<DescriptorPage>,
}

#[derive(Serialize, Deserialize, Default)]
pub(crate) struct Atlas {
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(rename = "distanceRange", default)]
    pub distance_range: f32,
    #[serde(default)]
    pub size: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(rename = "yOrigin", default)]
    pub y_origin: String,
}

#[derive(Serialize, Deserialize, Default)]
pub(crate) struct Metrics {
    #[serde(rename = "emSize", default)]
    pub em_size: f32,
    #[serde(rename = "lineHeight", default)]
    pub line_height: f32,
    #[serde(default)]
    pub ascender: f32,
    #[serde(default)]
    pub descender: f32,
    #[serde(rename = "underlineY", default)]
    pub underline_y: f32,
    #[serde(rename = "underlineThickness", default)]
    pub underline_thickness: f32,
}

#[derive(Serialize, Deserialize, Default)]
pub(crate) struct Glyph {
    #[serde(default)]
    pub unicode: u32,
    #[serde(default)]
    pub advance: f32,
    #[serde(rename = "planeBounds")]
    pub plane_bounds: Option<Bounds>,
    #[serde(rename = "atlasBounds")]
    pub atlas_bounds: Option<Bounds>,
}

/// A glyph box in the generator's bottom-left mathematical orientation:
/// `top` is the coordinate nearer the top of the glyph, whatever the
/// atlas's declared y origin.
#[derive(Serialize, Deserialize, Default)]
pub(crate) struct Bounds {
    #[serde(default)]
    pub left: f32,
    #[serde(default)]
    pub bottom: f32,
    #[serde(default)]
    pub right: f32,
    #[serde(default)]
    pub top: f32,
}

#[derive(Serialize, Deserialize, Default)]
pub(crate) struct Kern {
    #[serde(default)]
    pub unicode1: u32,
    #[serde(default)]
    pub unicode2: u32,
    #[serde(default)]
    pub advance: f32,
}

#[derive(Serialize, Deserialize, Default)]
pub(crate) struct DescriptorPage {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub file: String,
}

/// BitmapFont in msdf-atlas-gen JSON format.
pub struct JsonFormat;

impl FontFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "JSON"
    }

    /// Matches iff `atlas.type` names a supported distance field
    /// variant. Absent paths are a non-match, never a failure.
    fn test(&self, data: &FontSource) -> bool {
        let FontSource::Json(value) = data else {
            return false;
        };
        value
            .get("atlas")
            .and_then(|atlas| atlas.get("type"))
            .and_then(Value::as_str)
            .is_some_and(|ty| SUPPORTED_FIELD_TYPES.contains(&ty))
    }

    fn parse(&self, data: &FontSource) -> Result<FontData, AtlasfontError> {
        let FontSource::Json(value) = data else {
            return Err(AtlasfontError::WrongConvertor { format: self.name() });
        };
        let descriptor = Descriptor::deserialize(*value)?;
        Ok(convert(&descriptor))
    }
}

/// Convert the decoded descriptor into canonical [`FontData`].
///
/// Total over any schema-typed descriptor: glyphs with no ink carry no
/// `atlasBounds`/`planeBounds`, and every geometric field derived from
/// an absent box degrades to 0.
pub(crate) fn convert(json: &Descriptor) -> FontData {
    let mut data = FontData {
        info: FontInfo {
            face: json.name.clone(),
            size: json.atlas.size,
        },
        common: FontCommon {
            line_height: json.atlas.size * json.metrics.line_height,
        },
        ..Default::default()
    };

    if !json.page.is_empty() {
        data.pages = json
            .page
            .iter()
            .map(|page| Page {
                id: page.id,
                file: page.file.clone(),
            })
            .collect();
    } else {
        // Single-page atlases conventionally omit the page list.
        log::debug!("No page list; synthesizing {}.png", json.name);
        data.pages.push(Page {
            id: 0,
            file: format!("{}.png", json.name),
        });
    }

    let bottom_origin = json.atlas.y_origin == "bottom";
    for glyph in &json.glyphs {
        let atlas_bounds = glyph.atlas_bounds.as_ref();
        let plane_bounds = glyph.plane_bounds.as_ref();
        let x = atlas_bounds.map(|b| b.left).unwrap_or(0.0);
        let y = atlas_bounds
            .map(|b| {
                if bottom_origin {
                    json.atlas.height - b.top
                } else {
                    b.top
                }
            })
            .unwrap_or(0.0);
        let width = atlas_bounds.map(|b| b.right - b.left).unwrap_or(0.0);
        // The sign of the non-bottom branch is a quirk of the source
        // format; downstream behaviour under a negative height is
        // unverified, so it is preserved rather than normalized.
        let height = atlas_bounds
            .map(|b| {
                if bottom_origin {
                    b.top - b.bottom
                } else {
                    b.bottom - b.top
                }
            })
            .unwrap_or(0.0);
        let xoffset = plane_bounds.map(|b| b.left * json.atlas.size).unwrap_or(0.0);
        let yoffset = plane_bounds
            .map(|b| (1.0 - b.top) * json.atlas.size)
            .unwrap_or(0.0);

        data.chars.push(Char {
            id: glyph.unicode,
            // This format has no multi-page glyph assignment.
            page: 0,
            x,
            y,
            width,
            height,
            xoffset,
            yoffset,
            xadvance: glyph.advance * json.atlas.size,
        });
    }

    // Kerning is already in final pixel units; copy field-for-field.
    data.kerning = json
        .kerning
        .iter()
        .map(|pair| KerningPair {
            first: pair.unicode1,
            second: pair.unicode2,
            amount: pair.advance,
        })
        .collect();

    data.distance_field = Some(DistanceField {
        field_type: json.atlas.field_type.clone(),
        distance_range: json.atlas.distance_range,
    });

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn descriptor(extra: Value) -> Value {
        let mut base = json!({
            "atlas": {"type": "msdf", "distanceRange": 4.0, "size": 32.0,
                      "width": 256.0, "height": 100.0, "yOrigin": "bottom"},
            "name": "Roboto",
            "metrics": {"emSize": 1.0, "lineHeight": 1.2, "ascender": 0.9,
                        "descender": -0.25, "underlineY": -0.1,
                        "underlineThickness": 0.05},
            "glyphs": [],
            "kerning": []
        });
        if let (Some(map), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            for (key, value) in extra {
                map.insert(key.clone(), value.clone());
            }
        }
        base
    }

    fn parse(value: &Value) -> FontData {
        JsonFormat.parse(&FontSource::Json(value)).unwrap()
    }

    #[rstest]
    #[case("msdf")]
    #[case("mtsdf")]
    #[case("sdf")]
    fn test_accepts_every_supported_field_type(#[case] field_type: &str) {
        let value = json!({"atlas": {"type": field_type}});
        assert!(JsonFormat.test(&FontSource::Json(&value)));
    }

    #[rstest]
    #[case(json!({"atlas": {"type": "psdf"}}))]
    #[case(json!({"atlas": {"type": 7}}))]
    #[case(json!({"atlas": {}}))]
    #[case(json!({"info": {"face": "Arial"}}))]
    #[case(json!(null))]
    fn test_rejects_everything_else(#[case] value: Value) {
        assert!(!JsonFormat.test(&FontSource::Json(&value)));
    }

    #[test]
    fn info_and_line_height_are_scaled_by_atlas_size() {
        let font = parse(&descriptor(json!({})));
        assert_eq!(font.info.face, "Roboto");
        assert_eq!(font.info.size, 32.0);
        assert_eq!(font.common.line_height, 32.0 * 1.2);
    }

    #[test]
    fn missing_page_list_synthesizes_one_page() {
        let font = parse(&descriptor(json!({})));
        assert_eq!(
            font.pages,
            vec![Page {
                id: 0,
                file: "Roboto.png".into()
            }]
        );
    }

    #[test]
    fn explicit_page_list_is_copied_verbatim() {
        let font = parse(&descriptor(json!({
            "page": [{"id": 3, "file": "a.png"}, {"id": 1, "file": "b.png"}]
        })));
        assert_eq!(
            font.pages,
            vec![
                Page {
                    id: 3,
                    file: "a.png".into()
                },
                Page {
                    id: 1,
                    file: "b.png".into()
                }
            ]
        );
    }

    #[test]
    fn glyph_without_bounds_degrades_to_zero_geometry() {
        let font = parse(&descriptor(json!({
            "glyphs": [{"unicode": 32, "advance": 0.25}]
        })));
        let space = &font.chars[0];
        assert_eq!(space.id, 32);
        assert_eq!(
            (space.x, space.y, space.width, space.height),
            (0.0, 0.0, 0.0, 0.0)
        );
        assert_eq!((space.xoffset, space.yoffset), (0.0, 0.0));
        assert_eq!(space.xadvance, 0.25 * 32.0);
    }

    #[test]
    fn bottom_origin_atlas_bounds_flip_to_top_left() {
        let font = parse(&descriptor(json!({
            "glyphs": [{"unicode": 65, "advance": 0.5,
                        "atlasBounds": {"left": 10.0, "bottom": 20.0,
                                        "right": 30.0, "top": 40.0}}]
        })));
        let a = &font.chars[0];
        assert_eq!(a.x, 10.0);
        assert_eq!(a.y, 60.0); // 100 - 40
        assert_eq!(a.width, 20.0);
        assert_eq!(a.height, 20.0);
    }

    #[test]
    fn top_origin_atlas_bounds_keep_the_source_sign() {
        let mut value = descriptor(json!({
            "glyphs": [{"unicode": 65, "advance": 0.5,
                        "atlasBounds": {"left": 10.0, "bottom": 20.0,
                                        "right": 30.0, "top": 40.0}}]
        }));
        value["atlas"]["yOrigin"] = json!("top");
        let font = parse(&value);
        let a = &font.chars[0];
        assert_eq!(a.y, 40.0);
        assert_eq!(a.height, -20.0);
    }

    #[test]
    fn plane_bounds_scale_into_pixel_offsets() {
        let font = parse(&descriptor(json!({
            "glyphs": [{"unicode": 65, "advance": 0.5,
                        "planeBounds": {"left": 0.05, "bottom": -0.1,
                                        "right": 0.45, "top": 0.75}}]
        })));
        let a = &font.chars[0];
        assert_eq!(a.xoffset, 0.05 * 32.0);
        assert_eq!(a.yoffset, (1.0 - 0.75) * 32.0);
        assert_eq!(a.page, 0);
    }

    #[test]
    fn kerning_is_copied_without_unit_conversion() {
        let font = parse(&descriptor(json!({
            "kerning": [{"unicode1": 65, "unicode2": 66, "advance": -2.0}]
        })));
        assert_eq!(
            font.kerning,
            vec![KerningPair {
                first: 65,
                second: 66,
                amount: -2.0
            }]
        );
    }

    #[test]
    fn distance_field_mirrors_the_atlas_block() {
        let font = parse(&descriptor(json!({})));
        assert_eq!(
            font.distance_field,
            Some(DistanceField {
                field_type: "msdf".into(),
                distance_range: 4.0
            })
        );
    }

    #[test]
    fn parse_rejects_non_json_sources() {
        let err = JsonFormat.parse(&FontSource::Text("{}")).unwrap_err();
        assert!(matches!(
            err,
            AtlasfontError::WrongConvertor { format: "JSON" }
        ));
    }
}
