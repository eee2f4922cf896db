use std::sync::LazyLock;

use regex::Regex;

use crate::{
    font::{Char, FontData, KerningPair, Page},
    formats::{FontFormat, FontSource},
    AtlasfontError,
};

// key=value or key="quoted value"
#[allow(clippy::expect_used)]
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z]+)=(?:"([^"]*)"|([^\s"]+))"#).expect("attribute pattern is valid")
});

/// One parsed `tag key=value ...` line.
struct Record<'a> {
    tag: &'a str,
    attributes: Vec<(&'a str, &'a str)>,
}

impl<'a> Record<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        let tag = line.split_whitespace().next()?;
        let attributes = ATTRIBUTE
            .captures_iter(line)
            .filter_map(|captures| {
                let key = captures.get(1)?.as_str();
                let value = captures.get(2).or_else(|| captures.get(3))?.as_str();
                Some((key, value))
            })
            .collect();
        Some(Record { tag, attributes })
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    fn num(&self, key: &str) -> f32 {
        self.get(key).and_then(|v| v.parse().ok()).unwrap_or(0.0)
    }

    fn int(&self, key: &str) -> u32 {
        self.get(key).and_then(|v| v.parse().ok()).unwrap_or(0)
    }
}

/// BitmapFont in AngelCode BMFont text (.fnt) format.
pub struct TextFormat;

impl FontFormat for TextFormat {
    fn name(&self) -> &'static str {
        "text"
    }

    fn test(&self, data: &FontSource) -> bool {
        matches!(data, FontSource::Text(text) if text.starts_with("info face="))
    }

    fn parse(&self, data: &FontSource) -> Result<FontData, AtlasfontError> {
        let FontSource::Text(text) = data else {
            return Err(AtlasfontError::WrongConvertor { format: self.name() });
        };

        let mut data = FontData::default();
        let mut saw_info = false;
        for line in text.lines() {
            let Some(record) = Record::parse(line) else {
                continue;
            };
            match record.tag {
                "info" => {
                    saw_info = true;
                    data.info.face = record.get("face").unwrap_or_default().to_string();
                    data.info.size = record.num("size");
                }
                "common" => {
                    data.common.line_height = record.num("lineHeight");
                }
                "page" => {
                    data.pages.push(Page {
                        id: record.int("id"),
                        file: record.get("file").unwrap_or_default().to_string(),
                    });
                }
                "char" => {
                    data.chars.push(Char {
                        id: record.int("id"),
                        page: record.int("page") as usize,
                        x: record.num("x"),
                        y: record.num("y"),
                        width: record.num("width"),
                        height: record.num("height"),
                        xoffset: record.num("xoffset"),
                        yoffset: record.num("yoffset"),
                        xadvance: record.num("xadvance"),
                    });
                }
                "kerning" => {
                    data.kerning.push(KerningPair {
                        first: record.int("first"),
                        second: record.int("second"),
                        amount: record.num("amount"),
                    });
                }
                // chars/kernings count lines and unknown tags
                _ => {}
            }
        }

        if !saw_info {
            return Err(AtlasfontError::Malformed(
                "text font descriptor has no info line".into(),
            ));
        }
        if data.pages.is_empty() {
            data.pages.push(Page {
                id: 0,
                file: format!("{}.png", data.info.face),
            });
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FNT: &str = "\
info face=\"Test Sans\" size=24 bold=0 italic=0
common lineHeight=28 base=22 scaleW=128 scaleH=128 pages=1
page id=0 file=\"test_0.png\"
chars count=2
char id=65 x=2 y=4 width=14 height=18 xoffset=1 yoffset=3 xadvance=15 page=0 chnl=15
char id=32 x=0 y=0 width=0 height=0 xoffset=0 yoffset=0 xadvance=6 page=0 chnl=15
kernings count=1
kerning first=65 second=86 amount=-2
";

    #[test]
    fn detects_fnt_text() {
        assert!(TextFormat.test(&FontSource::Text(FNT)));
        assert!(!TextFormat.test(&FontSource::Text("common lineHeight=28")));
    }

    #[test]
    fn parses_every_record_kind() {
        let font = TextFormat.parse(&FontSource::Text(FNT)).unwrap();
        assert_eq!(font.info.face, "Test Sans");
        assert_eq!(font.info.size, 24.0);
        assert_eq!(font.common.line_height, 28.0);
        assert_eq!(
            font.pages,
            vec![Page {
                id: 0,
                file: "test_0.png".into()
            }]
        );
        assert_eq!(font.chars.len(), 2);
        let a = &font.chars[0];
        assert_eq!((a.id, a.x, a.y, a.width, a.height), (65, 2.0, 4.0, 14.0, 18.0));
        assert_eq!((a.xoffset, a.yoffset, a.xadvance), (1.0, 3.0, 15.0));
        assert_eq!(
            font.kerning,
            vec![KerningPair {
                first: 65,
                second: 86,
                amount: -2.0
            }]
        );
        assert!(font.distance_field.is_none());
    }

    #[test]
    fn missing_page_line_synthesizes_one() {
        let font = TextFormat
            .parse(&FontSource::Text("info face=\"Mini\" size=8\n"))
            .unwrap();
        assert_eq!(
            font.pages,
            vec![Page {
                id: 0,
                file: "Mini.png".into()
            }]
        );
    }

    #[test]
    fn text_without_info_line_is_malformed() {
        let err = TextFormat
            .parse(&FontSource::Text("char id=65 x=0\n"))
            .unwrap_err();
        assert!(matches!(err, AtlasfontError::Malformed(_)));
    }
}
