use roxmltree::Node;

use crate::{
    font::{Char, FontData, KerningPair, Page},
    formats::{FontFormat, FontSource},
    AtlasfontError,
};

fn num(node: &Node, attribute: &str) -> f32 {
    node.attribute(attribute)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0.0)
}

fn int(node: &Node, attribute: &str) -> u32 {
    node.attribute(attribute)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// BitmapFont in AngelCode BMFont XML format, over a pre-parsed
/// document.
pub struct XmlFormat;

impl FontFormat for XmlFormat {
    fn name(&self) -> &'static str {
        "XML"
    }

    fn test(&self, data: &FontSource) -> bool {
        let FontSource::Xml(document) = data else {
            return false;
        };
        let root = document.root_element();
        root.has_tag_name("font")
            && root
                .children()
                .any(|child| child.has_tag_name("info") && child.has_attribute("face"))
            && root.descendants().any(|node| node.has_tag_name("page"))
    }

    fn parse(&self, data: &FontSource) -> Result<FontData, AtlasfontError> {
        let FontSource::Xml(document) = data else {
            return Err(AtlasfontError::WrongConvertor { format: self.name() });
        };

        let mut data = FontData::default();
        let root = document.root_element();
        for node in root.descendants().filter(Node::is_element) {
            match node.tag_name().name() {
                "info" => {
                    data.info.face = node.attribute("face").unwrap_or_default().to_string();
                    data.info.size = num(&node, "size");
                }
                "common" => {
                    data.common.line_height = num(&node, "lineHeight");
                }
                "page" => {
                    data.pages.push(Page {
                        id: int(&node, "id"),
                        file: node.attribute("file").unwrap_or_default().to_string(),
                    });
                }
                "char" => {
                    data.chars.push(Char {
                        id: int(&node, "id"),
                        page: int(&node, "page") as usize,
                        x: num(&node, "x"),
                        y: num(&node, "y"),
                        width: num(&node, "width"),
                        height: num(&node, "height"),
                        xoffset: num(&node, "xoffset"),
                        yoffset: num(&node, "yoffset"),
                        xadvance: num(&node, "xadvance"),
                    });
                }
                "kerning" => {
                    data.kerning.push(KerningPair {
                        first: int(&node, "first"),
                        second: int(&node, "second"),
                        amount: num(&node, "amount"),
                    });
                }
                _ => {}
            }
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
