//! Reading generated documents back.
//!
//! Decodes the single page of a document produced by this crate into the
//! elements that were drawn. Used by the CLI `info` command and by tests
//! that check layout positions.

use std::path::Path;

use lopdf::content::Content;
use lopdf::{Document, Object};

use crate::error::{Error, Result};
use crate::fonts::winansi;
use crate::layout::{Point, Rect};
use crate::model::{Color, FontRole};

/// Document-level facts.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    /// PDF version (e.g., "1.5")
    pub version: String,
    /// Info dictionary title
    pub title: Option<String>,
    /// Info dictionary producer
    pub producer: Option<String>,
    /// Total number of pages
    pub page_count: u32,
    /// Width and height of the first page
    pub page_size: (f32, f32),
}

/// One drawn text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub role: Option<FontRole>,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub color: Option<Color>,
}

/// A drawn element of the page, in content-stream order.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextRun),
    Line {
        from: Point,
        to: Point,
        color: Option<Color>,
        width: Option<f32>,
    },
    Rect {
        rect: Rect,
        filled: bool,
        color: Option<Color>,
    },
    Image {
        rect: Rect,
    },
}

/// A decoded document.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub info: DocumentInfo,
    pub elements: Vec<Element>,
}

impl Inspection {
    /// Decode a document from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(data)?;
        Self::from_document(&doc)
    }

    /// Decode a document from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = Document::load(path)?;
        Self::from_document(&doc)
    }

    fn from_document(doc: &Document) -> Result<Self> {
        let pages = doc.get_pages();
        let first = pages.values().next().copied();

        let mut info = DocumentInfo {
            version: doc.version.to_string(),
            title: None,
            producer: None,
            page_count: pages.len() as u32,
            page_size: (0.0, 0.0),
        };

        if let Ok(info_dict) = doc
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .and_then(|id| doc.get_dictionary(id))
        {
            info.title = info_dict.get(b"Title").ok().and_then(decode_text_string);
            info.producer = info_dict.get(b"Producer").ok().and_then(decode_text_string);
        }

        let Some(page_id) = first else {
            return Ok(Self {
                info,
                elements: Vec::new(),
            });
        };

        let page = doc.get_dictionary(page_id)?;
        if let Ok(media_box) = page.get(b"MediaBox").and_then(Object::as_array) {
            if media_box.len() >= 4 {
                info.page_size = (
                    media_box[2].as_float().unwrap_or(0.0),
                    media_box[3].as_float().unwrap_or(0.0),
                );
            }
        }

        let contents = page.get(b"Contents")?.as_reference()?;
        let stream = doc.get_object(contents)?.as_stream()?;
        let data = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());
        let content = Content::decode(&data)?;

        Ok(Self {
            info,
            elements: decode_elements(&content)?,
        })
    }

    /// Text runs in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(run) => Some(run),
            _ => None,
        })
    }

    /// The first text run whose text equals `text`.
    pub fn find_text(&self, text: &str) -> Option<&TextRun> {
        self.texts().find(|run| run.text == text)
    }

    /// All stroked line segments.
    pub fn lines(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|e| matches!(e, Element::Line { .. }))
    }

    /// All filled rectangles.
    pub fn filled_rects(&self) -> impl Iterator<Item = (&Rect, Option<Color>)> {
        self.elements.iter().filter_map(|e| match e {
            Element::Rect {
                rect,
                filled: true,
                color,
            } => Some((rect, *color)),
            _ => None,
        })
    }
}

#[derive(Default)]
struct GraphicsState {
    fill: Option<Color>,
    stroke: Option<Color>,
    line_width: Option<f32>,
    font: Option<FontRole>,
    font_size: f32,
    text_pos: (f32, f32),
    path_start: Option<Point>,
    path_end: Option<Point>,
    pending_rect: Option<Rect>,
    matrix: Option<Rect>,
}

fn decode_elements(content: &Content) -> Result<Vec<Element>> {
    let mut state = GraphicsState::default();
    let mut elements = Vec::new();

    for op in &content.operations {
        let nums = |count: usize| -> Result<Vec<f32>> {
            if op.operands.len() < count {
                return Err(Error::Pdf(format!("operator {} is missing operands", op.operator)));
            }
            op.operands[..count]
                .iter()
                .map(|o| o.as_float().map_err(Error::from))
                .collect()
        };

        match op.operator.as_str() {
            "rg" => state.fill = Some(color(&nums(3)?)),
            "RG" => state.stroke = Some(color(&nums(3)?)),
            "w" => state.line_width = Some(nums(1)?[0]),
            "BT" => state.text_pos = (0.0, 0.0),
            "Tf" => {
                state.font = op
                    .operands
                    .first()
                    .and_then(|o| o.as_name().ok())
                    .and_then(font_role);
                state.font_size = op.operands.get(1).and_then(|o| o.as_float().ok()).unwrap_or(0.0);
            }
            "Td" => {
                let v = nums(2)?;
                state.text_pos = (state.text_pos.0 + v[0], state.text_pos.1 + v[1]);
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    elements.push(Element::Text(TextRun {
                        text: decode_winansi(bytes),
                        role: state.font,
                        size: state.font_size,
                        x: state.text_pos.0,
                        y: state.text_pos.1,
                        color: state.fill,
                    }));
                }
            }
            "m" => {
                let v = nums(2)?;
                state.path_start = Some(Point { x: v[0], y: v[1] });
            }
            "l" => {
                let v = nums(2)?;
                state.path_end = Some(Point { x: v[0], y: v[1] });
            }
            "re" => {
                let v = nums(4)?;
                state.pending_rect = Some(Rect::new(v[0], v[1], v[2], v[3]));
            }
            "S" | "f" => {
                let filled = op.operator == "f";
                if let Some(rect) = state.pending_rect.take() {
                    elements.push(Element::Rect {
                        rect,
                        filled,
                        color: if filled { state.fill } else { state.stroke },
                    });
                } else if let (Some(from), Some(to)) =
                    (state.path_start.take(), state.path_end.take())
                {
                    elements.push(Element::Line {
                        from,
                        to,
                        color: state.stroke,
                        width: state.line_width,
                    });
                }
            }
            "cm" => {
                let v = nums(6)?;
                state.matrix = Some(Rect::new(v[4], v[5], v[0], v[3]));
            }
            "Do" => {
                if let Some(rect) = state.matrix {
                    elements.push(Element::Image { rect });
                }
            }
            "Q" => state.matrix = None,
            _ => {}
        }
    }

    Ok(elements)
}

fn color(v: &[f32]) -> Color {
    Color {
        r: v[0],
        g: v[1],
        b: v[2],
    }
}

fn font_role(name: &[u8]) -> Option<FontRole> {
    [FontRole::Regular, FontRole::Bold]
        .into_iter()
        .find(|role| role.resource_name().as_bytes() == name)
}

fn decode_winansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| winansi::decode_byte(b).unwrap_or('\u{FFFD}'))
        .collect()
}

/// Decode a PDF text string (UTF-16BE with BOM, or single-byte).
fn decode_text_string(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => {
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                String::from_utf16(&utf16).ok()
            } else {
                Some(bytes.iter().map(|&b| b as char).collect())
            }
        }
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Operation;
    use lopdf::StringFormat;

    #[test]
    fn test_decode_text_run() {
        let content = Content {
            operations: vec![
                Operation::new("rg", vec![0i64.into(), 0i64.into(), 1i64.into()]),
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F2".into(), 12i64.into()]),
                Operation::new("Td", vec![75i64.into(), 574i64.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(b"Direcci\xF3n".to_vec(), StringFormat::Literal)],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let elements = decode_elements(&content).unwrap();
        match &elements[0] {
            Element::Text(run) => {
                assert_eq!(run.text, "Dirección");
                assert_eq!(run.role, Some(FontRole::Bold));
                assert_eq!((run.x, run.y), (75.0, 574.0));
                assert_eq!(run.color.unwrap().b, 1.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_decode_line_and_rect() {
        let content = Content {
            operations: vec![
                Operation::new("m", vec![1i64.into(), 2i64.into()]),
                Operation::new("l", vec![3i64.into(), 2i64.into()]),
                Operation::new("S", vec![]),
                Operation::new("re", vec![0i64.into(), 0i64.into(), 14i64.into(), 14i64.into()]),
                Operation::new("f", vec![]),
            ],
        };
        let elements = decode_elements(&content).unwrap();
        assert!(matches!(elements[0], Element::Line { .. }));
        assert!(matches!(elements[1], Element::Rect { filled: true, .. }));
    }

    #[test]
    fn test_missing_operands_is_error() {
        let content = Content {
            operations: vec![Operation::new("Td", vec![1i64.into()])],
        };
        assert!(decode_elements(&content).is_err());
    }

    #[test]
    fn test_decode_text_string_utf16() {
        let obj = Object::String(
            vec![0xFE, 0xFF, 0x00, b'O', 0x00, b'k'],
            StringFormat::Hexadecimal,
        );
        assert_eq!(decode_text_string(&obj).as_deref(), Some("Ok"));
    }

    #[test]
    fn test_invalid_bytes_rejected() {
        assert!(Inspection::from_bytes(b"not a pdf").is_err());
    }
}
