//! A single-page drawing surface that records PDF content operations.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, StringFormat, Stream};

use crate::assets::{deflate, Assets};
use crate::error::Result;
use crate::fonts::{winansi, TextMeasure};
use crate::layout::{wrap_words, Cursor, Point, Rect};
use crate::model::{Color, FontRole};

/// Resource name of the logo XObject.
const LOGO_NAME: &str = "Im1";
/// Version header of generated documents.
pub const PDF_VERSION: &str = "1.5";

/// Records drawing operations for one page and serializes them into a
/// complete document.
///
/// Color and line-width state is tracked so that repeated settings emit no
/// redundant operators.
pub struct Canvas<'a> {
    assets: &'a Assets,
    width: f32,
    height: f32,
    operations: Vec<Operation>,
    fill: Option<Color>,
    stroke: Option<Color>,
    line_width: Option<f32>,
}

impl<'a> Canvas<'a> {
    /// Start an empty page of `width` x `height` points.
    pub fn new(assets: &'a Assets, width: f32, height: f32) -> Self {
        Self {
            assets,
            width,
            height,
            operations: Vec::new(),
            fill: None,
            stroke: None,
            line_width: None,
        }
    }

    /// Width of `text` in the face for `role`.
    pub fn text_width(&self, role: FontRole, size: f32, text: &str) -> f32 {
        self.assets.fonts.face(role).text_width(text, size)
    }

    pub fn set_fill_color(&mut self, color: Color) {
        if self.fill != Some(color) {
            let [r, g, b] = color.components();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.fill = Some(color);
        }
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        if self.stroke != Some(color) {
            let [r, g, b] = color.components();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.stroke = Some(color);
        }
    }

    pub fn set_line_width(&mut self, width: f32) {
        if self.line_width != Some(width) {
            self.push("w", vec![width.into()]);
            self.line_width = Some(width);
        }
    }

    /// Draw one line of text with its baseline starting at `(x, y)`.
    ///
    /// Empty text draws nothing.
    pub fn draw_text(&mut self, x: f32, y: f32, role: FontRole, size: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        if !winansi::is_encodable(text) {
            log::warn!("replacing characters without a WinAnsi code in {:?}", text);
        }
        log::trace!("text at ({}, {}) {:?}: {:?}", x, y, role, text);

        self.push("BT", vec![]);
        self.push("Tf", vec![role.resource_name().into(), size.into()]);
        self.push("Td", vec![x.into(), y.into()]);
        self.push(
            "Tj",
            vec![Object::String(winansi::encode(text), StringFormat::Hexadecimal)],
        );
        self.push("ET", vec![]);
    }

    /// Wrap `text` to `max_width` and draw each line at the cursor, moving
    /// the cursor down by `leading` after every line.
    ///
    /// Returns the cursor below the last line; text without words leaves the
    /// cursor where it was.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_paragraph(
        &mut self,
        text: &str,
        x: f32,
        cursor: Cursor,
        max_width: f32,
        role: FontRole,
        size: f32,
        leading: f32,
    ) -> Cursor {
        let assets = self.assets;
        let face = assets.fonts.face(role);
        wrap_words(text, face, size, max_width).fold(cursor, |cursor, line| {
            self.draw_text(x, cursor.y(), role, size, &line);
            cursor.advance(leading)
        })
    }

    /// Stroke a straight line.
    pub fn line(&mut self, from: Point, to: Point) {
        self.push("m", vec![from.x.into(), from.y.into()]);
        self.push("l", vec![to.x.into(), to.y.into()]);
        self.push("S", vec![]);
    }

    /// Stroke the outline of `rect`.
    pub fn stroke_rect(&mut self, rect: Rect) {
        self.push("re", rect_operands(rect));
        self.push("S", vec![]);
    }

    /// Fill `rect` with the current fill color.
    pub fn fill_rect(&mut self, rect: Rect) {
        self.push("re", rect_operands(rect));
        self.push("f", vec![]);
    }

    /// Draw the logo into `rect`, stretched to its exact size.
    pub fn draw_logo(&mut self, rect: Rect) {
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                rect.width.into(),
                0i64.into(),
                0i64.into(),
                rect.height.into(),
                rect.x.into(),
                rect.y.into(),
            ],
        );
        self.push("Do", vec![LOGO_NAME.into()]);
        self.push("Q", vec![]);
    }

    /// Operations recorded so far.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Assemble the page, its resources and the document metadata, and
    /// serialize the whole document.
    pub fn finish(self, title: &str) -> Result<Vec<u8>> {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();

        let regular_id = self.assets.fonts.regular.add_to(&mut doc)?;
        let bold_id = self.assets.fonts.bold.add_to(&mut doc)?;
        let logo_id = self.assets.logo.add_to(&mut doc);

        let content = Content {
            operations: self.operations,
        }
        .encode()?;
        let content_id = doc.add_object(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            deflate(&content)?,
        ));

        let media_box: Vec<Object> = vec![
            0i64.into(),
            0i64.into(),
            self.width.into(),
            self.height.into(),
        ];
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    FontRole::Regular.resource_name() => regular_id,
                    FontRole::Bold.resource_name() => bold_id,
                },
                "XObject" => dictionary! {
                    LOGO_NAME => logo_id,
                },
            },
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => text_string(title),
            "Producer" => Object::string_literal(concat!("constancia ", env!("CARGO_PKG_VERSION"))),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        log::debug!("serialized document: {} bytes", bytes.len());
        Ok(bytes)
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }
}

fn rect_operands(rect: Rect) -> Vec<Object> {
    vec![
        rect.x.into(),
        rect.y.into(),
        rect.width.into(),
        rect.height.into(),
    ]
}

/// Encode a PDF text string as UTF-16BE with a byte-order mark.
pub fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
