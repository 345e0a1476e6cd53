//! The fixed drawing sequence of a certificate.

use crate::assets::Assets;
use crate::error::Result;
use crate::layout::{Cursor, PageGeometry, Point, Rect, Side};
use crate::model::{DocumentFields, FontRole};
use crate::options::TemplateOptions;

use super::canvas::Canvas;

/// Opening line of every certificate.
pub const GREETING: &str = "A quien corresponda:";
/// Line above the signature.
pub const VALEDICTION: &str = "Atentamente:";
pub const EMAIL_LABEL: &str = "Email: ";
pub const PHONE_LABEL: &str = "Cel: ";
pub const ADDRESS_LABEL: &str = "Dirección: ";

/// Render `fields` into a complete single-page document.
pub fn render(
    fields: &DocumentFields,
    assets: &Assets,
    options: &TemplateOptions,
) -> Result<Vec<u8>> {
    let geometry = PageGeometry::new(options);
    let canvas = Canvas::new(assets, geometry.width, geometry.height);
    let mut assembler = Assembler {
        cursor: Cursor::at(geometry.first_baseline),
        canvas,
        geometry,
        options,
    };

    assembler.draw_logo(assets);
    assembler.draw_title(&fields.title);
    assembler.draw_frame();
    assembler.draw_body(fields);
    assembler.draw_signature();
    assembler.draw_signer(fields);
    assembler.draw_contact(fields);
    assembler.draw_corners();

    log::debug!(
        "laid out {:?}, last baseline at {}",
        fields.title,
        assembler.cursor.y()
    );
    assembler.canvas.finish(&fields.title)
}

/// Per-call rendering state. The cursor is owned here and never shared.
struct Assembler<'a> {
    canvas: Canvas<'a>,
    geometry: PageGeometry,
    options: &'a TemplateOptions,
    cursor: Cursor,
}

impl Assembler<'_> {
    fn draw_logo(&mut self, assets: &Assets) {
        let placed = self
            .geometry
            .logo
            .fit(assets.logo.width() as f32, assets.logo.height() as f32);
        self.canvas.draw_logo(placed);
    }

    fn draw_title(&mut self, title: &str) {
        self.canvas.set_fill_color(self.options.style.dark);
        self.canvas.draw_text(
            self.geometry.left,
            self.geometry.title_y,
            FontRole::Bold,
            self.options.title_size,
            title,
        );
    }

    fn draw_frame(&mut self) {
        self.canvas.set_stroke_color(self.options.style.border);
        self.canvas.set_line_width(self.options.rule_width);
        self.canvas.stroke_rect(self.geometry.content_box);
    }

    /// Greeting, body paragraphs and the closing sentence.
    fn draw_body(&mut self, fields: &DocumentFields) {
        self.canvas.set_fill_color(self.options.style.dark);
        self.paragraph(GREETING);

        for paragraph in fields.paragraphs() {
            self.skip(self.options.paragraph_gap);
            if !paragraph.is_empty() {
                self.paragraph(paragraph);
            }
        }

        if let Some(closing) = fields.closing_sentence() {
            self.skip(self.options.paragraph_gap);
            self.paragraph(&closing);
        }
    }

    /// Valediction and the signature rule.
    fn draw_signature(&mut self) {
        self.skip(self.options.closing_gap);
        self.line(FontRole::Regular, self.options.body_size, VALEDICTION);

        self.skip(self.options.signature_gap);
        let y = self.cursor.y();
        let x = self.geometry.text_left;
        let length = self.geometry.text_width * self.options.signature_ratio;
        self.canvas.set_stroke_color(self.options.style.dark);
        self.canvas.set_line_width(self.options.rule_width);
        self.canvas.line(Point { x, y }, Point { x: x + length, y });
    }

    /// Signer name, role and organization on fixed baselines.
    fn draw_signer(&mut self, fields: &DocumentFields) {
        let size = self.options.body_size;
        self.skip(self.options.signer_gap);
        self.line(FontRole::Bold, size, &fields.signer_name);
        self.skip(self.options.signer_step);
        self.line(FontRole::Regular, size, &fields.signer_role);
        self.skip(self.options.signer_step);
        self.line(FontRole::Bold, size, &fields.organization);
    }

    /// Email, phone and address; an empty value takes no line at all.
    fn draw_contact(&mut self, fields: &DocumentFields) {
        self.skip(self.options.contact_gap);
        let size = self.options.contact_size;
        let step = self.options.contact_step;

        if !fields.email.is_empty() {
            self.email_line(&fields.email);
            self.skip(step);
        }
        if !fields.phone.is_empty() {
            self.line(FontRole::Regular, size, &format!("{}{}", PHONE_LABEL, fields.phone));
            self.skip(step);
        }
        if !fields.address.is_empty() {
            self.line(
                FontRole::Regular,
                size,
                &format!("{}{}", ADDRESS_LABEL, fields.address),
            );
            self.skip(step);
        }
    }

    /// "Email: " followed by the address in link color, underlined.
    fn email_line(&mut self, email: &str) {
        let style = self.options.style;
        let size = self.options.contact_size;
        let x = self.geometry.text_left;
        let y = self.cursor.y();

        self.canvas.set_fill_color(style.dark);
        self.canvas.draw_text(x, y, FontRole::Regular, size, EMAIL_LABEL);

        let email_x = x + self.canvas.text_width(FontRole::Regular, size, EMAIL_LABEL);
        let email_width = self.canvas.text_width(FontRole::Regular, size, email);
        self.canvas.set_fill_color(style.link);
        self.canvas.draw_text(email_x, y, FontRole::Regular, size, email);

        let underline_y = y - self.options.underline_offset;
        self.canvas.set_stroke_color(style.link);
        self.canvas.set_line_width(self.options.underline_width);
        self.canvas.line(
            Point {
                x: email_x,
                y: underline_y,
            },
            Point {
                x: email_x + email_width,
                y: underline_y,
            },
        );

        self.canvas.set_fill_color(style.dark);
        self.canvas.set_stroke_color(style.dark);
    }

    /// Accent squares centered on the content-box corners.
    fn draw_corners(&mut self) {
        for corner in self.geometry.corner_squares() {
            let color = match corner.side {
                Side::Left => self.options.style.teal,
                Side::Right => self.options.style.pink,
            };
            self.canvas.set_fill_color(color);
            let square = Rect::centered_square(corner.center, self.options.corner_size);
            self.canvas.fill_rect(square);
        }
    }

    fn paragraph(&mut self, text: &str) {
        self.cursor = self.canvas.draw_paragraph(
            text,
            self.geometry.text_left,
            self.cursor,
            self.geometry.text_width,
            FontRole::Regular,
            self.options.body_size,
            self.options.leading,
        );
    }

    /// A single unwrapped line at the cursor; the cursor does not move.
    fn line(&mut self, role: FontRole, size: f32, text: &str) {
        self.canvas.draw_text(self.geometry.text_left, self.cursor.y(), role, size, text);
    }

    fn skip(&mut self, distance: f32) {
        self.cursor = self.cursor.advance(distance);
    }
}
