//! TrueType faces embedded as simple WinAnsi fonts.

use std::sync::OnceLock;

use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use regex::Regex;
use ttf_parser::{name_id, Face};

use super::winansi;
use crate::assets::deflate;
use crate::error::Result;

/// First and last character codes carried in the `/Widths` array.
pub const FIRST_CHAR: u8 = 32;
pub const LAST_CHAR: u8 = 255;

/// A parsed TrueType face with its metrics scaled to 1/1000 em.
///
/// The font program is kept as raw bytes for embedding; metrics are
/// extracted once at load time so the face needs no borrowed parser state.
#[derive(Debug, Clone)]
pub struct TrueTypeFace {
    base_font: String,
    data: Vec<u8>,
    widths: Vec<u16>,
    missing_width: u16,
    ascent: i64,
    descent: i64,
    cap_height: i64,
    bbox: [i64; 4],
}

impl TrueTypeFace {
    /// Parse a font program. `fallback_name` names the face when the font
    /// carries no PostScript name.
    pub fn parse(data: Vec<u8>, fallback_name: &str) -> std::result::Result<Self, String> {
        let face = Face::parse(&data, 0).map_err(|e| format!("not a TrueType font: {}", e))?;

        let units_per_em = face.units_per_em().max(1) as f32;
        let scale = |v: f32| (v * 1000.0 / units_per_em).round();

        let missing_width = face
            .glyph_hor_advance(ttf_parser::GlyphId(0))
            .map(|w| scale(w as f32) as u16)
            .unwrap_or(0);

        let widths = (FIRST_CHAR..=LAST_CHAR)
            .map(|code| {
                winansi::decode_byte(code)
                    .and_then(|c| face.glyph_index(c))
                    .and_then(|gid| face.glyph_hor_advance(gid))
                    .map(|w| scale(w as f32) as u16)
                    .unwrap_or(missing_width)
            })
            .collect();

        let ascent = scale(face.ascender() as f32) as i64;
        let descent = scale(face.descender() as f32) as i64;
        let cap_height = face
            .capital_height()
            .map(|h| scale(h as f32) as i64)
            .unwrap_or(ascent);
        let bb = face.global_bounding_box();
        let bbox = [
            scale(bb.x_min as f32) as i64,
            scale(bb.y_min as f32) as i64,
            scale(bb.x_max as f32) as i64,
            scale(bb.y_max as f32) as i64,
        ];

        let postscript_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::POST_SCRIPT_NAME)
            .find_map(|name| name.to_string());
        let base_font = sanitize_font_name(postscript_name.as_deref().unwrap_or(fallback_name));

        log::debug!(
            "parsed TrueType face {} ({} bytes, {} units/em)",
            base_font,
            data.len(),
            units_per_em
        );

        Ok(Self {
            base_font,
            data,
            widths,
            missing_width,
            ascent,
            descent,
            cap_height,
            bbox,
        })
    }

    /// PostScript name written as `/BaseFont`.
    pub fn base_font(&self) -> &str {
        &self.base_font
    }

    /// Advance width of a WinAnsi code, in 1/1000 em.
    pub fn code_width(&self, code: u8) -> u16 {
        if code < FIRST_CHAR {
            return self.missing_width;
        }
        self.widths[(code - FIRST_CHAR) as usize]
    }

    /// Add the font program, descriptor and font dictionary to `doc`,
    /// returning the font dictionary's id.
    pub fn embed(&self, doc: &mut Document) -> Result<ObjectId> {
        let compressed = deflate(&self.data)?;

        let file_id = doc.add_object(Stream::new(
            dictionary! {
                "Length1" => self.data.len() as i64,
                "Filter" => "FlateDecode",
            },
            compressed,
        ));

        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => self.base_font.as_str(),
            "Flags" => 32i64,
            "FontBBox" => self.bbox.iter().map(|&v| Object::Integer(v)).collect::<Vec<_>>(),
            "ItalicAngle" => 0i64,
            "Ascent" => self.ascent,
            "Descent" => self.descent,
            "CapHeight" => self.cap_height,
            "StemV" => 80i64,
            "MissingWidth" => self.missing_width as i64,
            "FontFile2" => file_id,
        });

        let widths: Vec<Object> = self
            .widths
            .iter()
            .map(|&w| Object::Integer(w as i64))
            .collect();

        Ok(doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => self.base_font.as_str(),
            "FirstChar" => FIRST_CHAR as i64,
            "LastChar" => LAST_CHAR as i64,
            "Widths" => widths,
            "FontDescriptor" => descriptor_id,
            "Encoding" => "WinAnsiEncoding",
        }))
    }
}

/// Strip characters that are not allowed in a PDF name token.
fn sanitize_font_name(name: &str) -> String {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    let re = INVALID.get_or_init(|| Regex::new(r"[^A-Za-z0-9+\-_]").expect("valid regex"));
    let clean = re.replace_all(name, "");
    if clean.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        clean.into_owned()
    }
}
