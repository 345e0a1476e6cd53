//! Font faces, text measurement and text encoding.
//!
//! Both faces are drawn as simple fonts with `WinAnsiEncoding`, which covers
//! every letter Spanish uses. Measurement goes through the same encoding as
//! drawing so a measured line is exactly the line that ends up on the page.

mod standard;
mod truetype;
pub mod winansi;

pub use standard::StandardFont;
pub use truetype::TrueTypeFace;

use std::path::Path;

use lopdf::{Document, ObjectId};

use crate::error::{AssetKind, Error, Result};
use crate::model::FontRole;

/// Capability to measure a string under a font at a size.
pub trait TextMeasure {
    /// Width of `text` in points when set at `size` points.
    fn text_width(&self, text: &str, size: f32) -> f32;
}

/// A loaded font face.
#[derive(Debug, Clone)]
pub enum FontFace {
    /// A TrueType program embedded into every generated document
    TrueType(TrueTypeFace),
    /// A PDF standard face, referenced by name only
    Standard(StandardFont),
}

impl FontFace {
    /// Load a TrueType face from disk.
    ///
    /// Any failure is reported as [`Error::AssetUnavailable`] for `asset`.
    pub fn from_path<P: AsRef<Path>>(path: P, asset: AssetKind) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| Error::asset(asset, format!("{}: {}", path.display(), e)))?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_bytes(data, &stem, asset)
    }

    /// Parse a TrueType face from memory.
    pub fn from_bytes(data: Vec<u8>, name: &str, asset: AssetKind) -> Result<Self> {
        TrueTypeFace::parse(data, name)
            .map(FontFace::TrueType)
            .map_err(|reason| Error::asset(asset, reason))
    }

    /// Advance width of a WinAnsi code, in 1/1000 em.
    pub fn code_width(&self, code: u8) -> u16 {
        match self {
            FontFace::TrueType(face) => face.code_width(code),
            FontFace::Standard(face) => face.code_width(code),
        }
    }

    /// Name of the face as written into the document.
    pub fn base_font(&self) -> &str {
        match self {
            FontFace::TrueType(face) => face.base_font(),
            FontFace::Standard(face) => face.base_font(),
        }
    }

    /// Add this face to `doc` and return the id of its font dictionary.
    pub fn add_to(&self, doc: &mut Document) -> Result<ObjectId> {
        match self {
            FontFace::TrueType(face) => face.embed(doc),
            FontFace::Standard(face) => Ok(doc.add_object(face.font_dictionary())),
        }
    }
}

impl TextMeasure for FontFace {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = winansi::encode(text)
            .into_iter()
            .map(|code| self.code_width(code) as u32)
            .sum();
        units as f32 * size / 1000.0
    }
}

/// The regular and bold faces of one family.
#[derive(Debug, Clone)]
pub struct FontPair {
    pub regular: FontFace,
    pub bold: FontFace,
}

impl FontPair {
    /// Pair two faces.
    pub fn new(regular: FontFace, bold: FontFace) -> Self {
        Self { regular, bold }
    }

    /// Helvetica and Helvetica-Bold, which need no font files.
    pub fn standard() -> Self {
        Self::new(
            FontFace::Standard(StandardFont::Helvetica),
            FontFace::Standard(StandardFont::HelveticaBold),
        )
    }

    /// Load both faces from TrueType files.
    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(regular: P, bold: Q) -> Result<Self> {
        Ok(Self::new(
            FontFace::from_path(regular, AssetKind::RegularFont)?,
            FontFace::from_path(bold, AssetKind::BoldFont)?,
        ))
    }

    /// The face for a role.
    pub fn face(&self, role: FontRole) -> &FontFace {
        match role {
            FontRole::Regular => &self.regular,
            FontRole::Bold => &self.bold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_text_width() {
        let fonts = FontPair::standard();
        // "Cel" = 722 + 556 + 222 units
        let width = fonts.face(FontRole::Regular).text_width("Cel", 10.0);
        assert!((width - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider() {
        let fonts = FontPair::standard();
        let text = "Atentamente:";
        let regular = fonts.face(FontRole::Regular).text_width(text, 12.0);
        let bold = fonts.face(FontRole::Bold).text_width(text, 12.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_empty_text_has_zero_width() {
        let fonts = FontPair::standard();
        assert_eq!(fonts.face(FontRole::Regular).text_width("", 12.0), 0.0);
    }

    #[test]
    fn test_missing_font_file_is_asset_error() {
        let err = FontPair::from_paths("/nonexistent/Regular.ttf", "/nonexistent/Bold.ttf")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::AssetUnavailable {
                asset: AssetKind::RegularFont,
                ..
            }
        ));
    }

    #[test]
    fn test_corrupt_font_names_its_role() {
        let err = FontFace::from_bytes(vec![0u8; 16], "broken", AssetKind::BoldFont).unwrap_err();
        assert!(matches!(
            err,
            Error::AssetUnavailable {
                asset: AssetKind::BoldFont,
                ..
            }
        ));
    }
}
