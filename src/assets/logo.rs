//! Logo image decoding and embedding.

use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::{ColorType, DynamicImage, ImageFormat};
use lopdf::{dictionary, Dictionary, Document, ObjectId, Stream};

use crate::error::{AssetKind, Error, Result};

/// How the pixel data of a [`LogoImage`] is stored in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    /// Original JPEG bytes, written with `/DCTDecode`
    Jpeg,
    /// Decoded samples compressed with `/FlateDecode`
    Flate,
}

/// A decoded raster logo, ready to be embedded as an image XObject.
#[derive(Debug, Clone)]
pub struct LogoImage {
    width: u32,
    height: u32,
    color_space: &'static str,
    encoding: ImageEncoding,
    data: Vec<u8>,
    /// Flate-compressed 8-bit alpha channel, if the source had one
    alpha: Option<Vec<u8>>,
}

impl LogoImage {
    /// Read and decode a logo from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| Error::asset(AssetKind::Logo, format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(&bytes)
            .map_err(|e| Error::asset(AssetKind::Logo, format!("{}: {}", path.display(), e)))
    }

    /// Decode a logo from encoded image bytes (JPEG, PNG).
    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, String> {
        let format = image::guess_format(bytes).map_err(|e| e.to_string())?;
        let decoded =
            image::load_from_memory_with_format(bytes, format).map_err(|e| e.to_string())?;

        let logo = match (format, decoded.color()) {
            (ImageFormat::Jpeg, ColorType::L8) => Self::passthrough(&decoded, "DeviceGray", bytes),
            (ImageFormat::Jpeg, ColorType::Rgb8) => Self::passthrough(&decoded, "DeviceRGB", bytes),
            _ => Self::flate(&decoded).map_err(|e| e.to_string())?,
        };

        log::debug!(
            "decoded logo {:?} {}x{} as {:?}{}",
            format,
            logo.width,
            logo.height,
            logo.encoding,
            if logo.alpha.is_some() { " with alpha" } else { "" }
        );
        Ok(logo)
    }

    fn passthrough(decoded: &DynamicImage, color_space: &'static str, bytes: &[u8]) -> Self {
        Self {
            width: decoded.width(),
            height: decoded.height(),
            color_space,
            encoding: ImageEncoding::Jpeg,
            data: bytes.to_vec(),
            alpha: None,
        }
    }

    fn flate(decoded: &DynamicImage) -> std::io::Result<Self> {
        let rgba = decoded.to_rgba8();
        let has_alpha = decoded.color().has_alpha() && rgba.pixels().any(|p| p.0[3] != u8::MAX);

        let rgb: Vec<u8> = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
        let alpha = if has_alpha {
            let channel: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
            Some(deflate(&channel)?)
        } else {
            None
        };

        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            color_space: "DeviceRGB",
            encoding: ImageEncoding::Flate,
            data: deflate(&rgb)?,
            alpha,
        })
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Storage encoding chosen for the document.
    pub fn encoding(&self) -> ImageEncoding {
        self.encoding
    }

    /// Whether a soft mask is written alongside the image.
    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Add the image (and its soft mask) to `doc`, returning the XObject id.
    pub fn add_to(&self, doc: &mut Document) -> ObjectId {
        let mut dict = self.image_dictionary(self.color_space);
        dict.set(
            "Filter",
            match self.encoding {
                ImageEncoding::Jpeg => "DCTDecode",
                ImageEncoding::Flate => "FlateDecode",
            },
        );

        if let Some(alpha) = &self.alpha {
            let mut mask = self.image_dictionary("DeviceGray");
            mask.set("Filter", "FlateDecode");
            let mask_id = doc.add_object(Stream::new(mask, alpha.clone()));
            dict.set("SMask", mask_id);
        }

        doc.add_object(Stream::new(dict, self.data.clone()))
    }

    fn image_dictionary(&self, color_space: &str) -> Dictionary {
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8i64,
        }
    }
}

pub(crate) fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
