//! Error types for constancia library.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for constancia operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The read-only assets a document depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Raster logo drawn in the top-right corner.
    Logo,
    /// Regular-weight font face.
    RegularFont,
    /// Bold-weight font face.
    BoldFont,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Logo => write!(f, "logo image"),
            AssetKind::RegularFont => write!(f, "regular font"),
            AssetKind::BoldFont => write!(f, "bold font"),
        }
    }
}

/// Error types that can occur while generating a document.
#[derive(Error, Debug)]
pub enum Error {
    /// A font or logo asset is missing or cannot be decoded.
    #[error("Asset unavailable ({asset}): {reason}")]
    AssetUnavailable {
        /// Which asset failed
        asset: AssetKind,
        /// Underlying cause
        reason: String,
    },

    /// I/O error when writing output files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error building or serializing the PDF structure.
    #[error("PDF writing error: {0}")]
    Pdf(String),

    /// A serialized field record could not be read.
    #[error("Invalid fields document: {0}")]
    Fields(String),
}

impl Error {
    /// Build an [`Error::AssetUnavailable`] for the given asset.
    pub fn asset(asset: AssetKind, reason: impl fmt::Display) -> Self {
        Error::AssetUnavailable {
            asset,
            reason: reason.to_string(),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Fields(err.to_string())
    }
}
