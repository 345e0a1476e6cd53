//! # constancia
//!
//! Fixed-layout certificate ("constancia") PDF generator.
//!
//! A certificate is a single US Letter page: a logo, a title, a bordered
//! content box with colored corner accents, word-wrapped body text, a
//! signature block and a contact block. The layout is hardcoded; only the
//! text fields change between documents.
//!
//! ## Quick Start
//!
//! ```no_run
//! use constancia::{AssetConfig, Assets, DocumentFields};
//!
//! fn main() -> constancia::Result<()> {
//!     // Fonts and logo are loaded once and reused
//!     let assets = Assets::load(&AssetConfig::from_env())?;
//!
//!     let fields = DocumentFields::new(
//!         "Constancia de participación",
//!         "Por medio de la presente se hace constar que Ana López participó en el taller.",
//!     )
//!     .with_city("Monterrey")
//!     .with_date("los 5 días del mes de marzo del 2024")
//!     .with_signer("Juan Pérez", "Coordinador", "Concertinos");
//!
//!     constancia::generate_to_file(&fields, &assets, "constancia.pdf")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Deterministic output**: identical fields and assets give identical bytes
//! - **Embedded fonts**: TrueType faces embedded with WinAnsi encoding,
//!   or the non-embedded PDF standard faces when explicitly chosen
//! - **JPEG and PNG logos**: aspect-preserving placement, alpha as soft mask
//! - **Inspection**: decode a generated page back into its drawn elements

pub mod assets;
pub mod error;
pub mod fonts;
pub mod inspect;
pub mod layout;
pub mod model;
pub mod options;
pub mod render;

// Re-export commonly used types
pub use assets::{AssetConfig, Assets, FontSource, LogoImage};
pub use error::{AssetKind, Error, Result};
pub use fonts::{FontFace, FontPair, TextMeasure};
pub use inspect::{DocumentInfo, Inspection};
pub use layout::{wrap_words, Cursor, PageGeometry, Rect};
pub use model::{long_date, Color, DocumentFields, FontRole, StyleTokens};
pub use options::TemplateOptions;

use std::fs;
use std::path::Path;

/// Render a certificate with the default template.
///
/// # Arguments
///
/// * `fields` - Text content of the certificate
/// * `assets` - Loaded fonts and logo
///
/// # Returns
///
/// The complete PDF document as bytes.
///
/// # Example
///
/// ```no_run
/// use constancia::{generate, AssetConfig, Assets, DocumentFields};
///
/// let assets = Assets::load(&AssetConfig::new("logo.png")).unwrap();
/// let fields = DocumentFields::new("Constancia", "Texto de la constancia.");
/// let pdf = generate(&fields, &assets).unwrap();
/// assert!(pdf.starts_with(b"%PDF-"));
/// ```
pub fn generate(fields: &DocumentFields, assets: &Assets) -> Result<Vec<u8>> {
    generate_with_options(fields, assets, &TemplateOptions::default())
}

/// Render a certificate with custom template options.
pub fn generate_with_options(
    fields: &DocumentFields,
    assets: &Assets,
    options: &TemplateOptions,
) -> Result<Vec<u8>> {
    render::render(fields, assets, options)
}

/// Render a certificate and write it to `path`.
///
/// The file is only created once rendering has succeeded, so a failure
/// never leaves a truncated document behind.
///
/// # Example
///
/// ```no_run
/// use constancia::{generate_to_file, AssetConfig, Assets, DocumentFields};
///
/// let assets = Assets::load(&AssetConfig::from_env()).unwrap();
/// let fields = DocumentFields::new("Constancia", "Texto.");
/// generate_to_file(&fields, &assets, "constancia.pdf").unwrap();
/// ```
pub fn generate_to_file<P: AsRef<Path>>(
    fields: &DocumentFields,
    assets: &Assets,
    path: P,
) -> Result<()> {
    let bytes = generate(fields, assets)?;
    write_output(path.as_ref(), &bytes)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Builder for repeated certificate generation.
///
/// # Example
///
/// ```no_run
/// use constancia::{Constancia, DocumentFields};
///
/// let generator = Constancia::new()
///     .with_logo("logo.jpeg")
///     .with_leading(16.0)
///     .load()
///     .unwrap();
///
/// let fields = DocumentFields::new("Constancia", "Texto.");
/// let pdf = generator.generate(&fields).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Constancia {
    assets: AssetConfig,
    options: TemplateOptions,
}

impl Constancia {
    /// Create a builder with asset locations taken from the environment.
    pub fn new() -> Self {
        Self {
            assets: AssetConfig::from_env(),
            options: TemplateOptions::default(),
        }
    }

    /// Replace the asset configuration.
    pub fn with_assets(mut self, assets: AssetConfig) -> Self {
        self.assets = assets;
        self
    }

    /// Set the logo path.
    pub fn with_logo(mut self, logo: impl Into<std::path::PathBuf>) -> Self {
        self.assets = self.assets.with_logo(logo);
        self
    }

    /// Embed TrueType files for the regular and bold faces.
    pub fn with_font_files(
        mut self,
        regular: impl Into<std::path::PathBuf>,
        bold: impl Into<std::path::PathBuf>,
    ) -> Self {
        self.assets = self.assets.with_font_files(regular, bold);
        self
    }

    /// Use the standard PDF faces.
    pub fn with_standard_fonts(mut self) -> Self {
        self.assets = self.assets.with_standard_fonts();
        self
    }

    /// Replace the template options.
    pub fn with_options(mut self, options: TemplateOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the body line leading.
    pub fn with_leading(mut self, leading: f32) -> Self {
        self.options = self.options.with_leading(leading);
        self
    }

    /// Load the configured assets.
    pub fn load(self) -> Result<Generator> {
        let assets = Assets::load(&self.assets)?;
        Ok(Generator {
            assets,
            options: self.options,
        })
    }
}

/// Loaded assets plus template options, ready to render any number of
/// certificates.
#[derive(Debug, Clone)]
pub struct Generator {
    assets: Assets,
    options: TemplateOptions,
}

impl Generator {
    /// Bundle already-loaded assets with template options.
    pub fn new(assets: Assets, options: TemplateOptions) -> Self {
        Self { assets, options }
    }

    /// Render a certificate.
    pub fn generate(&self, fields: &DocumentFields) -> Result<Vec<u8>> {
        generate_with_options(fields, &self.assets, &self.options)
    }

    /// Render a certificate and write it to `path`.
    pub fn generate_to_file<P: AsRef<Path>>(
        &self,
        fields: &DocumentFields,
        path: P,
    ) -> Result<()> {
        let bytes = self.generate(fields)?;
        write_output(path.as_ref(), &bytes)
    }

    /// The loaded assets.
    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    /// The template options.
    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }
}
