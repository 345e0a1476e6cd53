//! Read-only assets: the two font faces and the logo.
//!
//! [`Assets::load`] is the single initialization step. It reads and
//! validates every asset up front, so a missing or corrupt file is reported
//! as [`Error::AssetUnavailable`](crate::Error::AssetUnavailable) before any
//! document is generated. A loaded [`Assets`] never changes and can be
//! shared by any number of generation calls.

mod logo;

pub use logo::{ImageEncoding, LogoImage};
pub(crate) use logo::deflate;

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fonts::FontPair;

/// Environment variable overriding the logo path.
pub const ENV_LOGO: &str = "CONSTANCIA_LOGO";
/// Environment variable naming the regular TrueType face.
pub const ENV_FONT_REGULAR: &str = "CONSTANCIA_FONT_REGULAR";
/// Environment variable naming the bold TrueType face.
pub const ENV_FONT_BOLD: &str = "CONSTANCIA_FONT_BOLD";

/// Logo file used when none is configured.
pub const DEFAULT_LOGO: &str = "logo.jpeg";
/// Caladea, a metric-compatible Cambria replacement, as installed by the
/// `fonts-crosextra-caladea` package.
pub const DEFAULT_FONT_DIR: &str = "/usr/share/fonts/truetype/crosextra";
const DEFAULT_REGULAR: &str = "Caladea-Regular.ttf";
const DEFAULT_BOLD: &str = "Caladea-Bold.ttf";

/// Where the font faces come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// Helvetica / Helvetica-Bold, not embedded
    Standard,
    /// Two TrueType files, embedded into every document
    Files { regular: PathBuf, bold: PathBuf },
}

impl FontSource {
    /// The Caladea pair installed under `dir`. Nothing is checked here;
    /// [`Assets::load`] reports a missing face.
    pub fn caladea_in(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        FontSource::Files {
            regular: dir.join(DEFAULT_REGULAR),
            bold: dir.join(DEFAULT_BOLD),
        }
    }

    /// The Caladea pair in [`DEFAULT_FONT_DIR`].
    pub fn caladea() -> Self {
        Self::caladea_in(DEFAULT_FONT_DIR)
    }
}

/// Asset locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Raster logo (JPEG or PNG)
    pub logo: PathBuf,
    /// Font faces
    pub fonts: FontSource,
}

impl AssetConfig {
    /// Configuration with an explicit logo and the Caladea faces.
    pub fn new(logo: impl Into<PathBuf>) -> Self {
        Self {
            logo: logo.into(),
            fonts: FontSource::caladea(),
        }
    }

    /// Defaults overridden by `CONSTANCIA_LOGO`, `CONSTANCIA_FONT_REGULAR`
    /// and `CONSTANCIA_FONT_BOLD`.
    ///
    /// An unset font variable keeps the Caladea face for that role.
    pub fn from_env() -> Self {
        let logo = env::var_os(ENV_LOGO)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGO));
        Self {
            logo,
            fonts: fonts_from_vars(env::var_os(ENV_FONT_REGULAR), env::var_os(ENV_FONT_BOLD)),
        }
    }

    /// Use TrueType files for both faces.
    pub fn with_font_files(
        mut self,
        regular: impl Into<PathBuf>,
        bold: impl Into<PathBuf>,
    ) -> Self {
        self.fonts = FontSource::Files {
            regular: regular.into(),
            bold: bold.into(),
        };
        self
    }

    /// Use the non-embedded standard faces instead of font files.
    pub fn with_standard_fonts(mut self) -> Self {
        self.fonts = FontSource::Standard;
        self
    }

    /// Set the logo path.
    pub fn with_logo(mut self, logo: impl Into<PathBuf>) -> Self {
        self.logo = logo.into();
        self
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOGO)
    }
}

fn fonts_from_vars(regular: Option<OsString>, bold: Option<OsString>) -> FontSource {
    let dir = Path::new(DEFAULT_FONT_DIR);
    FontSource::Files {
        regular: regular.map_or_else(|| dir.join(DEFAULT_REGULAR), PathBuf::from),
        bold: bold.map_or_else(|| dir.join(DEFAULT_BOLD), PathBuf::from),
    }
}

/// Loaded fonts and logo.
#[derive(Debug, Clone)]
pub struct Assets {
    pub fonts: FontPair,
    pub logo: LogoImage,
}

impl Assets {
    /// Bundle already-loaded assets.
    pub fn new(fonts: FontPair, logo: LogoImage) -> Self {
        Self { fonts, logo }
    }

    /// Load every asset named by `config`.
    pub fn load(config: &AssetConfig) -> Result<Self> {
        let fonts = match &config.fonts {
            FontSource::Standard => FontPair::standard(),
            FontSource::Files { regular, bold } => FontPair::from_paths(regular, bold)?,
        };
        let logo = LogoImage::from_path(&config.logo)?;
        log::debug!(
            "loaded assets: fonts {} / {}, logo {}",
            fonts.regular.base_font(),
            fonts.bold.base_font(),
            config.logo.display()
        );
        Ok(Self { fonts, logo })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AssetKind, Error};

    #[test]
    fn test_asset_config_builder() {
        let config = AssetConfig::new("logo.png").with_font_files("r.ttf", "b.ttf");
        assert_eq!(config.logo, PathBuf::from("logo.png"));
        assert_eq!(
            config.fonts,
            FontSource::Files {
                regular: "r.ttf".into(),
                bold: "b.ttf".into()
            }
        );
        assert_eq!(config.with_standard_fonts().fonts, FontSource::Standard);
    }

    #[test]
    fn test_missing_logo_fails_load() {
        let config = AssetConfig::new("/nonexistent/logo.jpeg").with_standard_fonts();
        let err = Assets::load(&config).unwrap_err();
        assert!(matches!(
            err,
            Error::AssetUnavailable {
                asset: AssetKind::Logo,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_font_checked_before_logo() {
        let config = AssetConfig::new("/nonexistent/logo.jpeg")
            .with_font_files("/nonexistent/r.ttf", "/nonexistent/b.ttf");
        let err = Assets::load(&config).unwrap_err();
        assert!(matches!(
            err,
            Error::AssetUnavailable {
                asset: AssetKind::RegularFont,
                ..
            }
        ));
    }

    #[test]
    fn test_defaults_name_caladea_files() {
        let config = AssetConfig::default();
        assert_eq!(config.logo, PathBuf::from(DEFAULT_LOGO));
        assert_eq!(config.fonts, FontSource::caladea());
        assert_eq!(AssetConfig::new("logo.png").fonts, FontSource::caladea());
    }

    #[test]
    fn test_missing_default_fonts_fail_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = AssetConfig {
            logo: "/nonexistent/logo.jpeg".into(),
            fonts: FontSource::caladea_in(dir.path()),
        };
        let err = Assets::load(&config).unwrap_err();
        assert!(matches!(
            err,
            Error::AssetUnavailable {
                asset: AssetKind::RegularFont,
                ..
            }
        ));
    }

    #[test]
    fn test_font_variables_override_one_role() {
        let fonts = fonts_from_vars(None, Some("/fonts/Bold.ttf".into()));
        assert_eq!(
            fonts,
            FontSource::Files {
                regular: Path::new(DEFAULT_FONT_DIR).join(DEFAULT_REGULAR),
                bold: "/fonts/Bold.ttf".into(),
            }
        );
        assert_eq!(fonts_from_vars(None, None), FontSource::caladea());
    }

    #[test]
    fn test_assets_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Assets>();
    }
}
