//! Palette and font roles.

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Build a color from a 24-bit `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Components as an array, in content-stream operand order.
    pub fn components(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Which of the two font faces to draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontRole {
    #[default]
    Regular,
    Bold,
}

impl FontRole {
    /// Resource name used in the page's font dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontRole::Regular => "F1",
            FontRole::Bold => "F2",
        }
    }
}

/// The fixed palette of the template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleTokens {
    /// Left-side corner squares
    pub teal: Color,
    /// Right-side corner squares
    pub pink: Color,
    /// Text, signature line
    pub dark: Color,
    /// Email address and its underline
    pub link: Color,
    /// Content-box border
    pub border: Color,
}

impl Default for StyleTokens {
    fn default() -> Self {
        Self {
            teal: Color::from_hex(0x2ABFBF),
            pink: Color::from_hex(0xE84393),
            dark: Color::from_hex(0x2D3436),
            link: Color::from_hex(0x0000EE),
            border: Color::from_hex(0xCCCCCC),
        }
    }
}
