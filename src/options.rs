//! Template configuration.
//!
//! Every measurement of the certificate layout lives here, in PDF points.
//! A `TemplateOptions` is built once and passed by reference to layout and
//! rendering; nothing reads layout constants from global state.

use crate::model::StyleTokens;

/// US Letter width in points.
pub const LETTER_WIDTH: f32 = 612.0;
/// US Letter height in points.
pub const LETTER_HEIGHT: f32 = 792.0;

/// Fixed measurements and palette of the certificate template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateOptions {
    /// Page width
    pub page_width: f32,
    /// Page height
    pub page_height: f32,
    /// Left and right page margin
    pub side_margin: f32,
    /// Distance from the page top to the top margin line
    pub top_margin: f32,
    /// Distance from the page bottom to the bottom margin line
    pub bottom_margin: f32,

    /// Logo box width and height, anchored to the top-right margin
    pub logo_width: f32,
    pub logo_height: f32,

    /// Title font size
    pub title_size: f32,
    /// Body and signer font size
    pub body_size: f32,
    /// Contact block font size
    pub contact_size: f32,

    /// Vertical distance between wrapped lines
    pub leading: f32,
    /// Space before each body paragraph and the closing sentence
    pub paragraph_gap: f32,
    /// Space before "Atentamente:"
    pub closing_gap: f32,
    /// Space between "Atentamente:" and the signature line
    pub signature_gap: f32,
    /// Space between the signature line and the signer name
    pub signer_gap: f32,
    /// Line step inside the signer block
    pub signer_step: f32,
    /// Space between the organization and the contact block
    pub contact_gap: f32,
    /// Line step inside the contact block
    pub contact_step: f32,

    /// Signature line length relative to the text column width
    pub signature_ratio: f32,
    /// Side of each corner accent square
    pub corner_size: f32,
    /// Stroke width of the content box and signature line
    pub rule_width: f32,
    /// Stroke width of the email underline
    pub underline_width: f32,
    /// Distance of the email underline below the baseline
    pub underline_offset: f32,

    /// Palette
    pub style: StyleTokens,
}

impl TemplateOptions {
    /// Create options with the template defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leading used by the paragraph wrapper.
    pub fn with_leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    /// Set the palette.
    pub fn with_style(mut self, style: StyleTokens) -> Self {
        self.style = style;
        self
    }
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            page_width: LETTER_WIDTH,
            page_height: LETTER_HEIGHT,
            side_margin: 60.0,
            top_margin: 45.0,
            bottom_margin: 45.0,
            logo_width: 150.0,
            logo_height: 90.0,
            title_size: 18.0,
            body_size: 12.0,
            contact_size: 11.0,
            leading: 16.0,
            paragraph_gap: 6.0,
            closing_gap: 35.0,
            signature_gap: 65.0,
            signer_gap: 18.0,
            signer_step: 16.0,
            contact_gap: 22.0,
            contact_step: 16.0,
            signature_ratio: 0.6,
            corner_size: 14.0,
            rule_width: 0.75,
            underline_width: 0.5,
            underline_offset: 1.5,
            style: StyleTokens::default(),
        }
    }
}
