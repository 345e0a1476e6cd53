//! Absolute page coordinates of the template's fixed elements.

use crate::options::TemplateOptions;

/// A point in page space (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// An axis-aligned rectangle given by its lower-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` centered on `center`.
    pub fn centered_square(center: Point, size: f32) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Largest rectangle with the aspect ratio of a `width` x `height`
    /// image that fits inside `self`, centered on both axes.
    ///
    /// Degenerate image sizes fall back to the full rectangle.
    pub fn fit(&self, width: f32, height: f32) -> Rect {
        if width <= 0.0 || height <= 0.0 {
            return *self;
        }
        let scale = (self.width / width).min(self.height / height);
        let w = width * scale;
        let h = height * scale;
        Rect::new(
            self.x + (self.width - w) / 2.0,
            self.y + (self.height - h) / 2.0,
            w,
            h,
        )
    }
}

/// Which side of the content box a corner accent sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A corner accent square, centered on a corner of the content box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerSquare {
    pub center: Point,
    pub side: Side,
}

/// Derived coordinates of every fixed element on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,

    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,

    /// Baseline of the title
    pub title_y: f32,
    /// Logo placement box (the image is fitted inside it)
    pub logo: Rect,
    /// Bordered content box
    pub content_box: Rect,

    /// Text column bounds
    pub text_left: f32,
    pub text_right: f32,
    pub text_width: f32,

    /// Baseline of the greeting line
    pub first_baseline: f32,
}

/// Offsets of the fixed elements relative to the margins.
const TITLE_DROP: f32 = 55.0;
const BOX_BELOW_TITLE: f32 = 38.0;
const BOX_ABOVE_BOTTOM: f32 = 40.0;
const BOX_OUTSET: f32 = 5.0;
const TEXT_INSET: f32 = 15.0;
const LOGO_RAISE: f32 = 15.0;
const FIRST_LINE_DROP: f32 = 80.0;

impl PageGeometry {
    /// Compute the layout for `options`.
    pub fn new(options: &TemplateOptions) -> Self {
        let left = options.side_margin;
        let right = options.page_width - options.side_margin;
        let top = options.page_height - options.top_margin;
        let bottom = options.bottom_margin;

        let title_y = top - TITLE_DROP;
        let box_top = title_y - BOX_BELOW_TITLE;
        let box_bottom = bottom + BOX_ABOVE_BOTTOM;
        let content_box = Rect::new(
            left - BOX_OUTSET,
            box_bottom,
            right - left + 2.0 * BOX_OUTSET,
            box_top - box_bottom,
        );

        let logo = Rect::new(
            right - options.logo_width,
            top - options.logo_height + LOGO_RAISE,
            options.logo_width,
            options.logo_height,
        );

        let text_left = left + TEXT_INSET;
        let text_right = right - TEXT_INSET;

        Self {
            width: options.page_width,
            height: options.page_height,
            left,
            right,
            top,
            bottom,
            title_y,
            logo,
            content_box,
            text_left,
            text_right,
            text_width: text_right - text_left,
            first_baseline: box_top - FIRST_LINE_DROP,
        }
    }

    /// The four accent squares in drawing order: top-left, top-right,
    /// bottom-left, bottom-right.
    pub fn corner_squares(&self) -> [CornerSquare; 4] {
        let b = &self.content_box;
        let corner = |x, y, side| CornerSquare {
            center: Point { x, y },
            side,
        };
        [
            corner(b.x, b.top(), Side::Left),
            corner(b.right(), b.top(), Side::Right),
            corner(b.x, b.y, Side::Left),
            corner(b.right(), b.y, Side::Right),
        ]
    }
}
