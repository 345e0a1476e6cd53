//! Page geometry and paragraph layout.
//!
//! Everything here is a pure function of the template options and, for
//! wrapping, of a [`TextMeasure`](crate::fonts::TextMeasure). Nothing in
//! this module touches the output document.

mod cursor;
mod geometry;
mod wrap;

pub use cursor::Cursor;
pub use geometry::{CornerSquare, PageGeometry, Point, Rect, Side};
pub use wrap::{wrap_words, WrappedLines};
