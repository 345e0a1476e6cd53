//! Document model types for certificate content.
//!
//! This module holds the user-supplied field record and the fixed style
//! tokens (palette and font roles) the template draws with.

mod fields;
mod style;

pub use fields::{long_date, DocumentFields};
pub use style::{Color, FontRole, StyleTokens};
