//! Rendering: the page canvas and the certificate drawing sequence.

mod assembler;
mod canvas;

pub use assembler::{render, ADDRESS_LABEL, EMAIL_LABEL, GREETING, PHONE_LABEL, VALEDICTION};
pub use canvas::{text_string, Canvas, PDF_VERSION};
