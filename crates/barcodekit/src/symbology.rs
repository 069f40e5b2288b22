//! Raw-module symbologies.
//!
//! These take module data verbatim instead of encoding text, which makes them
//! useful for demos and for exercising the layout and drawing pipeline.
//!
//! - [`Bars`] - a linear symbol from a string of `'1'` (bar) and `'0'` (space).
//! - [`ModuleMatrix`] - a matrix symbol from `';'`-separated rows of modules.

mod bars;
mod matrix;

pub use bars::Bars;
pub use matrix::ModuleMatrix;

use crate::error::ParseError;

/// Maps a module character to dark (`true`) or light (`false`).
fn module(barcode: &'static str, index: usize, ch: char) -> Result<bool, ParseError> {
    match ch {
        '1' => Ok(true),
        '0' => Ok(false),
        other => Err(ParseError::new(
            barcode,
            format!("The character '{other}' at position {index} is not allowed, only '0' and '1' are."),
        )),
    }
}
