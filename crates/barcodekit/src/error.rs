//! Error types for barcodekit operations.
//!
//! - [`ArgumentError`] - a setter received an out-of-range value; names the parameter
//! - [`ParseError`] - a symbology rejected its input text
//! - [`DrawError`] - rendering or output could not proceed
//! - [`BarcodeError`] - the umbrella type returned by drawing and saving

use std::io;

use thiserror::Error;

use crate::export::ImageFormat;

/// An invalid value passed to a validated setter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ArgumentError {
    param: &'static str,
    message: String,
}

impl ArgumentError {
    pub fn new(param: &'static str, message: impl Into<String>) -> Self {
        Self {
            param,
            message: message.into(),
        }
    }

    /// The name of the offending parameter, e.g. `"scale"` or `"offsetX"`.
    pub fn param(&self) -> &'static str {
        self.param
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Input text that a symbology cannot encode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    barcode: String,
    message: String,
}

impl ParseError {
    pub fn new(barcode: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            barcode: barcode.into(),
            message: message.into(),
        }
    }

    /// Name of the symbology that raised the error.
    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failures detected while preparing a render or its output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("There are no encoders for the {0} format.")]
    NoEncoder(ImageFormat),

    #[error("The format cannot be found based on the file name `{0}`, specify a format.")]
    UnknownFormat(String),

    #[error("{0} is not yet implemented.")]
    NotImplemented(&'static str),

    #[error("The barcode does not fit in a drawable surface, lower the scale or the offsets.")]
    TooLarge,
}

/// The main error type for barcodekit operations.
#[derive(Debug, Error)]
pub enum BarcodeError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_error_names_param() {
        let err = ArgumentError::new("scale", "The scale must be larger than 0.");
        assert_eq!(err.param(), "scale");
        assert_eq!(err.to_string(), "The scale must be larger than 0.");
    }

    #[test]
    fn test_parse_error_keeps_barcode_name() {
        let err = ParseError::new("bars", "Only 0 and 1 are allowed.");
        assert_eq!(err.barcode(), "bars");
        assert_eq!(err.to_string(), "Only 0 and 1 are allowed.");
    }

    #[test]
    fn test_barcode_error_is_transparent_for_domain_errors() {
        let err = BarcodeError::from(ParseError::new("bars", "bad input"));
        assert_eq!(err.to_string(), "bad input");

        let err = BarcodeError::from(DrawError::NotImplemented("DPI"));
        assert_eq!(err.to_string(), "DPI is not yet implemented.");
    }
}
