//! Error adapter for converting BarcodeError to miette diagnostics.
//!
//! This module provides the bridge between the library's error types and
//! miette's report formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use barcodekit::{BarcodeError, DrawError};

/// Adapter that lets miette render a [`BarcodeError`].
pub struct ErrorAdapter<'a>(pub &'a BarcodeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code: Box<dyn fmt::Display + 'a> = match &self.0 {
            BarcodeError::Argument(err) => Box::new(format!("barcodekit::argument::{}", err.param())),
            BarcodeError::Parse(err) => Box::new(format!("barcodekit::parse::{}", err.barcode())),
            BarcodeError::Draw(_) => Box::new("barcodekit::draw"),
            BarcodeError::Io(_) => Box::new("barcodekit::io"),
            BarcodeError::Encode(_) => Box::new("barcodekit::encode"),
            BarcodeError::Config(_) => Box::new("barcodekit::config"),
        };
        Some(code)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            BarcodeError::Parse(_) => "an image showing this error was still written to the output path",
            BarcodeError::Draw(DrawError::UnknownFormat(_)) => "pass --format png, jpeg or gif",
            BarcodeError::Draw(DrawError::NotImplemented(_)) => "remove `dpi` from the [render] section",
            BarcodeError::Draw(DrawError::TooLarge) => "lower --scale or the [render] offsets",
            _ => return None,
        };
        Some(Box::new(help) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use barcodekit::{ArgumentError, ParseError};

    use super::*;

    #[test]
    fn test_argument_code_names_param() {
        let err = BarcodeError::from(ArgumentError::new("scaleX", "The scaleX must be larger than 0."));
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "barcodekit::argument::scaleX");
        assert!(adapter.help().is_none());
        assert_eq!(adapter.to_string(), "The scaleX must be larger than 0.");
    }

    #[test]
    fn test_parse_error_has_help() {
        let err = BarcodeError::from(ParseError::new("bars", "bad"));
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "barcodekit::parse::bars");
        assert!(adapter.help().is_some());
    }

    #[test]
    fn test_unknown_format_help() {
        let err = BarcodeError::from(DrawError::UnknownFormat("a.bmp".to_string()));
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "barcodekit::draw");
        assert!(adapter.help().unwrap().to_string().contains("--format"));
    }

    #[test]
    fn test_report_renders() {
        let err = BarcodeError::Config("boom".to_string());
        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &ErrorAdapter(&err))
            .unwrap();
        assert!(out.contains("boom"));
    }
}
