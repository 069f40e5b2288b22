//! Barcodekit CLI library
//!
//! This module contains the core CLI logic for the barcodekit tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, LabelAlign, LabelSide, OutputFormat};
pub use error_adapter::ErrorAdapter;

use log::{info, warn};

use barcodekit::{
    Barcode, BarcodeError, Drawing,
    symbology::{Bars, ModuleMatrix},
};

/// Run the barcodekit CLI application
///
/// Parses the module data, lays out the symbol with its optional label and
/// writes the image to the output path. When the data cannot be parsed, an
/// image showing the error is written instead and the parse error is
/// returned.
///
/// # Errors
///
/// Returns `BarcodeError` for:
/// - Configuration loading errors
/// - Invalid scale, offset, color or rotation values
/// - Unparseable module data (after writing the error image)
/// - Unknown output format, encoding or I/O errors
pub fn run(args: &Args) -> Result<(), BarcodeError> {
    info!(output_path = args.output, matrix = args.matrix; "Processing barcode");

    let app_config = config::load_config(args.config.as_ref())?;

    let mut barcode: Box<dyn Barcode> = if args.matrix {
        Box::new(ModuleMatrix::new())
    } else {
        Box::new(Bars::new())
    };

    app_config.apply_to(barcode.base_mut())?;
    if let Some(scale) = args.scale {
        barcode.base_mut().set_scale(scale)?;
    }

    if let Some(text) = &args.label {
        let mut label = app_config.text_label(text);
        label.set_position(args.label_position.into());
        label.set_alignment(args.label_alignment.into());
        barcode.base_mut().add_label(label);
    }

    let parsed = barcode.parse(&args.data);

    let mut drawing = Drawing::new(Some(barcode.as_mut()));
    app_config.apply_to_drawing(&mut drawing)?;
    if let Err(err) = &parsed {
        warn!(err:%; "Rendering parse error instead of barcode");
        drawing.draw_exception(err.clone());
    }

    match args.format {
        Some(format) => drawing.save_as(&args.output, format.into())?,
        None => drawing.save(&args.output)?,
    }
    parsed?;

    info!(output_file = args.output; "Image exported successfully");

    Ok(())
}
