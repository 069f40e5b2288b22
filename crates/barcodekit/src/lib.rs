//! Barcodekit - layout and raster drawing for barcode symbols.
//!
//! A symbology describes its modules and implements [`Barcode`]; this crate
//! takes care of everything around them. It sizes the canvas for the symbol
//! and its labels, maps module coordinates to pixels under scale and offset,
//! and encodes the result as PNG, JPEG or GIF.
//!
//! # Examples
//!
//! ```rust,no_run
//! use barcodekit::{Barcode, Drawing, draw::TextLabel, symbology::Bars};
//!
//! let mut bars = Bars::new();
//! bars.parse("11010010000").expect("valid modules");
//! bars.base_mut().set_scale(2).expect("positive scale");
//! bars.base_mut().add_label(TextLabel::new("A-1"));
//!
//! let mut drawing = Drawing::new(Some(&mut bars));
//! drawing.save("bars.png").expect("written");
//! ```

pub mod barcode;
pub mod config;
pub mod drawing;
pub mod error;
pub mod export;
pub mod layout;
pub mod painter;
pub mod symbology;

pub use barcodekit_core::{color, draw, geometry};

pub use barcode::{Barcode, BarcodeBase, LabelId};
pub use drawing::{Drawing, PendingSave};
pub use error::{ArgumentError, BarcodeError, DrawError, ParseError};
pub use export::ImageFormat;
pub use painter::{ColorSelector, Painter};
