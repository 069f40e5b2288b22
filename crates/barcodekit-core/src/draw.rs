//! Raster drawing building blocks.
//!
//! - [`Surface`] / [`RasterSurface`] - the pixel canvas every primitive paints on
//! - [`TextStyle`] - font selection used to measure and rasterize text
//! - [`Label`] / [`TextLabel`] - human-readable text attached to one side of a symbol

mod label;
mod surface;
mod text;

pub use label::{Alignment, Label, Position, TextLabel};
pub use surface::{RasterSurface, Surface};
pub use text::TextStyle;
