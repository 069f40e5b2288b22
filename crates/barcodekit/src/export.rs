//! Image codecs.
//!
//! This module maps an [`ImageFormat`] onto an [`image`] encoder and turns a
//! finished raster into bytes, either in memory or in a file. It is the final
//! stage of the pipeline:
//!
//! ```text
//! Barcode state
//!     ↓ layout
//! Layout (size + push offset)
//!     ↓ draw
//! RasterSurface
//!     ↓ export (this module)
//! Encoded bytes / file
//! ```

use std::{fmt, fs, io::Cursor, path::Path};

use image::{DynamicImage, RgbImage};
use log::{debug, info};
use serde::Deserialize;

use crate::error::{BarcodeError, DrawError};

/// Output formats a drawing can be materialized to.
///
/// [`ImageFormat::Wbmp`] is recognized but has no encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Wbmp,
}

impl ImageFormat {
    /// Infers the format from a file name's extension, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::UnknownFormat`] for any extension other than
    /// `.png`, `.jpg`, `.jpeg` or `.gif`, or when there is no extension.
    ///
    /// # Examples
    ///
    /// ```
    /// # use barcodekit::export::ImageFormat;
    /// assert_eq!(ImageFormat::from_file_name("out.PNG"), Ok(ImageFormat::Png));
    /// assert_eq!(ImageFormat::from_file_name("photo.jpeg"), Ok(ImageFormat::Jpeg));
    /// assert!(ImageFormat::from_file_name("vector.svg").is_err());
    /// ```
    pub fn from_file_name(file_name: &str) -> Result<Self, DrawError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("jpg" | "jpeg") => Ok(Self::Jpeg),
            Some("gif") => Ok(Self::Gif),
            _ => Err(DrawError::UnknownFormat(file_name.to_string())),
        }
    }

    fn codec(self) -> Option<image::ImageFormat> {
        match self {
            Self::Png => Some(image::ImageFormat::Png),
            Self::Jpeg => Some(image::ImageFormat::Jpeg),
            Self::Gif => Some(image::ImageFormat::Gif),
            Self::Wbmp => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Gif => "GIF",
            Self::Wbmp => "WBMP",
        };
        f.write_str(name)
    }
}

/// An encoder bound to one output format.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Encoder {
    format: ImageFormat,
    codec: image::ImageFormat,
}

impl Encoder {
    /// Selects the encoder for `format`.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::NoEncoder`] when the format has no codec, and
    /// [`DrawError::NotImplemented`] when a DPI is requested.
    pub(crate) fn new(format: ImageFormat, dpi: Option<f32>) -> Result<Self, DrawError> {
        let codec = format.codec().ok_or(DrawError::NoEncoder(format))?;

        // TODO: write pHYs/JFIF density once the encoders expose it.
        if dpi.is_some() {
            return Err(DrawError::NotImplemented("DPI"));
        }

        Ok(Self { format, codec })
    }

    pub(crate) fn encode(&self, image: &RgbImage) -> Result<Vec<u8>, BarcodeError> {
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(image.clone()).write_to(&mut Cursor::new(&mut buffer), self.codec)?;
        debug!(format:% = self.format, bytes = buffer.len(); "Encoded image");
        Ok(buffer)
    }

    pub(crate) fn write_file(&self, image: &RgbImage, path: &Path) -> Result<(), BarcodeError> {
        let bytes = self.encode(image)?;
        fs::write(path, bytes)?;
        info!(path:% = path.display(), format:% = self.format; "Image written");
        Ok(())
    }
}
