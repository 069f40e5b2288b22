//! Drawing orchestration.
//!
//! A [`Drawing`] owns the output surface for one barcode. It sizes the
//! surface from the barcode's layout, fills the background, lets the barcode
//! paint itself, and hands the result to an encoder. When no barcode is
//! attached, or an error was registered with [`Drawing::draw_exception`], it
//! renders the error message as text instead so there is always an image.
//! The rotation angle only turns that message text; barcodes are never
//! rotated.

use std::{
    io,
    path::{Path, PathBuf},
    thread::{self, JoinHandle},
};

use log::{debug, info};

use barcodekit_core::{
    color::Color,
    draw::{RasterSurface, Surface, TextStyle},
    geometry::Size,
};

use crate::{
    barcode::Barcode,
    error::{ArgumentError, BarcodeError},
    export::{Encoder, ImageFormat},
};

/// Text of the fallback image when no barcode is attached.
pub const NO_BARCODE_MESSAGE: &str = "No barcode available";

/// Renders a barcode to an image.
pub struct Drawing<'b> {
    barcode: Option<&'b mut dyn Barcode>,
    background: Color,
    dpi: Option<f32>,
    rotation: f32,
    exception: Option<BarcodeError>,
    surface: Option<RasterSurface>,
}

impl<'b> Drawing<'b> {
    /// Creates a drawing with a white background.
    pub fn new(barcode: Option<&'b mut dyn Barcode>) -> Self {
        Self::with_background(barcode, Color::white())
    }

    pub fn with_background(barcode: Option<&'b mut dyn Barcode>, background: Color) -> Self {
        Self {
            barcode,
            background,
            dpi: None,
            rotation: 0.0,
            exception: None,
            surface: None,
        }
    }

    pub fn barcode(&self) -> Option<&dyn Barcode> {
        self.barcode.as_deref()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// The most recently rendered surface, if any.
    pub fn surface(&self) -> Option<&RasterSurface> {
        self.surface.as_ref()
    }

    pub fn dpi(&self) -> Option<f32> {
        self.dpi
    }

    /// Requests a DPI for the encoded image. Any value other than `None` makes
    /// materialization fail, since DPI metadata is not written.
    pub fn set_dpi(&mut self, dpi: Option<f32>) {
        self.dpi = dpi;
    }

    /// Clockwise rotation in degrees.
    pub fn rotation_angle(&self) -> f32 {
        self.rotation
    }

    /// Sets the clockwise rotation of the fallback message text.
    ///
    /// Any finite angle is accepted. The text turns about the center of its
    /// box, which keeps the size of the unrotated message.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] naming `"rotationAngle"` for NaN or an
    /// infinite angle.
    pub fn set_rotation_angle(&mut self, degrees: f32) -> Result<(), ArgumentError> {
        if !degrees.is_finite() {
            return Err(ArgumentError::new(
                "rotationAngle",
                "The rotation angle must be a finite number.",
            ));
        }
        self.rotation = degrees;
        Ok(())
    }

    /// Registers an error to render instead of the barcode.
    pub fn draw_exception(&mut self, error: impl Into<BarcodeError>) {
        self.exception = Some(error.into());
    }

    pub fn exception(&self) -> Option<&BarcodeError> {
        self.exception.as_ref()
    }

    /// Renders into a fresh surface and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::TooLarge`](crate::error::DrawError::TooLarge) when
    /// the barcode's layout cannot be drawn. The fallback path never fails.
    pub fn render(&mut self) -> Result<&RasterSurface, BarcodeError> {
        let background = self.background.to_rgb8();
        let rotation = self.rotation;
        let surface = match (&self.exception, self.barcode.as_deref_mut()) {
            (None, Some(barcode)) => render_barcode(barcode, background)?,
            (exception, _) => {
                let message = exception
                    .as_ref()
                    .map_or_else(|| NO_BARCODE_MESSAGE.to_string(), ToString::to_string);
                render_message(&message, rotation, background)
            }
        };

        Ok(self.surface.insert(surface))
    }

    /// Renders and encodes to an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Fails before rendering when `format` has no encoder or a DPI is set,
    /// and afterwards if encoding fails.
    pub fn to_buffer(&mut self, format: ImageFormat) -> Result<Vec<u8>, BarcodeError> {
        let encoder = Encoder::new(format, self.dpi)?;
        let surface = self.render()?;
        encoder.encode(surface.image())
    }

    /// Renders and writes to `path`, inferring the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::UnknownFormat`](crate::error::DrawError::UnknownFormat)
    /// for an unrecognized extension, plus everything [`Drawing::save_as`]
    /// can return.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), BarcodeError> {
        let path = path.as_ref();
        let format = format_for(path)?;
        self.save_as(path, format)
    }

    /// Renders and writes to `path` in `format`.
    pub fn save_as(&mut self, path: impl AsRef<Path>, format: ImageFormat) -> Result<(), BarcodeError> {
        let encoder = Encoder::new(format, self.dpi)?;
        let surface = self.render()?;
        encoder.write_file(surface.image(), path.as_ref())
    }

    /// Renders now, then encodes and writes on a background thread.
    ///
    /// The format is inferred from the file name when `format` is `None`.
    /// Errors in format selection are returned immediately; encoding and I/O
    /// errors come from [`PendingSave::wait`].
    pub fn spawn_save(
        &mut self,
        path: impl Into<PathBuf>,
        format: Option<ImageFormat>,
    ) -> Result<PendingSave, BarcodeError> {
        let path = path.into();
        let format = match format {
            Some(format) => format,
            None => format_for(&path)?,
        };
        let encoder = Encoder::new(format, self.dpi)?;
        let image = self.render()?.image().clone();

        debug!(path:% = path.display(); "Spawning save");
        let handle = thread::spawn(move || encoder.write_file(&image, &path));
        Ok(PendingSave { handle })
    }
}

/// A save running on a background thread.
#[derive(Debug)]
pub struct PendingSave {
    handle: JoinHandle<Result<(), BarcodeError>>,
}

impl PendingSave {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the file is written.
    pub fn wait(self) -> Result<(), BarcodeError> {
        self.handle
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("save thread panicked").into()))
    }
}

fn format_for(path: &Path) -> Result<ImageFormat, BarcodeError> {
    Ok(ImageFormat::from_file_name(&path.to_string_lossy())?)
}

fn render_barcode(barcode: &mut dyn Barcode, background: image::Rgb<u8>) -> Result<RasterSurface, BarcodeError> {
    let layout = barcode.dimension(0, 0)?;
    let size = layout.size().at_least(1);
    info!(width = size.width(), height = size.height(); "Rendering barcode");

    let mut surface = RasterSurface::new(size.width(), size.height(), background);
    {
        let mut painter = barcode.base().painter(&mut surface, &layout);
        barcode.draw(&mut painter);
    }
    barcode.base_mut().mark_rendered();
    Ok(surface)
}

/// Paints `message` in black on a box one pixel larger than the measured
/// text, turned clockwise by `rotation` degrees.
fn render_message(message: &str, rotation: f32, background: image::Rgb<u8>) -> RasterSurface {
    let style = TextStyle::default();
    let measured = style.measure(message);
    let size = Size::new(measured.width().saturating_add(1), measured.height().saturating_add(1));
    info!(
        width = size.width(),
        height = size.height(),
        degrees = rotation,
        message = message;
        "Rendering error message"
    );

    let mut surface = RasterSurface::new(size.width(), size.height(), background);
    let ink = Color::black().to_rgb8();
    style.rasterize_rotated(message, size.width(), size.height(), rotation, |x, y, coverage| {
        surface.blend_pixel(x, y, ink, coverage)
    });
    surface
}
