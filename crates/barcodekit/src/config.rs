//! Configuration for rendering barcodes.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every field is optional; anything left out keeps the library
//! default.
//!
//! - [`AppConfig`] - configuration root.
//! - [`RenderConfig`] - scale, offsets, colors, rotation and DPI.
//! - [`LabelConfig`] - font and spacing for text labels.
//!
//! # Example
//!
//! ```
//! # use barcodekit::{barcode::BarcodeBase, config::AppConfig};
//! let config = AppConfig::default();
//! let mut base = BarcodeBase::new();
//! config.apply_to(&mut base).unwrap();
//! assert_eq!(base.scale(), 1);
//! ```

use serde::Deserialize;

use barcodekit_core::draw::{TextLabel, TextStyle};

use crate::{barcode::BarcodeBase, drawing::Drawing, error::BarcodeError};

/// Configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    render: RenderConfig,

    #[serde(default)]
    label: LabelConfig,
}

impl AppConfig {
    pub fn new(render: RenderConfig, label: LabelConfig) -> Self {
        Self { render, label }
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn label(&self) -> &LabelConfig {
        &self.label
    }

    /// Applies the render section to a barcode.
    ///
    /// # Errors
    ///
    /// Returns the first [`ArgumentError`](crate::error::ArgumentError) raised
    /// by a setter, e.g. for `scale = 0` or an unknown color name.
    pub fn apply_to(&self, base: &mut BarcodeBase) -> Result<(), BarcodeError> {
        let render = &self.render;
        if let Some(scale) = render.scale {
            base.set_scale(scale)?;
        }
        if let Some(offset_x) = render.offset_x {
            base.set_offset_x(offset_x)?;
        }
        if let Some(offset_y) = render.offset_y {
            base.set_offset_y(offset_y)?;
        }
        if let Some(foreground) = &render.foreground {
            base.set_foreground_color(foreground.as_str())?;
        }
        if let Some(background) = &render.background {
            base.set_background_color(background.as_str())?;
        }
        Ok(())
    }

    /// Applies rotation and DPI to a drawing.
    pub fn apply_to_drawing(&self, drawing: &mut Drawing<'_>) -> Result<(), BarcodeError> {
        if let Some(rotation) = self.render.rotation {
            drawing.set_rotation_angle(rotation)?;
        }
        drawing.set_dpi(self.render.dpi);
        Ok(())
    }

    /// Builds a text label styled by the label section.
    pub fn text_label(&self, text: &str) -> TextLabel {
        let mut label = TextLabel::new(text);
        label.set_style(self.label.style());
        if let Some(spacing) = self.label.spacing {
            label.set_spacing(spacing);
        }
        label
    }
}

/// Render settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    scale: Option<i32>,

    #[serde(default)]
    offset_x: Option<i32>,

    #[serde(default)]
    offset_y: Option<i32>,

    /// Bar color, as a color name or hex string.
    #[serde(default)]
    foreground: Option<String>,

    /// Background color, as a color name or hex string.
    #[serde(default)]
    background: Option<String>,

    /// Clockwise rotation of the fallback message text, in degrees.
    #[serde(default)]
    rotation: Option<f32>,

    #[serde(default)]
    dpi: Option<f32>,
}

impl RenderConfig {
    pub fn scale(&self) -> Option<i32> {
        self.scale
    }

    pub fn set_scale(&mut self, scale: i32) {
        self.scale = Some(scale);
    }

    pub fn rotation(&self) -> Option<f32> {
        self.rotation
    }

    pub fn dpi(&self) -> Option<f32> {
        self.dpi
    }
}

/// Text label settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelConfig {
    #[serde(default)]
    font_family: Option<String>,

    #[serde(default)]
    font_size: Option<u16>,

    /// Gap in pixels between the symbol and the label.
    #[serde(default)]
    spacing: Option<u32>,
}

impl LabelConfig {
    /// The configured font, falling back to the default style.
    pub fn style(&self) -> TextStyle {
        let mut style = TextStyle::default();
        if let Some(family) = &self.font_family {
            style.set_font_family(family);
        }
        if let Some(size) = self.font_size {
            style.set_font_size(size);
        }
        style
    }

    pub fn spacing(&self) -> Option<u32> {
        self.spacing
    }
}
