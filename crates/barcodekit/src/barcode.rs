//! Barcode base state and the symbology contract.
//!
//! [`BarcodeBase`] owns everything a symbology shares: colors, scale and
//! offsets, and the ordered label collection. Concrete symbologies embed a
//! base and implement [`Barcode`], supplying only `parse` and `draw`.

use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use barcodekit_core::{
    color::{Color, ColorSpec},
    draw::{Label, Surface},
};

use crate::{
    error::{ArgumentError, DrawError, ParseError},
    layout::{self, Layout, MAX_SIDE, Transform},
    painter::{Painter, Palette},
};

static NEXT_LABEL_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned by [`BarcodeBase::add_label`], used to detach that exact
/// label later. Two labels with equal contents still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(u64);

impl LabelId {
    fn next() -> Self {
        Self(NEXT_LABEL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
struct LabelEntry {
    id: LabelId,
    label: Box<dyn Label>,
}

/// Lifecycle of a barcode's configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum State {
    #[default]
    Unconfigured,
    Configured,
    Rendered,
}

/// Shared configuration of every symbology.
#[derive(Debug)]
pub struct BarcodeBase {
    foreground: Color,
    background: Color,
    scale: u32,
    scale_x: u32,
    scale_y: u32,
    offset_x: u32,
    offset_y: u32,
    labels: Vec<LabelEntry>,
    state: State,
}

impl Default for BarcodeBase {
    fn default() -> Self {
        Self {
            foreground: Color::black(),
            background: Color::white(),
            scale: 1,
            scale_x: 1,
            scale_y: 1,
            offset_x: 0,
            offset_y: 0,
            labels: Vec::new(),
            state: State::Unconfigured,
        }
    }
}

fn positive(param: &'static str, value: i32) -> Result<u32, ArgumentError> {
    u32::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or_else(|| ArgumentError::new(param, format!("The {param} must be larger than 0.")))
}

fn non_negative(param: &'static str, value: i32) -> Result<u32, ArgumentError> {
    u32::try_from(value)
        .map_err(|_| ArgumentError::new(param, format!("The {param} must be larger or equal to 0.")))
}

/// Rejects a multiplier whose product with `other` could not be drawn.
fn within_max_side(param: &'static str, value: u32, other: u32) -> Result<u32, ArgumentError> {
    value
        .checked_mul(other)
        .filter(|&pixels| pixels <= MAX_SIDE)
        .map(|_| value)
        .ok_or_else(|| {
            ArgumentError::new(
                param,
                format!("The {param} multiplied by the other scales must be at most {MAX_SIDE}."),
            )
        })
}

fn resolve_color(color: impl Into<ColorSpec>) -> Result<Color, ArgumentError> {
    color.into().resolve().map_err(|message| ArgumentError::new("color", message))
}

impl BarcodeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        self.state
    }

    fn touch(&mut self) {
        self.state = State::Configured;
    }

    pub(crate) fn mark_rendered(&mut self) {
        self.state = State::Rendered;
    }

    pub fn foreground_color(&self) -> Color {
        self.foreground
    }

    pub fn background_color(&self) -> Color {
        self.background
    }

    /// Sets the color of bars and dark modules.
    ///
    /// Accepts a color name or hex string, a packed `0xRRGGBB` integer, or a
    /// resolved [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] naming `"color"` when the value cannot be
    /// resolved.
    pub fn set_foreground_color(&mut self, color: impl Into<ColorSpec>) -> Result<(), ArgumentError> {
        self.foreground = resolve_color(color)?;
        self.touch();
        Ok(())
    }

    /// Sets the background color and propagates it to every attached label.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] naming `"color"` when the value cannot be
    /// resolved.
    pub fn set_background_color(&mut self, color: impl Into<ColorSpec>) -> Result<(), ArgumentError> {
        let color = resolve_color(color)?;
        self.background = color;
        for entry in &mut self.labels {
            entry.label.set_background_color(color);
        }
        self.touch();
        Ok(())
    }

    /// Sets both colors. Nothing changes if either value is invalid.
    pub fn set_color(
        &mut self,
        foreground: impl Into<ColorSpec>,
        background: impl Into<ColorSpec>,
    ) -> Result<(), ArgumentError> {
        let foreground = resolve_color(foreground)?;
        let background = resolve_color(background)?;
        self.set_foreground_color(foreground)?;
        self.set_background_color(background)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// # Errors
    ///
    /// Fails with an [`ArgumentError`] naming `"scale"` when `scale <= 0`, or
    /// when `scale` times `scale_x` or `scale_y` exceeds [`MAX_SIDE`].
    pub fn set_scale(&mut self, scale: i32) -> Result<(), ArgumentError> {
        let scale = positive("scale", scale)?;
        self.scale = within_max_side("scale", scale, self.scale_x.max(self.scale_y))?;
        self.touch();
        Ok(())
    }

    pub fn scale_x(&self) -> u32 {
        self.scale_x
    }

    /// Horizontal module multiplier for matrix symbologies.
    ///
    /// # Errors
    ///
    /// Fails with an [`ArgumentError`] naming `"scaleX"` when `scale_x <= 0`
    /// or when `scale_x` times `scale` exceeds [`MAX_SIDE`].
    pub fn set_scale_x(&mut self, scale_x: i32) -> Result<(), ArgumentError> {
        let scale_x = positive("scaleX", scale_x)?;
        self.scale_x = within_max_side("scaleX", scale_x, self.scale)?;
        self.touch();
        Ok(())
    }

    pub fn scale_y(&self) -> u32 {
        self.scale_y
    }

    /// Vertical module multiplier for matrix symbologies.
    ///
    /// # Errors
    ///
    /// Fails with an [`ArgumentError`] naming `"scaleY"` when `scale_y <= 0`
    /// or when `scale_y` times `scale` exceeds [`MAX_SIDE`].
    pub fn set_scale_y(&mut self, scale_y: i32) -> Result<(), ArgumentError> {
        let scale_y = positive("scaleY", scale_y)?;
        self.scale_y = within_max_side("scaleY", scale_y, self.scale)?;
        self.touch();
        Ok(())
    }

    pub fn offset_x(&self) -> u32 {
        self.offset_x
    }

    /// # Errors
    ///
    /// Fails with an [`ArgumentError`] naming `"offsetX"` when `offset_x < 0`.
    pub fn set_offset_x(&mut self, offset_x: i32) -> Result<(), ArgumentError> {
        self.offset_x = non_negative("offsetX", offset_x)?;
        self.touch();
        Ok(())
    }

    pub fn offset_y(&self) -> u32 {
        self.offset_y
    }

    /// # Errors
    ///
    /// Fails with an [`ArgumentError`] naming `"offsetY"` when `offset_y < 0`.
    pub fn set_offset_y(&mut self, offset_y: i32) -> Result<(), ArgumentError> {
        self.offset_y = non_negative("offsetY", offset_y)?;
        self.touch();
        Ok(())
    }

    /// Snapshot of the current scale and offsets.
    pub fn transform(&self) -> Transform {
        Transform::new(self.scale, self.scale_x, self.scale_y, self.offset_x, self.offset_y)
    }

    /// Attaches a label. It takes on the barcode's background color.
    pub fn add_label(&mut self, label: impl Label + 'static) -> LabelId {
        let mut label: Box<dyn Label> = Box::new(label);
        label.set_background_color(self.background);
        let id = LabelId::next();
        debug!(id = id.0, position:% = label.position(); "Label added");
        self.labels.push(LabelEntry { id, label });
        self.touch();
        id
    }

    /// Detaches the label with `id` and hands it back. Unknown ids are ignored.
    pub fn remove_label(&mut self, id: LabelId) -> Option<Box<dyn Label>> {
        let index = self.labels.iter().position(|entry| entry.id == id)?;
        self.touch();
        Some(self.labels.remove(index).label)
    }

    pub fn clear_labels(&mut self) {
        self.labels.clear();
        self.touch();
    }

    pub fn label(&self, id: LabelId) -> Option<&dyn Label> {
        self.labels
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.label.as_ref())
    }

    pub fn label_mut(&mut self, id: LabelId) -> Option<&mut dyn Label> {
        self.labels
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| entry.label.as_mut() as &mut dyn Label)
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Attached labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &dyn Label> {
        self.labels.iter().map(|entry| entry.label.as_ref())
    }

    /// Lays out a symbol of `width` × `height` modules.
    ///
    /// The dimensions are multiplied by `scale_x`/`scale_y` before the label
    /// insets are computed, so linear symbologies (both at 1) are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::TooLarge`] when the result cannot be drawn.
    pub fn dimension(&self, width: u32, height: u32) -> Result<Layout, DrawError> {
        let labels: Vec<&dyn Label> = self.labels().collect();
        let width = width.checked_mul(self.scale_x).ok_or(DrawError::TooLarge)?;
        let height = height.checked_mul(self.scale_y).ok_or(DrawError::TooLarge)?;
        layout::compute(width, height, self.transform(), &labels)
    }

    /// Builds the painter a symbology draws through.
    pub fn painter<'a>(&'a self, surface: &'a mut dyn Surface, layout: &Layout) -> Painter<'a> {
        Painter::new(
            surface,
            self.transform(),
            layout.push_label(),
            Palette::new(self.foreground, self.background),
            self.labels().collect(),
        )
    }
}

/// The contract every symbology implements.
pub trait Barcode {
    fn base(&self) -> &BarcodeBase;

    fn base_mut(&mut self) -> &mut BarcodeBase;

    /// Symbology name used in parse errors.
    fn name(&self) -> &'static str;

    /// Loads the text to encode.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the text is not valid for this symbology.
    fn parse(&mut self, text: &str) -> Result<(), ParseError>;

    /// Final size and push offset of the symbol as currently configured.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::TooLarge`] when the symbol cannot be drawn.
    fn dimension(&self, width: u32, height: u32) -> Result<Layout, DrawError> {
        self.base().dimension(width, height)
    }

    /// Paints the symbol through `painter`.
    fn draw(&self, painter: &mut Painter<'_>);
}
