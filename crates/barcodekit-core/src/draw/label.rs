//! Labels: human-readable text attached to one side of a symbol.
//!
//! The layout engine only relies on the [`Label`] contract: a label reports
//! its footprint, its side and its alignment, and later draws itself relative
//! to the symbol's bounding box. [`TextLabel`] is the stock implementation.

use std::fmt;

use serde::Deserialize;

use super::{Surface, TextStyle};
use crate::{
    color::Color,
    geometry::{Rect, Size},
};

/// The side of the symbol a label is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Right,
    #[default]
    Bottom,
    Left,
}

impl Position {
    /// Returns true for [`Position::Left`] and [`Position::Right`], the sides
    /// that run vertically along the symbol.
    pub fn is_vertical_side(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

/// Where a label sits along the edge it is attached to.
///
/// Labels on the left or right side use [`Alignment::TOP`] and
/// [`Alignment::BOTTOM`], which share values with `Left` and `Right`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[serde(alias = "top")]
    Left,
    #[default]
    Center,
    #[serde(alias = "bottom")]
    Right,
}

impl Alignment {
    pub const TOP: Self = Self::Left;
    pub const BOTTOM: Self = Self::Right;
}

/// The contract between a symbol and the text placed around it.
pub trait Label: fmt::Debug {
    /// Pixel footprint of the label, including any spacing from the symbol.
    fn dimension(&self) -> Size;

    /// The side of the symbol this label occupies.
    fn position(&self) -> Position;

    /// Placement along the side.
    fn alignment(&self) -> Alignment;

    /// Draws the label next to the symbol whose pixel box is `bounds`.
    fn draw(&self, surface: &mut dyn Surface, bounds: Rect);

    /// Called whenever the owning symbol's background changes.
    fn set_background_color(&mut self, color: Color);
}

/// A single line (or several `\n`-separated lines) of text.
///
/// # Examples
///
/// ```
/// # use barcodekit_core::draw::{Alignment, Label, Position, TextLabel};
/// let mut label = TextLabel::new("0123456789");
/// label.set_position(Position::Top);
/// label.set_alignment(Alignment::Left);
/// assert_eq!(label.position(), Position::Top);
/// assert_eq!(label.spacing(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct TextLabel {
    text: String,
    style: TextStyle,
    position: Position,
    alignment: Alignment,
    offset: i32,
    spacing: u32,
    foreground: Color,
    background: Color,
}

impl TextLabel {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: TextStyle::default(),
            position: Position::default(),
            alignment: Alignment::default(),
            offset: 0,
            spacing: 4,
            foreground: Color::black(),
            background: Color::white(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: TextStyle) {
        self.style = style;
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Shift along the attached side, in pixels. Positive moves right/down.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
    }

    /// Gap between the symbol edge and the text, in pixels.
    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: u32) {
        self.spacing = spacing;
    }

    pub fn foreground_color(&self) -> Color {
        self.foreground
    }

    pub fn set_foreground_color(&mut self, color: Color) {
        self.foreground = color;
    }

    pub fn background_color(&self) -> Color {
        self.background
    }

    /// Top-left corner of the text box for the given symbol bounds.
    fn origin(&self, text: Size, bounds: Rect) -> (i32, i32) {
        let text_w = text.width() as i32;
        let text_h = text.height() as i32;
        let spacing = self.spacing as i32;

        let along_x = match self.alignment {
            Alignment::Left => bounds.x1(),
            Alignment::Center => bounds.center_x() - text_w / 2,
            Alignment::Right => bounds.x2() - text_w,
        } + self.offset;
        let along_y = match self.alignment {
            Alignment::Left => bounds.y1(),
            Alignment::Center => bounds.center_y() - text_h / 2,
            Alignment::Right => bounds.y2() - text_h,
        } + self.offset;

        match self.position {
            Position::Top => (along_x, bounds.y1() - spacing - text_h),
            Position::Bottom => (along_x, bounds.y2() + spacing),
            Position::Left => (bounds.x1() - spacing - text_w, along_y),
            Position::Right => (bounds.x2() + spacing, along_y),
        }
    }
}

impl Label for TextLabel {
    fn dimension(&self) -> Size {
        if self.text.is_empty() {
            return Size::default();
        }
        let text = self.style.measure(&self.text);

        let offset = self.offset.unsigned_abs();
        if self.position.is_vertical_side() {
            Size::new(text.width() + self.spacing, text.height() + offset)
        } else {
            Size::new(text.width() + offset, text.height() + self.spacing)
        }
    }

    fn position(&self) -> Position {
        self.position
    }

    fn alignment(&self) -> Alignment {
        self.alignment
    }

    fn draw(&self, surface: &mut dyn Surface, bounds: Rect) {
        if self.text.is_empty() {
            return;
        }
        let text = self.style.measure(&self.text);

        let (x, y) = self.origin(text, bounds);
        surface.fill_rect(
            x,
            y,
            x + text.width() as i32 - 1,
            y + text.height() as i32 - 1,
            self.background.to_rgb8(),
        );

        let ink = self.foreground.to_rgb8();
        self.style.rasterize(&self.text, |px, py, coverage| {
            surface.blend_pixel(x + px, y + py, ink, coverage);
        });
    }

    fn set_background_color(&mut self, color: Color) {
        self.background = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_constants_alias_horizontal_values() {
        assert_eq!(Alignment::TOP, Alignment::Left);
        assert_eq!(Alignment::BOTTOM, Alignment::Right);
    }

    #[test]
    fn test_position_vertical_sides() {
        assert!(Position::Left.is_vertical_side());
        assert!(Position::Right.is_vertical_side());
        assert!(!Position::Top.is_vertical_side());
        assert!(!Position::Bottom.is_vertical_side());
    }

    #[test]
    fn test_text_label_defaults() {
        let label = TextLabel::new("abc");
        assert_eq!(label.text(), "abc");
        assert_eq!(label.position(), Position::Bottom);
        assert_eq!(label.alignment(), Alignment::Center);
        assert_eq!(label.spacing(), 4);
        assert_eq!(label.offset(), 0);
        assert_eq!(label.background_color(), Color::white());
    }

    #[test]
    fn test_empty_text_label_has_no_footprint() {
        let label = TextLabel::new("");
        assert_eq!(label.dimension(), Size::default());
    }

    #[test]
    fn test_dimension_adds_spacing_on_perpendicular_axis() {
        let mut label = TextLabel::new("1234");
        let text = label.style().measure("1234");

        label.set_position(Position::Bottom);
        label.set_spacing(6);
        assert_eq!(label.dimension(), Size::new(text.width(), text.height() + 6));

        label.set_position(Position::Left);
        assert_eq!(label.dimension(), Size::new(text.width() + 6, text.height()));
    }

    #[test]
    fn test_origin_per_position() {
        let mut label = TextLabel::new("x");
        label.set_spacing(2);
        let text = Size::new(10, 6);
        let bounds = Rect::new(20, 30, 60, 50);

        label.set_position(Position::Top);
        label.set_alignment(Alignment::Left);
        assert_eq!(label.origin(text, bounds), (20, 22));

        label.set_position(Position::Bottom);
        label.set_alignment(Alignment::Right);
        assert_eq!(label.origin(text, bounds), (50, 52));

        label.set_alignment(Alignment::Center);
        assert_eq!(label.origin(text, bounds), (35, 52));

        label.set_position(Position::Left);
        label.set_alignment(Alignment::TOP);
        assert_eq!(label.origin(text, bounds), (8, 30));

        label.set_position(Position::Right);
        label.set_alignment(Alignment::BOTTOM);
        label.set_offset(-3);
        assert_eq!(label.origin(text, bounds), (62, 41));
    }

    #[test]
    fn test_set_background_color() {
        let mut label = TextLabel::new("x");
        label.set_background_color(Color::from_packed(0x00ff00));
        assert_eq!(label.background_color(), Color::from_packed(0x00ff00));
    }
}
