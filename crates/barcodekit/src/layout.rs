//! Layout engine.
//!
//! Computes the final canvas size of a symbol from its intrinsic module size,
//! the current [`Transform`], and the labels attached to it. The result is a
//! [`Layout`]: the surface size plus the [`PushOffset`] that every drawing
//! primitive must add so the symbol lands inside the label insets.
//!
//! # Algorithm
//!
//! 1. For each side keep the single largest label, measured across the side
//!    (width for left/right, height for top/bottom). Ties keep the first seen.
//! 2. Those footprints seed the `[top, right, bottom, left]` insets.
//! 3. The un-inset box is `(width + offset_x) * scale` by
//!    `(height + offset_y) * scale`.
//! 4. Every label whose length along its side exceeds the box on that axis
//!    pushes the overflow onto the opposite end(s), according to its
//!    alignment. Each side keeps the maximum, never the sum.
//! 5. The left and top insets become the push offset.
//!
//! Any axis that would exceed [`MAX_SIDE`] pixels fails with
//! [`DrawError::TooLarge`] instead of wrapping.

use log::debug;

use barcodekit_core::{
    draw::{Alignment, Label, Position},
    geometry::{Insets, PushOffset, Size},
};

use crate::error::DrawError;

/// Largest surface side in pixels. Drawing coordinates are `i32`, so every
/// pixel of a layout must be addressable as one.
pub const MAX_SIDE: u32 = i32::MAX as u32;

/// Scale and offset settings captured when a render starts.
///
/// `scale_x` and `scale_y` are per-axis module multipliers used by matrix
/// symbologies; linear symbologies leave both at 1, so the effective scale on
/// each axis reduces to `scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform {
    scale: u32,
    scale_x: u32,
    scale_y: u32,
    offset_x: u32,
    offset_y: u32,
}

impl Transform {
    pub fn new(scale: u32, scale_x: u32, scale_y: u32, offset_x: u32, offset_y: u32) -> Self {
        Self {
            scale,
            scale_x,
            scale_y,
            offset_x,
            offset_y,
        }
    }

    pub fn scale(self) -> u32 {
        self.scale
    }

    pub fn scale_x(self) -> u32 {
        self.scale_x
    }

    pub fn scale_y(self) -> u32 {
        self.scale_y
    }

    pub fn offset_x(self) -> u32 {
        self.offset_x
    }

    pub fn offset_y(self) -> u32 {
        self.offset_y
    }

    /// Pixels per module horizontally, saturating at `u32::MAX`.
    pub fn effective_scale_x(self) -> u32 {
        self.scale.saturating_mul(self.scale_x)
    }

    /// Pixels per module vertically, saturating at `u32::MAX`.
    pub fn effective_scale_y(self) -> u32 {
        self.scale.saturating_mul(self.scale_y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(1, 1, 1, 0, 0)
    }
}

/// The outcome of a layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    size: Size,
    insets: Insets,
}

impl Layout {
    /// Final surface size, labels included.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Space reserved around the symbol on each side.
    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// Translation applied to all drawing so the symbol clears the left and
    /// top insets.
    pub fn push_label(&self) -> PushOffset {
        PushOffset::from(self.insets)
    }
}

/// The largest label on each side, used for sizing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LabelSlots<'a> {
    top: Option<&'a dyn Label>,
    right: Option<&'a dyn Label>,
    bottom: Option<&'a dyn Label>,
    left: Option<&'a dyn Label>,
}

impl<'a> LabelSlots<'a> {
    /// Keeps, per side, the label with the largest footprint across the side.
    pub fn from_labels(labels: &[&'a dyn Label]) -> Self {
        let mut slots = Self::default();
        for &label in labels {
            let slot = slots.slot_mut(label.position());
            let larger = match slot {
                Some(current) => across(label) > across(*current),
                None => true,
            };
            if larger {
                *slot = Some(label);
            }
        }
        slots
    }

    pub fn get(&self, position: Position) -> Option<&'a dyn Label> {
        match position {
            Position::Top => self.top,
            Position::Right => self.right,
            Position::Bottom => self.bottom,
            Position::Left => self.left,
        }
    }

    fn slot_mut(&mut self, position: Position) -> &mut Option<&'a dyn Label> {
        match position {
            Position::Top => &mut self.top,
            Position::Right => &mut self.right,
            Position::Bottom => &mut self.bottom,
            Position::Left => &mut self.left,
        }
    }
}

/// Footprint perpendicular to the label's side.
fn across(label: &dyn Label) -> u32 {
    let dimension = label.dimension();
    if label.position().is_vertical_side() {
        dimension.width()
    } else {
        dimension.height()
    }
}

/// Length running alongside the label's side.
fn along(label: &dyn Label) -> u32 {
    let dimension = label.dimension();
    if label.position().is_vertical_side() {
        dimension.height()
    } else {
        dimension.width()
    }
}

/// Computes the final layout for a symbol of `width` × `height` modules.
///
/// Matrix symbologies pass dimensions already multiplied by their per-axis
/// scale. The function is pure: the same inputs always yield the same layout.
///
/// # Errors
///
/// Returns [`DrawError::TooLarge`] when either side of the result would
/// exceed [`MAX_SIDE`].
pub fn compute(
    width: u32,
    height: u32,
    transform: Transform,
    labels: &[&dyn Label],
) -> Result<Layout, DrawError> {
    let slots = LabelSlots::from_labels(labels);
    let mut insets = Insets::default();

    if let Some(label) = slots.get(Position::Top) {
        insets.grow_top(across(label));
    }
    if let Some(label) = slots.get(Position::Right) {
        insets.grow_right(across(label));
    }
    if let Some(label) = slots.get(Position::Bottom) {
        insets.grow_bottom(across(label));
    }
    if let Some(label) = slots.get(Position::Left) {
        insets.grow_left(across(label));
    }

    let symbol = Size::new(
        scaled(width, transform.offset_x(), transform.scale())?,
        scaled(height, transform.offset_y(), transform.scale())?,
    );

    for &label in labels {
        if label.position().is_vertical_side() {
            let excess = along(label).saturating_sub(symbol.height());
            if excess == 0 {
                continue;
            }
            match label.alignment() {
                Alignment::Left => insets.grow_bottom(excess),
                Alignment::Center => {
                    let half = excess.div_ceil(2);
                    insets.grow_top(half);
                    insets.grow_bottom(half);
                }
                Alignment::Right => insets.grow_top(excess),
            }
        } else {
            let excess = along(label).saturating_sub(symbol.width());
            if excess == 0 {
                continue;
            }
            match label.alignment() {
                Alignment::Left => insets.grow_right(excess),
                Alignment::Center => {
                    let half = excess.div_ceil(2);
                    insets.grow_right(half);
                    insets.grow_left(half);
                }
                Alignment::Right => insets.grow_left(excess),
            }
        }
    }

    let size = symbol
        .checked_add_insets(insets)
        .filter(|size| size.width() <= MAX_SIDE && size.height() <= MAX_SIDE)
        .ok_or(DrawError::TooLarge)?;
    let layout = Layout { size, insets };
    debug!(
        width = layout.size.width(),
        height = layout.size.height(),
        push_left = insets.left(),
        push_top = insets.top();
        "Computed layout"
    );
    Ok(layout)
}

/// `(modules + offset) * scale`, or [`DrawError::TooLarge`] past [`MAX_SIDE`].
fn scaled(modules: u32, offset: u32, scale: u32) -> Result<u32, DrawError> {
    modules
        .checked_add(offset)
        .and_then(|length| length.checked_mul(scale))
        .filter(|&pixels| pixels <= MAX_SIDE)
        .ok_or(DrawError::TooLarge)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::ptr;

    use barcodekit_core::{color::Color, draw::Surface, geometry::Rect};

    use super::*;

    /// A label with a fixed footprint.
    #[derive(Debug, Clone)]
    pub(crate) struct FixedLabel {
        pub(crate) size: Size,
        pub(crate) position: Position,
        pub(crate) alignment: Alignment,
    }

    impl FixedLabel {
        pub(crate) fn new(width: u32, height: u32, position: Position, alignment: Alignment) -> Self {
            Self {
                size: Size::new(width, height),
                position,
                alignment,
            }
        }
    }

    impl Label for FixedLabel {
        fn dimension(&self) -> Size {
            self.size
        }

        fn position(&self) -> Position {
            self.position
        }

        fn alignment(&self) -> Alignment {
            self.alignment
        }

        fn draw(&self, _surface: &mut dyn Surface, _bounds: Rect) {}

        fn set_background_color(&mut self, _color: Color) {}
    }

    fn is_same(slot: Option<&dyn Label>, expected: &FixedLabel) -> bool {
        slot.is_some_and(|label| ptr::addr_eq(label as *const dyn Label, expected as *const FixedLabel))
    }

    #[test]
    fn test_no_labels_is_scaled_box() {
        let layout = compute(10, 1, Transform::new(3, 1, 1, 0, 0), &[]).unwrap();
        assert_eq!(layout.size(), Size::new(30, 3));
        assert_eq!(layout.push_label(), PushOffset::new(0, 0));
        assert_eq!(layout.insets(), Insets::default());
    }

    #[test]
    fn test_offsets_are_added_before_scaling() {
        let layout = compute(10, 4, Transform::new(2, 1, 1, 3, 1), &[]).unwrap();
        assert_eq!(layout.size(), Size::new(26, 10));
    }

    #[test]
    fn test_bottom_label_only_grows_bottom() {
        let bottom = FixedLabel::new(20, 8, Position::Bottom, Alignment::Center);
        let layout = compute(10, 1, Transform::new(3, 1, 1, 0, 0), &[&bottom]).unwrap();
        assert_eq!(layout.size(), Size::new(30, 11));
        assert_eq!(layout.push_label(), PushOffset::new(0, 0));
        assert_eq!(layout.insets(), Insets::new(0, 0, 8, 0));
    }

    #[test]
    fn test_left_and_top_labels_push_origin() {
        let left = FixedLabel::new(6, 2, Position::Left, Alignment::Center);
        let top = FixedLabel::new(4, 5, Position::Top, Alignment::Center);
        let layout = compute(10, 10, Transform::default(), &[&left, &top]).unwrap();
        assert_eq!(layout.push_label(), PushOffset::new(6, 5));
        assert_eq!(layout.size(), Size::new(16, 15));
    }

    #[test]
    fn test_largest_label_per_side_wins() {
        let small = FixedLabel::new(5, 3, Position::Top, Alignment::Center);
        let large = FixedLabel::new(5, 9, Position::Top, Alignment::Center);
        let slots = LabelSlots::from_labels(&[&small, &large]);
        assert!(is_same(slots.get(Position::Top), &large));
        assert!(slots.get(Position::Bottom).is_none());

        let layout = compute(10, 10, Transform::default(), &[&small, &large]).unwrap();
        assert_eq!(layout.insets().top(), 9);
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let first = FixedLabel::new(4, 7, Position::Left, Alignment::Center);
        let second = FixedLabel::new(4, 2, Position::Left, Alignment::Center);
        let slots = LabelSlots::from_labels(&[&first, &second]);
        assert!(is_same(slots.get(Position::Left), &first));
        assert!(!is_same(slots.get(Position::Left), &second));
    }

    #[test]
    fn test_centered_overflow_splits_with_ceiling() {
        // Symbol 20 wide, label 30 wide: 5px on each side.
        let top = FixedLabel::new(30, 4, Position::Top, Alignment::Center);
        let layout = compute(20, 5, Transform::default(), &[&top]).unwrap();
        assert_eq!(layout.insets(), Insets::new(4, 5, 0, 5));
        assert_eq!(layout.size(), Size::new(30, 9));
        assert_eq!(layout.push_label(), PushOffset::new(5, 4));

        // Odd excess rounds up on both sides.
        let top = FixedLabel::new(31, 4, Position::Top, Alignment::Center);
        let layout = compute(20, 5, Transform::default(), &[&top]).unwrap();
        assert_eq!(layout.insets().left(), 6);
        assert_eq!(layout.insets().right(), 6);
    }

    #[test]
    fn test_aligned_overflow_goes_to_far_side() {
        let left_aligned = FixedLabel::new(25, 2, Position::Bottom, Alignment::Left);
        let layout = compute(20, 5, Transform::default(), &[&left_aligned]).unwrap();
        assert_eq!(layout.insets(), Insets::new(0, 5, 2, 0));

        let right_aligned = FixedLabel::new(25, 2, Position::Bottom, Alignment::Right);
        let layout = compute(20, 5, Transform::default(), &[&right_aligned]).unwrap();
        assert_eq!(layout.insets(), Insets::new(0, 0, 2, 5));
    }

    #[test]
    fn test_vertical_side_overflow() {
        let top_aligned = FixedLabel::new(3, 12, Position::Right, Alignment::TOP);
        let layout = compute(4, 4, Transform::default(), &[&top_aligned]).unwrap();
        assert_eq!(layout.insets(), Insets::new(0, 3, 8, 0));

        let bottom_aligned = FixedLabel::new(3, 12, Position::Left, Alignment::BOTTOM);
        let layout = compute(4, 4, Transform::default(), &[&bottom_aligned]).unwrap();
        assert_eq!(layout.insets(), Insets::new(8, 0, 0, 3));

        let centered = FixedLabel::new(3, 11, Position::Left, Alignment::Center);
        let layout = compute(4, 4, Transform::default(), &[&centered]).unwrap();
        assert_eq!(layout.insets(), Insets::new(4, 0, 4, 3));
    }

    #[test]
    fn test_overflow_takes_maximum_not_sum() {
        let a = FixedLabel::new(26, 2, Position::Top, Alignment::Right);
        let b = FixedLabel::new(30, 2, Position::Bottom, Alignment::Right);
        let layout = compute(20, 5, Transform::default(), &[&a, &b]).unwrap();
        assert_eq!(layout.insets().left(), 10);
    }

    #[test]
    fn test_overflow_beats_smaller_label_inset() {
        let left = FixedLabel::new(3, 2, Position::Left, Alignment::Center);
        let top = FixedLabel::new(40, 2, Position::Top, Alignment::Right);
        let layout = compute(20, 5, Transform::default(), &[&left, &top]).unwrap();
        assert_eq!(layout.insets().left(), 20);
    }

    #[test]
    fn test_overflow_checks_every_label_not_only_largest() {
        // The tall label wins the slot, the wide one still overflows.
        let tall = FixedLabel::new(5, 9, Position::Top, Alignment::Center);
        let wide = FixedLabel::new(40, 2, Position::Top, Alignment::Left);
        let layout = compute(20, 5, Transform::default(), &[&tall, &wide]).unwrap();
        assert_eq!(layout.insets(), Insets::new(9, 20, 0, 0));
    }

    #[test]
    fn test_zero_length_label_contributes_nothing() {
        let empty = FixedLabel::new(0, 0, Position::Top, Alignment::Center);
        let layout = compute(7, 3, Transform::new(2, 1, 1, 0, 0), &[&empty]).unwrap();
        assert_eq!(layout.size(), Size::new(14, 6));
        assert_eq!(layout.insets(), Insets::default());
    }

    #[test]
    fn test_transform_effective_scale() {
        let transform = Transform::new(2, 3, 4, 0, 0);
        assert_eq!(transform.effective_scale_x(), 6);
        assert_eq!(transform.effective_scale_y(), 8);
    }

    #[test]
    fn test_effective_scale_saturates() {
        let transform = Transform::new(70_000, 70_000, 1, 0, 0);
        assert_eq!(transform.effective_scale_x(), u32::MAX);
        assert_eq!(transform.effective_scale_y(), 70_000);
    }

    #[test]
    fn test_oversized_symbol_is_rejected() {
        let huge = Transform::new(i32::MAX as u32, 1, 1, 0, 0);
        assert_eq!(compute(10, 1, huge, &[]), Err(DrawError::TooLarge));
        assert_eq!(compute(u32::MAX, 0, Transform::new(1, 1, 1, 1, 0), &[]), Err(DrawError::TooLarge));
        assert_eq!(compute(1, 1, huge, &[]).map(|layout| layout.size()), Ok(Size::new(MAX_SIDE, MAX_SIDE)));
    }

    #[test]
    fn test_labels_past_max_side_are_rejected() {
        let wide = FixedLabel::new(10, u32::MAX, Position::Bottom, Alignment::Center);
        assert_eq!(compute(10, 1, Transform::default(), &[&wide]), Err(DrawError::TooLarge));

        let edge = FixedLabel::new(10, MAX_SIDE - 1, Position::Bottom, Alignment::Center);
        let layout = compute(10, 1, Transform::default(), &[&edge]).unwrap();
        assert_eq!(layout.size().height(), MAX_SIDE);
    }
}
