//! Integer pixel geometry for barcode layout.
//!
//! # Overview
//!
//! - [`Size`] - Width and height in pixels or modules
//! - [`Insets`] - Per-side padding around the symbol, in pixels
//! - [`PushOffset`] - The (left, top) translation applied to every drawing call
//! - [`Rect`] - An inclusive pixel rectangle, used to hand the barcode box to labels
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Origin is the top-left pixel of the surface, matching raster images.

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    width: u32,
    height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> u32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> u32 {
        self.height
    }

    /// Returns a new Size grown by the given insets on every side, or `None`
    /// if either axis overflows
    pub fn checked_add_insets(self, insets: Insets) -> Option<Self> {
        Some(Self {
            width: self.width.checked_add(insets.left)?.checked_add(insets.right)?,
            height: self.height.checked_add(insets.top)?.checked_add(insets.bottom)?,
        })
    }

    /// Returns a new Size with each dimension raised to at least `min`
    pub fn at_least(self, min: u32) -> Self {
        Self {
            width: self.width.max(min),
            height: self.height.max(min),
        }
    }
}

/// Represents spacing around an element with potentially different values
/// for each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    top: u32,
    right: u32,
    bottom: u32,
    left: u32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns the top inset value
    pub fn top(self) -> u32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> u32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> u32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> u32 {
        self.left
    }

    /// Raises the top inset to at least `value`
    pub fn grow_top(&mut self, value: u32) {
        self.top = self.top.max(value);
    }

    /// Raises the right inset to at least `value`
    pub fn grow_right(&mut self, value: u32) {
        self.right = self.right.max(value);
    }

    /// Raises the bottom inset to at least `value`
    pub fn grow_bottom(&mut self, value: u32) {
        self.bottom = self.bottom.max(value);
    }

    /// Raises the left inset to at least `value`
    pub fn grow_left(&mut self, value: u32) {
        self.left = self.left.max(value);
    }
}

/// How far the symbol's drawing origin is shifted right (`left`) and down
/// (`top`) to make room for labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PushOffset {
    left: u32,
    top: u32,
}

impl PushOffset {
    pub fn new(left: u32, top: u32) -> Self {
        Self { left, top }
    }

    pub fn left(self) -> u32 {
        self.left
    }

    pub fn top(self) -> u32 {
        self.top
    }
}

impl From<Insets> for PushOffset {
    fn from(insets: Insets) -> Self {
        Self::new(insets.left(), insets.top())
    }
}

/// An inclusive rectangle in surface pixel coordinates.
///
/// Coordinates are signed so that shapes partially left of or above the
/// surface can be expressed; clipping is the surface's concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn x1(self) -> i32 {
        self.x1
    }

    pub fn y1(self) -> i32 {
        self.y1
    }

    pub fn x2(self) -> i32 {
        self.x2
    }

    pub fn y2(self) -> i32 {
        self.y2
    }

    /// Returns a copy with corners swapped so that `x1 <= x2` and `y1 <= y2`
    pub fn normalized(self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    /// Horizontal center, rounded toward negative infinity
    pub fn center_x(self) -> i32 {
        (self.x1 + self.x2).div_euclid(2)
    }

    /// Vertical center, rounded toward negative infinity
    pub fn center_y(self) -> i32 {
        (self.y1 + self.y2).div_euclid(2)
    }
}
