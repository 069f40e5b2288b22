//! Drawing primitives.
//!
//! A [`Painter`] is what a symbology's `draw` receives. Every primitive takes
//! coordinates in unscaled module units and maps them to pixels by adding the
//! offset, multiplying by the effective scale of that axis, and adding the
//! push offset from the [`Layout`](crate::layout::Layout).
//!
//! Mapped coordinates saturate at the `i32` range; the surface clips them.

use image::Rgb;
use log::trace;

use barcodekit_core::{
    color::Color,
    draw::{Label, Surface},
    geometry::{PushOffset, Rect},
};

use crate::layout::Transform;

/// Which of the barcode's two colors a primitive paints with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColorSelector {
    #[default]
    Foreground,
    Background,
}

/// Foreground and background colors captured for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    foreground: Color,
    background: Color,
}

impl Palette {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
        }
    }

    pub fn resolve(&self, selector: ColorSelector) -> Color {
        match selector {
            ColorSelector::Foreground => self.foreground,
            ColorSelector::Background => self.background,
        }
    }
}

/// Scale- and offset-aware painter over a [`Surface`].
pub struct Painter<'a> {
    surface: &'a mut dyn Surface,
    transform: Transform,
    push: PushOffset,
    palette: Palette,
    labels: Vec<&'a dyn Label>,
}

impl<'a> Painter<'a> {
    pub fn new(
        surface: &'a mut dyn Surface,
        transform: Transform,
        push: PushOffset,
        palette: Palette,
        labels: Vec<&'a dyn Label>,
    ) -> Self {
        Self {
            surface,
            transform,
            push,
            palette,
            labels,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn push_label(&self) -> PushOffset {
        self.push
    }

    /// Resolves a color selector against the palette of this render.
    pub fn color(&self, selector: ColorSelector) -> Rgb<u8> {
        self.palette.resolve(selector).to_rgb8()
    }

    fn scale_x(&self) -> i32 {
        clamped(self.transform.effective_scale_x())
    }

    fn scale_y(&self) -> i32 {
        clamped(self.transform.effective_scale_y())
    }

    fn map_x(&self, x: i32) -> i32 {
        x.saturating_add(clamped(self.transform.offset_x()))
            .saturating_mul(self.scale_x())
            .saturating_add(clamped(self.push.left()))
    }

    fn map_y(&self, y: i32) -> i32 {
        y.saturating_add(clamped(self.transform.offset_y()))
            .saturating_mul(self.scale_y())
            .saturating_add(clamped(self.push.top()))
    }

    fn fill(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, selector: ColorSelector) {
        let color = self.color(selector);
        self.surface.fill_rect(x1, y1, x2, y2, color);
    }

    /// Paints one module as a block of `scale_x` × `scale_y` pixels.
    pub fn draw_pixel(&mut self, x: i32, y: i32, selector: ColorSelector) {
        let (sx, sy) = (self.scale_x(), self.scale_y());
        let (xr, yr) = (self.map_x(x), self.map_y(y));
        trace!(x, y, xr, yr; "draw_pixel");
        self.fill(xr, yr, last(xr, sx), last(yr, sy), selector);
    }

    /// Paints the outline of the module rectangle spanning the two corners.
    ///
    /// At an effective scale of 1 on both axes this is a single fill bounded
    /// by the corners; otherwise four strips one module thick are painted.
    pub fn draw_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, selector: ColorSelector) {
        let (sx, sy) = (self.scale_x(), self.scale_y());
        let (mx1, my1) = (self.map_x(x1), self.map_y(y1));
        let (mx2, my2) = (self.map_x(x2), self.map_y(y2));
        trace!(x1, y1, x2, y2; "draw_rectangle");

        if sx == 1 && sy == 1 {
            self.fill(mx1, my1, mx2, my2, selector);
            return;
        }

        // top, left, right, bottom
        self.fill(mx1, my1, last(mx2, sx), last(my1, sy), selector);
        self.fill(mx1, my1, last(mx1, sx), last(my2, sy), selector);
        self.fill(mx2, my1, last(mx2, sx), last(my2, sy), selector);
        self.fill(mx1, my2, last(mx2, sx), last(my2, sy), selector);
    }

    /// Paints the filled module rectangle spanning the two corners, inclusive.
    ///
    /// The corners may be given in any order.
    pub fn draw_filled_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, selector: ColorSelector) {
        let rect = Rect::new(x1, y1, x2, y2).normalized();
        let (sx, sy) = (self.scale_x(), self.scale_y());
        trace!(x1 = rect.x1(), y1 = rect.y1(), x2 = rect.x2(), y2 = rect.y2(); "draw_filled_rectangle");
        self.fill(
            self.map_x(rect.x1()),
            self.map_y(rect.y1()),
            last(self.map_x(rect.x2()), sx),
            last(self.map_y(rect.y2()), sy),
            selector,
        );
    }

    /// Hands the symbol's box, given in module units, to every attached label
    /// in insertion order.
    pub fn draw_text(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let bounds = Rect::new(self.map_x(x1), self.map_y(y1), self.map_x(x2), self.map_y(y2));
        for label in &self.labels {
            label.draw(self.surface, bounds);
        }
    }
}

fn clamped(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Last pixel of a module that starts at `start` and spans `scale` pixels.
fn last(start: i32, scale: i32) -> i32 {
    start.saturating_add(scale - 1)
}
