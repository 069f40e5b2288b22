//! Text measurement and rasterization.
//!
//! Labels and the error fallback both need to know how large a string renders
//! and to paint its glyphs onto a [`Surface`](super::Surface). Both go through
//! a process-wide font system so fonts are discovered only once.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Color as GlyphColor, Family, FontSystem, Metrics, Shaping, SwashCache};
use log::{info, trace};
use serde::Deserialize;

use crate::geometry::Size;

/// Font selection for a piece of text.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Arial"` |
/// | Font size | `14` |
///
/// # Examples
///
/// ```
/// # use barcodekit_core::draw::TextStyle;
/// let mut style = TextStyle::new("Helvetica", 10);
/// style.set_font_size(12);
/// assert_eq!(style.font_size(), 12);
/// assert_eq!(style.font_family(), "Helvetica");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    font_family: String,
    font_size: u16,
}

impl TextStyle {
    /// Creates a style with the given family and size in points.
    pub fn new(font_family: &str, font_size: u16) -> Self {
        Self {
            font_family: font_family.to_string(),
            font_size,
        }
    }

    /// Sets the font family (e.g., "Arial", "monospace").
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Measures `text` in whole pixels, rounding each axis up.
    pub fn measure(&self, text: &str) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .measure(text, self)
    }

    /// Rasterizes `text` with its top-left corner at the origin, calling
    /// `plot(x, y, coverage)` for every covered pixel.
    pub fn rasterize<F>(&self, text: &str, plot: F)
    where
        F: FnMut(i32, i32, u8),
    {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .rasterize(text, self, plot);
    }

    /// Rasterizes `text` into a `width` x `height` box turned clockwise by
    /// `degrees` about the box center.
    ///
    /// Glyph coverage is sampled nearest-neighbor, so `plot` is called at
    /// most once per pixel and only inside the box. Coverage rotated out of
    /// the box is dropped.
    pub fn rasterize_rotated<F>(&self, text: &str, width: u32, height: u32, degrees: f32, mut plot: F)
    where
        F: FnMut(i32, i32, u8),
    {
        let (w, h) = (width as usize, height as usize);
        let mut coverage = vec![0u8; w * h];
        self.rasterize(text, |x, y, alpha| {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                return;
            };
            if x < w && y < h {
                let cell = &mut coverage[y * w + x];
                *cell = (*cell).max(alpha);
            }
        });

        let radians = f64::from(degrees.rem_euclid(360.0)).to_radians();
        let (sin, cos) = radians.sin_cos();
        let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);

        for dy in 0..h {
            for dx in 0..w {
                // Inverse of the clockwise turn in y-down coordinates.
                let fx = dx as f64 + 0.5 - cx;
                let fy = dy as f64 + 0.5 - cy;
                let sx = (fx * cos + fy * sin + cx).floor();
                let sy = (fy * cos - fx * sin + cy).floor();
                if sx < 0.0 || sy < 0.0 || sx >= w as f64 || sy >= h as f64 {
                    continue;
                }

                let alpha = coverage[sy as usize * w + sx as usize];
                if alpha > 0 {
                    plot(dx as i32, dy as i32, alpha);
                }
            }
        }
    }

    fn metrics(&self) -> Metrics {
        // Points to pixels at standard DPI
        let font_size_px = f32::from(self.font_size) * 1.33;
        Metrics::new(font_size_px, font_size_px * 1.15)
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new("Arial", 14)
    }
}

struct FontState {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

/// Owns the font database and glyph cache shared by every text operation.
struct TextManager {
    state: Mutex<FontState>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            state: Mutex::new(FontState {
                font_system: FontSystem::new(),
                swash_cache: SwashCache::new(),
            }),
        }
    }

    fn shape(font_system: &mut FontSystem, text: &str, style: &TextStyle) -> Buffer {
        let mut buffer = Buffer::new(font_system, style.metrics());
        {
            let mut buffer = buffer.borrow_with(font_system);
            let attrs = Attrs::new().family(Family::Name(style.font_family()));
            buffer.set_size(None, None);
            buffer.set_text(text, &attrs, Shaping::Advanced, None);
            buffer.shape_until_scroll(true);
        }
        buffer
    }

    fn measure(&self, text: &str, style: &TextStyle) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut state = self.state.lock().expect("failed to lock FontSystem");
        let buffer = Self::shape(&mut state.font_system, text, style);
        let metrics = style.metrics();

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if layout_runs.is_empty() {
            max_width = text.len() as f32 * (metrics.font_size * 0.55);
            total_height = metrics.line_height;
        } else {
            for run in &layout_runs {
                if let Some(last) = run.glyphs.last() {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        }

        trace!(text, width = max_width, height = total_height; "Measured text");
        Size::new(max_width.ceil() as u32, total_height.ceil() as u32)
    }

    fn rasterize<F>(&self, text: &str, style: &TextStyle, mut plot: F)
    where
        F: FnMut(i32, i32, u8),
    {
        if text.is_empty() {
            return;
        }

        let mut state = self.state.lock().expect("failed to lock FontSystem");
        let FontState {
            font_system,
            swash_cache,
        } = &mut *state;
        let buffer = Self::shape(font_system, text, style);

        // Only coverage is used; the caller picks the ink color.
        buffer.draw(
            font_system,
            swash_cache,
            GlyphColor::rgb(0, 0, 0),
            |x, y, w, h, color| {
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        plot(x + dx, y + dy, color.a());
                    }
                }
            },
        );
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_style_default() {
        let style = TextStyle::default();
        assert_eq!(style.font_family(), "Arial");
        assert_eq!(style.font_size(), 14);
    }

    #[test]
    fn test_text_style_setters() {
        let mut style = TextStyle::default();
        style.set_font_family("monospace");
        style.set_font_size(8);
        assert_eq!(style, TextStyle::new("monospace", 8));
    }

    #[test]
    fn test_measure_empty_is_zero() {
        assert_eq!(TextStyle::default().measure(""), Size::default());
    }

    #[test]
    fn test_measure_has_line_height() {
        let size = TextStyle::default().measure("0123456789");
        assert!(size.height() > 0, "Height should be positive");
    }

    #[test]
    fn test_measure_multiline_is_taller() {
        let style = TextStyle::default();
        let single = style.measure("Line 1");
        let multi = style.measure("Line 1\nLine 2\nLine 3");
        assert!(
            multi.height() > single.height(),
            "Multi-line text ({}) should be taller than single line ({})",
            multi.height(),
            single.height()
        );
    }

    #[test]
    fn test_measure_larger_font_is_taller() {
        let small = TextStyle::new("Arial", 10).measure("Test");
        let large = TextStyle::new("Arial", 30).measure("Test");
        assert!(large.height() > small.height());
    }

    #[test]
    fn test_rasterize_empty_plots_nothing() {
        let mut plotted = 0;
        TextStyle::default().rasterize("", |_, _, _| plotted += 1);
        assert_eq!(plotted, 0);
    }

    fn rotated_ink(text: &str, width: u32, height: u32, degrees: f32) -> Vec<(i32, i32, u8)> {
        let mut ink = Vec::new();
        TextStyle::default().rasterize_rotated(text, width, height, degrees, |x, y, a| ink.push((x, y, a)));
        ink
    }

    #[test]
    fn test_rasterize_rotated_stays_inside_box() {
        let style = TextStyle::default();
        let size = style.measure("Rotated");
        let (w, h) = (size.width() + 1, size.height() + 1);
        for degrees in [0.0, 30.0, 45.0, 90.0, -135.0, 400.0] {
            for (x, y, _) in rotated_ink("Rotated", w, h, degrees) {
                assert!((0..w as i32).contains(&x), "x {x} outside at {degrees} degrees");
                assert!((0..h as i32).contains(&y), "y {y} outside at {degrees} degrees");
            }
        }
    }

    #[test]
    fn test_rasterize_rotated_half_turn_mirrors_both_axes() {
        let size = TextStyle::default().measure("Upside");
        let (w, h) = (size.width() + 1, size.height() + 1);
        let upright = rotated_ink("Upside", w, h, 0.0);
        let mut flipped = rotated_ink("Upside", w, h, 180.0);
        let mut expected: Vec<_> = upright
            .iter()
            .map(|&(x, y, a)| (w as i32 - 1 - x, h as i32 - 1 - y, a))
            .collect();
        expected.sort_unstable();
        flipped.sort_unstable();
        assert_eq!(flipped, expected);
    }

    #[test]
    fn test_rasterize_rotated_full_turn_is_identity() {
        let size = TextStyle::default().measure("Loop");
        let (w, h) = (size.width() + 1, size.height() + 1);
        assert_eq!(rotated_ink("Loop", w, h, 360.0), rotated_ink("Loop", w, h, 0.0));
    }
}
