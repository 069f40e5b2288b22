//! Raster surfaces.
//!
//! The [`Surface`] trait is the only way the layout and drawing layers touch
//! pixels. [`RasterSurface`] implements it on top of an [`image::RgbImage`].

use image::{Rgb, RgbImage};

/// A canvas that accepts filled rectangles and blended pixels.
///
/// Coordinates may fall outside the surface; implementors clip silently.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Fills the inclusive rectangle spanning `(x1, y1)` to `(x2, y2)`.
    ///
    /// Nothing is drawn when `x2 < x1` or `y2 < y1`.
    fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb<u8>);

    /// Blends `color` over the pixel at `(x, y)` with `coverage` in `0..=255`.
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb<u8>, coverage: u8);
}

/// An RGB raster surface backed by an [`RgbImage`].
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbImage,
}

impl RasterSurface {
    /// Creates a surface of the given size filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Borrows the underlying image.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Clips an inclusive span to `0..limit`, returning `None` when empty.
    fn clip(from: i32, to: i32, limit: u32) -> Option<(u32, u32)> {
        let from = i64::from(from).max(0);
        let to = i64::from(to).min(i64::from(limit) - 1);
        (from <= to).then(|| (from as u32, to as u32))
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb<u8>) {
        let Some((x1, x2)) = Self::clip(x1, x2, self.image.width()) else {
            return;
        };
        let Some((y1, y2)) = Self::clip(y1, y2, self.image.height()) else {
            return;
        };

        for y in y1..=y2 {
            for x in x1..=x2 {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb<u8>, coverage: u8) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        let Some(pixel) = self.image.get_pixel_mut_checked(x, y) else {
            return;
        };

        let alpha = u32::from(coverage);
        for (dst, src) in pixel.0.iter_mut().zip(color.0) {
            let blended = (u32::from(src) * alpha + u32::from(*dst) * (255 - alpha) + 127) / 255;
            *dst = blended as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn black_pixels(surface: &RasterSurface) -> usize {
        surface.image().pixels().filter(|p| **p == BLACK).count()
    }

    #[test]
    fn test_new_surface_is_filled_with_background() {
        let surface = RasterSurface::new(4, 3, WHITE);
        assert_eq!(surface.width(), 4);
        assert_eq!(surface.height(), 3);
        assert!(surface.image().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_fill_rect_is_inclusive() {
        let mut surface = RasterSurface::new(10, 10, WHITE);
        surface.fill_rect(2, 3, 4, 3, BLACK);
        assert_eq!(black_pixels(&surface), 3);
        assert_eq!(surface.pixel(2, 3), Some(BLACK));
        assert_eq!(surface.pixel(4, 3), Some(BLACK));
        assert_eq!(surface.pixel(5, 3), Some(WHITE));
    }

    #[test]
    fn test_fill_rect_clips_to_surface() {
        let mut surface = RasterSurface::new(5, 5, WHITE);
        surface.fill_rect(-10, -10, 1, 1, BLACK);
        assert_eq!(black_pixels(&surface), 4);

        surface.fill_rect(3, 3, 100, 100, BLACK);
        assert_eq!(black_pixels(&surface), 8);
    }

    #[test]
    fn test_fill_rect_reversed_draws_nothing() {
        let mut surface = RasterSurface::new(5, 5, WHITE);
        surface.fill_rect(3, 0, 1, 4, BLACK);
        surface.fill_rect(0, 20, 4, 30, BLACK);
        assert_eq!(black_pixels(&surface), 0);
    }

    #[test]
    fn test_blend_pixel() {
        let mut surface = RasterSurface::new(2, 1, WHITE);
        surface.blend_pixel(0, 0, BLACK, 255);
        surface.blend_pixel(1, 0, BLACK, 0);
        surface.blend_pixel(-1, 0, BLACK, 255);
        surface.blend_pixel(5, 0, BLACK, 255);
        assert_eq!(surface.pixel(0, 0), Some(BLACK));
        assert_eq!(surface.pixel(1, 0), Some(WHITE));

        let mut half = RasterSurface::new(1, 1, WHITE);
        half.blend_pixel(0, 0, BLACK, 128);
        assert_eq!(half.pixel(0, 0), Some(Rgb([127, 127, 127])));
    }
}
