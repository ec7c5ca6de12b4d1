//! Software raster canvas.
//!
//! Paints into an in-memory RGBA buffer using source-over blending. Rows are
//! blended in parallel with rayon; each paint call is still synchronous.

use image::{Rgb, Rgba, RgbImage, RgbaImage};
use rayon::prelude::*;

use super::layers::{LayerImage, stretch};
use super::surface::{Canvas, Rect};

/// `255 * 255`, the scale of a combined (image alpha x layer alpha) coverage.
const FULL_COVERAGE: u32 = 255 * 255;

/// An in-memory canvas backed by an RGBA buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterCanvas {
    pixels: RgbaImage,
}

impl RasterCanvas {
    /// Creates a transparent canvas of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self { Self { pixels: RgbaImage::new(width, height) } }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) { self.pixels.dimensions() }

    #[must_use]
    pub const fn pixels(&self) -> &RgbaImage { &self.pixels }

    /// Moves the painted buffer out, leaving an empty canvas behind.
    pub fn take_pixels(&mut self) -> RgbaImage { std::mem::take(&mut self.pixels) }

    #[must_use]
    pub fn into_pixels(self) -> RgbaImage { self.pixels }

    /// Drops the alpha channel, for encoders that do not support it (JPEG).
    #[must_use]
    pub fn to_rgb(&self) -> RgbImage { image::DynamicImage::ImageRgba8(self.pixels.clone()).to_rgb8() }

    /// Clips `rect` to the canvas bounds.
    fn clip(&self, rect: Rect) -> Option<Rect> {
        let (width, height) = self.pixels.dimensions();
        if rect.x >= width || rect.y >= height || rect.is_empty() {
            return None;
        }
        Some(Rect::new(
            rect.x,
            rect.y,
            rect.width.min(width - rect.x),
            rect.height.min(height - rect.y),
        ))
    }
}

impl Canvas for RasterCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Rgb<u8>) {
        let Some(rect) = self.clip(rect) else {
            return;
        };
        let fill = Rgba([color[0], color[1], color[2], 255]);
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                self.pixels.put_pixel(x, y, fill);
            }
        }
    }

    fn draw_layer(&mut self, image: &LayerImage, dst: Rect, alpha: u8) {
        if alpha == 0 || dst.is_empty() {
            return;
        }

        let stretched;
        let source = if image.dimensions() == (dst.width, dst.height) {
            image.pixels()
        } else {
            stretched = stretch(image.pixels(), dst.width, dst.height);
            &stretched
        };

        let Some(clipped) = self.clip(dst) else {
            return;
        };

        let canvas_stride = self.pixels.width() as usize * 4;
        let source_stride = dst.width as usize * 4;
        let x_offset = clipped.x as usize * 4;
        let span = clipped.width as usize * 4;
        let source_raw = source.as_raw();

        self.pixels
            .par_chunks_mut(canvas_stride)
            .enumerate()
            .skip(clipped.y as usize)
            .take(clipped.height as usize)
            .for_each(|(row, canvas_row)| {
                let source_row = (row - dst.y as usize) * source_stride;
                let source_row = &source_raw[source_row..source_row + span];
                blend_row(&mut canvas_row[x_offset..x_offset + span], source_row, alpha);
            });
    }
}

/// Source-over blends one row of RGBA pixels, scaling source coverage by `alpha`.
fn blend_row(dst: &mut [u8], src: &[u8], alpha: u8) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let coverage = u32::from(s[3]) * u32::from(alpha);
        if coverage == 0 {
            continue;
        }
        let remaining = FULL_COVERAGE - coverage;
        for channel in 0..3 {
            d[channel] = mix(s[channel], d[channel], coverage, remaining);
        }
        d[3] = mix(255, d[3], coverage, remaining);
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn mix(src: u8, dst: u8, coverage: u32, remaining: u32) -> u8 {
    ((src as u32 * coverage + dst as u32 * remaining + FULL_COVERAGE / 2) / FULL_COVERAGE) as u8
}

#[cfg(test)]
mod tests {
    use image::DynamicImage;

    use super::*;
    use crate::opacity::Layer;

    fn layer(width: u32, height: u32, color: [u8; 4]) -> LayerImage {
        LayerImage::new(
            Layer::Overlay1,
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color))),
        )
    }

    fn black_canvas(width: u32, height: u32) -> RasterCanvas {
        let mut canvas = RasterCanvas::new(width, height);
        canvas.fill_rect(Rect::from_size(width, height), Rgb([0, 0, 0]));
        canvas
    }

    // ========================================================================
    // fill_rect
    // ========================================================================

    #[test]
    fn test_fill_rect_paints_opaque_color() {
        let canvas = black_canvas(4, 3);
        assert!(canvas.pixels().pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_fill_rect_is_clipped_to_canvas() {
        let mut canvas = RasterCanvas::new(4, 4);
        canvas.fill_rect(Rect::new(2, 2, 100, 100), Rgb([255, 0, 0]));
        assert_eq!(canvas.pixels().get_pixel(3, 3), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.pixels().get_pixel(1, 1), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_fill_rect_outside_canvas_is_ignored() {
        let mut canvas = RasterCanvas::new(4, 4);
        canvas.fill_rect(Rect::new(10, 10, 2, 2), Rgb([255, 0, 0]));
        assert!(canvas.pixels().pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
    }

    // ========================================================================
    // draw_layer
    // ========================================================================

    #[test]
    fn test_draw_layer_zero_alpha_leaves_canvas_unchanged() {
        let mut canvas = black_canvas(4, 4);
        let before = canvas.clone();
        canvas.draw_layer(&layer(4, 4, [255, 255, 255, 255]), Rect::from_size(4, 4), 0);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_draw_layer_full_alpha_replaces_pixels() {
        let mut canvas = black_canvas(4, 4);
        canvas.draw_layer(&layer(4, 4, [10, 200, 30, 255]), Rect::from_size(4, 4), 255);
        assert!(canvas.pixels().pixels().all(|p| *p == Rgba([10, 200, 30, 255])));
    }

    #[test]
    fn test_draw_layer_half_alpha_blends() {
        let mut canvas = black_canvas(2, 2);
        canvas.draw_layer(&layer(2, 2, [200, 100, 0, 255]), Rect::from_size(2, 2), 128);
        let pixel = canvas.pixels().get_pixel(0, 0);
        // 200 * 128 / 255 ~= 100.4, 100 * 128 / 255 ~= 50.2
        assert_eq!(pixel, &Rgba([100, 50, 0, 255]));
    }

    #[test]
    fn test_draw_layer_respects_image_alpha() {
        let mut canvas = black_canvas(2, 2);
        canvas.draw_layer(&layer(2, 2, [255, 255, 255, 0]), Rect::from_size(2, 2), 255);
        assert!(canvas.pixels().pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_draw_layer_stretches_source() {
        let mut canvas = black_canvas(40, 30);
        canvas.draw_layer(&layer(3, 7, [50, 60, 70, 255]), Rect::from_size(40, 30), 255);
        let pixel = canvas.pixels().get_pixel(39, 29);
        assert!(pixel.0[0].abs_diff(50) <= 1);
        assert!(pixel.0[2].abs_diff(70) <= 1);
    }

    #[test]
    fn test_draw_layer_into_sub_rect() {
        let mut canvas = black_canvas(6, 6);
        canvas.draw_layer(&layer(2, 2, [255, 0, 0, 255]), Rect::new(2, 2, 2, 2), 255);
        assert_eq!(canvas.pixels().get_pixel(2, 2), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.pixels().get_pixel(3, 3), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.pixels().get_pixel(1, 1), &Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.pixels().get_pixel(4, 4), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_draw_layer_partially_outside_is_clipped() {
        let mut canvas = black_canvas(4, 4);
        canvas.draw_layer(&layer(4, 4, [0, 0, 255, 255]), Rect::new(2, 2, 4, 4), 255);
        assert_eq!(canvas.pixels().get_pixel(3, 3), &Rgba([0, 0, 255, 255]));
        assert_eq!(canvas.pixels().get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    // ========================================================================
    // Buffer access
    // ========================================================================

    #[test]
    fn test_take_pixels_leaves_empty_canvas() {
        let mut canvas = black_canvas(3, 3);
        let pixels = canvas.take_pixels();
        assert_eq!(pixels.dimensions(), (3, 3));
        assert_eq!(canvas.dimensions(), (0, 0));
    }

    #[test]
    fn test_to_rgb_drops_alpha() {
        let canvas = black_canvas(2, 1);
        let rgb = canvas.to_rgb();
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([0, 0, 0]));
    }
}
