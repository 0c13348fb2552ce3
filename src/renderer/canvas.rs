//! CPU draw targets.
//!
//! Deferred draw calls run against the [`Canvas`] trait. [`PixelCanvas`] is the
//! production target: a plain RGBA buffer that the presenter later uploads to
//! the GPU. Everything here works in whole screen pixels; coordinates are
//! rounded at the edge of each primitive.

use std::sync::Arc;

use image::RgbaImage;

use super::color::Color;
use crate::math::{Rect, Size, Vec2};

/// Radii of the four corners of a rounded rectangle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    /// Top-left radius in pixels.
    pub top_left: f32,
    /// Top-right radius in pixels.
    pub top_right: f32,
    /// Bottom-left radius in pixels.
    pub bottom_left: f32,
    /// Bottom-right radius in pixels.
    pub bottom_right: f32,
}

/// An immutable bitmap with a per-surface opacity.
///
/// Cloning only bumps a reference count, so surfaces can be moved into
/// deferred draw calls freely.
#[derive(Debug, Clone)]
pub struct Surface {
    image: Arc<RgbaImage>,
    alpha: u8,
}

impl Surface {
    /// Wraps `image`, fully opaque.
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
            alpha: 255,
        }
    }

    /// Returns a copy drawn at the given opacity (0 is invisible).
    pub fn with_alpha(&self, alpha: u8) -> Self {
        Self {
            image: Arc::clone(&self.image),
            alpha,
        }
    }

    /// Opacity applied on top of the per-pixel alpha.
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width and height in pixels.
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// The pixel data.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// A target that deferred draw calls paint into.
pub trait Canvas {
    /// Pixel size of the target.
    fn size(&self) -> Size;

    /// Fills `rect` with a solid color.
    fn fill(&mut self, color: Color, rect: Rect);

    /// Copies `surface` with its top-left corner at `pos`, blending by alpha.
    fn blit(&mut self, surface: &Surface, pos: Vec2);

    /// Draws a straight line with a square brush `width` pixels wide.
    fn line(&mut self, color: Color, start: Vec2, end: Vec2, width: u32);

    /// Fills a rectangle, optionally with rounded corners.
    fn rect(&mut self, color: Color, rect: Rect, radii: Option<CornerRadii>);
}

/// An RGBA pixel buffer implementing [`Canvas`].
pub struct PixelCanvas {
    image: RgbaImage,
}

impl PixelCanvas {
    /// Allocates a canvas filled with `clear`.
    pub fn new(size: Size, clear: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(size.width, size.height, clear.to_rgba8()),
        }
    }

    /// Reallocates the buffer at a new size, discarding its contents.
    pub fn resize(&mut self, size: Size, clear: Color) {
        if self.size() != size {
            self.image = RgbaImage::from_pixel(size.width, size.height, clear.to_rgba8());
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Copies the pixels of a clipped region into a tightly packed buffer.
    pub fn region_bytes(&self, x: u32, y: u32, width: u32, height: u32) -> Vec<u8> {
        let stride = self.image.width() as usize * 4;
        let raw = self.image.as_raw();
        let mut bytes = Vec::with_capacity(width as usize * height as usize * 4);
        for row in y..y + height {
            let start = row as usize * stride + x as usize * 4;
            bytes.extend_from_slice(&raw[start..start + width as usize * 4]);
        }
        bytes
    }

    fn blend(&mut self, x: u32, y: u32, color: Color) {
        match color.a {
            0 => {}
            255 => self.image.put_pixel(x, y, color.to_rgba8()),
            alpha => {
                let dst = self.image.get_pixel_mut(x, y);
                let a = alpha as u32;
                let mix = |src: u8, dst: u8| ((src as u32 * a + dst as u32 * (255 - a)) / 255) as u8;
                dst.0 = [
                    mix(color.r, dst.0[0]),
                    mix(color.g, dst.0[1]),
                    mix(color.b, dst.0[2]),
                    (a + dst.0[3] as u32 * (255 - a) / 255) as u8,
                ];
            }
        }
    }
}

impl Canvas for PixelCanvas {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    fn fill(&mut self, color: Color, rect: Rect) {
        let Some((x, y, width, height)) = rect.clip_to(self.size()) else {
            return;
        };
        for py in y..y + height {
            for px in x..x + width {
                self.blend(px, py, color);
            }
        }
    }

    fn blit(&mut self, surface: &Surface, pos: Vec2) {
        if surface.alpha() == 0 {
            return;
        }
        let left = pos.x().round() as i64;
        let top = pos.y().round() as i64;
        let size = self.size();

        for (sx, sy, pixel) in surface.image().enumerate_pixels() {
            let dx = left + sx as i64;
            let dy = top + sy as i64;
            if dx < 0 || dy < 0 || dx >= size.width as i64 || dy >= size.height as i64 {
                continue;
            }
            let [r, g, b, a] = pixel.0;
            let color = Color::rgba(r, g, b, a).with_alpha(surface.alpha());
            self.blend(dx as u32, dy as u32, color);
        }
    }

    fn line(&mut self, color: Color, start: Vec2, end: Vec2, width: u32) {
        let width = width.max(1) as f32;
        let delta = end - start;
        let steps = delta.x().abs().max(delta.y().abs()).round().max(1.0) as u32;
        // Brush origin sits so odd widths center on the line.
        let offset = ((width - 1.0) / 2.0).floor();

        let mut stamped = Vec::with_capacity(steps as usize + 1);
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let point = start + delta * t;
            let origin = (point.x().round() - offset, point.y().round() - offset);
            if stamped.last() != Some(&origin) {
                stamped.push(origin);
            }
        }

        // Stamping twice would double-blend translucent lines.
        if color.a == 255 {
            for (x, y) in stamped {
                self.fill(color, Rect::new(x, y, width, width));
            }
        } else {
            let size = self.size();
            let mut covered = vec![false; size.width as usize * size.height as usize];
            for (x, y) in stamped {
                let Some((cx, cy, cw, ch)) = Rect::new(x, y, width, width).clip_to(size) else {
                    continue;
                };
                for py in cy..cy + ch {
                    for px in cx..cx + cw {
                        let index = py as usize * size.width as usize + px as usize;
                        if !covered[index] {
                            covered[index] = true;
                            self.blend(px, py, color);
                        }
                    }
                }
            }
        }
    }

    fn rect(&mut self, color: Color, rect: Rect, radii: Option<CornerRadii>) {
        let Some(radii) = radii else {
            self.fill(color, rect);
            return;
        };
        let Some((x, y, width, height)) = rect.clip_to(self.size()) else {
            return;
        };

        // Radii larger than half the short side would overlap.
        let limit = rect.width.min(rect.height) / 2.0;
        let corners = [
            (radii.top_left.min(limit), rect.x, rect.y, true, true),
            (radii.top_right.min(limit), rect.right(), rect.y, false, true),
            (radii.bottom_left.min(limit), rect.x, rect.bottom(), true, false),
            (radii.bottom_right.min(limit), rect.right(), rect.bottom(), false, false),
        ];

        for py in y..y + height {
            for px in x..x + width {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;
                let outside = corners.iter().any(|&(r, ex, ey, left, top)| {
                    if r <= 0.0 {
                        return false;
                    }
                    let center_x = if left { ex + r } else { ex - r };
                    let center_y = if top { ey + r } else { ey - r };
                    let in_box = (if left { cx < center_x } else { cx > center_x })
                        && (if top { cy < center_y } else { cy > center_y });
                    in_box && (cx - center_x).powi(2) + (cy - center_y).powi(2) > r * r
                });
                if !outside {
                    self.blend(px, py, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    fn pixel(canvas: &PixelCanvas, x: u32, y: u32) -> [u8; 4] {
        canvas.image().get_pixel(x, y).0
    }

    #[test]
    fn test_fill_is_clipped() {
        let mut canvas = PixelCanvas::new(Size::new(10, 10), Color::BLACK);
        canvas.fill(RED, Rect::new(-5.0, 8.0, 8.0, 10.0));

        assert_eq!(pixel(&canvas, 0, 9), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 2, 8), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 3, 8), [0, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 0, 7), [0, 0, 0, 255]);
    }

    #[test]
    fn test_blit_uses_surface_alpha() {
        let mut canvas = PixelCanvas::new(Size::new(4, 4), Color::BLACK);
        let surface = Surface::new(RgbaImage::from_pixel(2, 2, image::Rgba([255, 255, 255, 255])));

        canvas.blit(&surface.with_alpha(0), Vec2::new(0.0, 0.0));
        assert_eq!(pixel(&canvas, 0, 0), [0, 0, 0, 255]);

        canvas.blit(&surface, Vec2::new(1.0, 1.0));
        assert_eq!(pixel(&canvas, 1, 1), [255, 255, 255, 255]);
        assert_eq!(pixel(&canvas, 0, 0), [0, 0, 0, 255]);

        canvas.blit(&surface.with_alpha(128), Vec2::new(2.0, -1.0));
        assert_eq!(pixel(&canvas, 3, 0), [128, 128, 128, 255]);
    }

    #[test]
    fn test_line_width() {
        let mut canvas = PixelCanvas::new(Size::new(10, 10), Color::BLACK);
        canvas.line(RED, Vec2::new(0.0, 5.0), Vec2::new(9.0, 5.0), 3);

        for x in 0..10 {
            assert_eq!(pixel(&canvas, x, 4), [255, 0, 0, 255]);
            assert_eq!(pixel(&canvas, x, 6), [255, 0, 0, 255]);
            assert_eq!(pixel(&canvas, x, 7), [0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_rounded_rect_skips_corners() {
        let mut canvas = PixelCanvas::new(Size::new(20, 20), Color::BLACK);
        canvas.rect(
            RED,
            Rect::new(0.0, 0.0, 20.0, 20.0),
            Some(CornerRadii {
                top_left: 8.0,
                ..CornerRadii::default()
            }),
        );

        assert_eq!(pixel(&canvas, 0, 0), [0, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 19, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 0, 19), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 10, 10), [255, 0, 0, 255]);
    }

    #[test]
    fn test_region_bytes() {
        let mut canvas = PixelCanvas::new(Size::new(4, 4), Color::BLACK);
        canvas.fill(RED, Rect::new(1.0, 1.0, 1.0, 1.0));

        let bytes = canvas.region_bytes(1, 1, 2, 1);
        assert_eq!(bytes, vec![255, 0, 0, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn test_resize_clears() {
        let mut canvas = PixelCanvas::new(Size::new(4, 4), Color::BLACK);
        canvas.resize(Size::new(6, 2), Color::WHITE);
        assert_eq!(canvas.size(), Size::new(6, 2));
        assert_eq!(pixel(&canvas, 5, 1), [255, 255, 255, 255]);
    }
}
