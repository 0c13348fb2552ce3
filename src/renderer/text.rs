//! Text rasterization.
//!
//! Text is shaped with glyphon's font system and rasterized on the CPU through
//! the swash cache into a tight RGBA [`Surface`], which is then drawn like any
//! other image. Rendered strings are cached; the cache is bounded and evicts
//! the oldest entry first.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use glyphon::{Attrs, Buffer, Color as GlyphColor, Family, FontSystem, Metrics, Shaping, SwashCache, fontdb};
use image::{Rgba, RgbaImage};

use super::canvas::Surface;
use super::color::Color;

/// Maximum number of rendered strings kept around.
pub const TEXT_CACHE_CAPACITY: usize = 256;

const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// A font family at a pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    family: String,
    size: f32,
}

impl Font {
    /// A font of `family` at `size` pixels; sizes below 1 are raised to 1.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size: size.max(1.0),
        }
    }

    /// Font family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Pixel size.
    pub fn size(&self) -> f32 {
        self.size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TextKey {
    family: String,
    size_bits: u32,
    text: String,
    color: Color,
}

/// Shapes and rasterizes text into surfaces.
pub struct TextRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    cache: HashMap<TextKey, Surface>,
    order: VecDeque<TextKey>,
}

impl TextRasterizer {
    /// Creates a rasterizer that knows no fonts yet.
    ///
    /// Only fonts registered with [`TextRasterizer::load_font`] are used, so
    /// the output does not depend on what the host has installed.
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new_with_locale_and_db(
                "en-US".to_string(),
                fontdb::Database::new(),
            ),
            swash_cache: SwashCache::new(),
            cache: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Registers font file contents and returns the family names they provide.
    pub fn load_font(&mut self, data: Vec<u8>) -> Vec<String> {
        let db = self.font_system.db_mut();
        let ids = db.load_font_source(fontdb::Source::Binary(Arc::new(data)));

        let mut families: Vec<String> = ids
            .iter()
            .filter_map(|id| db.face(*id))
            .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .collect();
        families.dedup();
        families
    }

    /// Number of strings currently cached.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Renders `text` in `font` and `color`.
    ///
    /// Text that shapes to no glyphs (an empty string, or no font loaded at
    /// all) yields a 1x1 transparent surface.
    pub fn render(&mut self, font: &Font, text: &str, color: Color) -> Surface {
        let key = TextKey {
            family: font.family.clone(),
            size_bits: font.size.to_bits(),
            text: text.to_string(),
            color,
        };
        if let Some(surface) = self.cache.get(&key) {
            return surface.clone();
        }

        let surface = Surface::new(self.rasterize(font, text, color));
        if self.order.len() >= TEXT_CACHE_CAPACITY {
            if let Some(oldest) = self.order.pop_front() {
                self.cache.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.cache.insert(key, surface.clone());
        surface
    }

    fn rasterize(&mut self, font: &Font, text: &str, color: Color) -> RgbaImage {
        // Shaping with an empty database panics inside cosmic-text.
        if text.is_empty() || self.font_system.db().is_empty() {
            return RgbaImage::from_pixel(1, 1, Rgba([0; 4]));
        }

        let line_height = (font.size * LINE_HEIGHT_FACTOR).ceil();
        let mut buffer = Buffer::new(&mut self.font_system, Metrics::new(font.size, line_height));
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(
            &mut self.font_system,
            text,
            Attrs::new().family(Family::Name(&font.family)),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);

        let (width, height) = buffer
            .layout_runs()
            .filter(|run| !run.glyphs.is_empty())
            .fold((0.0f32, 0.0f32), |(width, height), run| {
                (width.max(run.line_w), height.max(run.line_top + line_height))
            });
        let width = (width.ceil() as u32).max(1);
        let height = (height.ceil() as u32).max(1);

        let mut image = RgbaImage::new(width, height);
        let base = GlyphColor::rgba(color.r, color.g, color.b, color.a);
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            base,
            |x, y, w, h, pixel| {
                for py in y.max(0)..(y + h as i32).min(height as i32) {
                    for px in x.max(0)..(x + w as i32).min(width as i32) {
                        let target = image.get_pixel_mut(px as u32, py as u32);
                        // Overlapping glyph boxes keep the stronger coverage.
                        if pixel.a() > target.0[3] {
                            target.0 = [pixel.r(), pixel.g(), pixel.b(), pixel.a()];
                        }
                    }
                }
            },
        );
        image
    }
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rasterizer_with_bundled_font() -> (TextRasterizer, String) {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/DejaVuSans.ttf");
        let data = std::fs::read(path).unwrap();
        let mut rasterizer = TextRasterizer::new();
        let families = rasterizer.load_font(data);
        assert_eq!(families, vec!["DejaVu Sans".to_string()]);
        (rasterizer, families[0].clone())
    }

    #[test]
    fn test_render_produces_visible_pixels() {
        let (mut rasterizer, family) = rasterizer_with_bundled_font();
        let surface = rasterizer.render(&Font::new(family, 24.0), "Zipline", Color::BLACK);

        assert!(surface.width() > 24);
        assert!(surface.height() >= 24);
        assert!(surface.image().pixels().any(|p| p.0[3] > 0));
    }

    #[test]
    fn test_no_fonts_is_blank() {
        let mut rasterizer = TextRasterizer::new();
        let surface = rasterizer.render(&Font::new("Nope", 20.0), "text", Color::BLACK);
        assert_eq!(surface.size(), crate::math::Size::new(1, 1));
        assert_eq!(surface.image().get_pixel(0, 0).0, [0; 4]);
    }

    #[test]
    fn test_empty_text_is_blank() {
        let (mut rasterizer, family) = rasterizer_with_bundled_font();
        let surface = rasterizer.render(&Font::new(family, 20.0), "", Color::BLACK);
        assert_eq!(surface.size(), crate::math::Size::new(1, 1));
    }

    #[test]
    fn test_cache_is_bounded() {
        let (mut rasterizer, family) = rasterizer_with_bundled_font();
        let font = Font::new(family, 8.0);
        for i in 0..TEXT_CACHE_CAPACITY + 10 {
            rasterizer.render(&font, &i.to_string(), Color::BLACK);
        }
        assert_eq!(rasterizer.cached(), TEXT_CACHE_CAPACITY);

        rasterizer.render(&font, "0", Color::WHITE);
        assert_eq!(rasterizer.cached(), TEXT_CACHE_CAPACITY);
    }
}
