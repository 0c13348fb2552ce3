//! Aspect-locked drawable area.

use crate::math::{Rect, Size, Vec2};

/// The part of the window content is painted into.
///
/// The area keeps the aspect ratio of the window's original size. Its height
/// always matches the window height and it is centered horizontally; what is
/// left on either side is the letterbox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawableArea {
    original: Size,
    rect: Rect,
    height_scale: f32,
}

/// Outcome of fitting the drawable area to a new window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// A window size to request, when the window is too narrow for the area.
    pub grow_window: Option<Size>,
    /// Letterbox bar left of the area.
    pub left_bar: Rect,
    /// Letterbox bar right of the area.
    pub right_bar: Rect,
}

impl DrawableArea {
    /// Covers the whole window at its original size.
    pub fn new(original: Size) -> Self {
        Self {
            original,
            rect: Rect::from_size(original),
            height_scale: 1.0,
        }
    }

    /// Refits the area to a new window size.
    ///
    /// If the aspect-correct width is wider than the window, the window is
    /// asked to grow to it rather than the area being clipped. The requested
    /// width is rounded up so the area always fits inside it.
    pub fn fit(&mut self, window: Size) -> Fit {
        let height = window.height as f32;
        let width = self.original.width as f32 * height / self.original.height as f32;

        let mut window_size = window.to_vec2();
        let mut grow_window = None;
        if width > window_size.x() {
            grow_window = Some(Size::new(width.ceil() as u32, window.height));
            window_size = Vec2::new(width, height);
        }

        let pos = Vec2::new((window_size.x() - width) / 2.0, 0.0);
        self.rect = Rect::from_pos_size(pos, Vec2::new(width, height));
        self.height_scale = window_size.y() / self.original.height as f32;

        Fit {
            grow_window,
            left_bar: Rect::from_corners(Vec2::ZERO, self.rect.bottom_left()),
            right_bar: Rect::from_corners(self.rect.top_right(), window_size),
        }
    }

    /// The area in window pixels.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Top-left corner of the area.
    pub fn pos(&self) -> Vec2 {
        self.rect.pos()
    }

    /// Width and height of the area.
    pub fn size(&self) -> Vec2 {
        self.rect.size()
    }

    /// Current height divided by the original height.
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    /// Maps a point given relative to the area (0..1 on both axes) to pixels.
    pub fn relative(&self, point: Vec2) -> Vec2 {
        self.pos() + self.size().scale(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_window() {
        let mut area = DrawableArea::new(Size::new(800, 600));
        let fit = area.fit(Size::new(1600, 900));

        assert_eq!(fit.grow_window, None);
        assert_eq!(area.size(), Vec2::new(1200.0, 900.0));
        assert_eq!(area.pos(), Vec2::new(200.0, 0.0));
        assert_eq!(area.height_scale(), 1.5);
        assert_eq!(fit.left_bar, Rect::new(0.0, 0.0, 200.0, 900.0));
        assert_eq!(fit.right_bar, Rect::new(1400.0, 0.0, 200.0, 900.0));
    }

    #[test]
    fn test_fit_narrow_window_grows_it() {
        let mut area = DrawableArea::new(Size::new(800, 600));
        let fit = area.fit(Size::new(1000, 900));

        assert_eq!(fit.grow_window, Some(Size::new(1200, 900)));
        assert_eq!(area.rect(), Rect::new(0.0, 0.0, 1200.0, 900.0));
        assert!(fit.left_bar.is_empty());
        assert!(fit.right_bar.is_empty());
    }

    #[test]
    fn test_grown_window_holds_fractional_width() {
        let mut area = DrawableArea::new(Size::new(800, 600));
        // 601 * 4 / 3 = 801.33
        let fit = area.fit(Size::new(700, 601));

        let grown = fit.grow_window.unwrap();
        assert_eq!(grown, Size::new(802, 601));
        assert!(grown.width as f32 >= area.rect().width);
    }

    #[test]
    fn test_aspect_is_kept() {
        let mut area = DrawableArea::new(Size::new(800, 600));
        for size in [Size::new(640, 480), Size::new(3000, 700), Size::new(500, 1000)] {
            area.fit(size);
            let ratio = area.size().x() / area.size().y();
            assert!((ratio - 800.0 / 600.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_relative() {
        let mut area = DrawableArea::new(Size::new(800, 600));
        area.fit(Size::new(1600, 900));
        assert_eq!(area.relative(Vec2::new(0.5, 1.0)), Vec2::new(800.0, 900.0));
    }
}
