//! Rectangles and integer sizes.

use super::vec::Vec2;

/// An integer pixel size, as reported by the window system.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either side is zero (e.g. a minimized window).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The size as a floating point vector.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Size {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

impl From<Size> for winit::dpi::PhysicalSize<u32> {
    fn from(size: Size) -> Self {
        winit::dpi::PhysicalSize::new(size.width, size.height)
    }
}

/// An axis-aligned rectangle in screen pixels, origin at the top-left corner.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width, never negative.
    pub width: f32,
    /// Height, never negative.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle; negative extents are clamped to zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Creates a rectangle from its top-left corner and size.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x(), pos.y(), size.x(), size.y())
    }

    /// Creates a rectangle spanning two corners.
    pub fn from_corners(top_left: Vec2, bottom_right: Vec2) -> Self {
        Self::from_pos_size(top_left, bottom_right - top_left)
    }

    /// Covers a whole integer size starting at the origin.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width as f32, size.height as f32)
    }

    /// Top-left corner.
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// X of the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Y of the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    pub fn top_left(&self) -> Vec2 {
        self.pos()
    }

    /// Top-right corner.
    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.y)
    }

    /// Bottom-left corner.
    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.x, self.bottom())
    }

    /// Bottom-right corner.
    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// Center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns true if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Snaps the rectangle to whole pixels and clips it to `bounds`.
    ///
    /// Returns `(x, y, width, height)` in pixels, or `None` if nothing is left.
    pub fn clip_to(&self, bounds: Size) -> Option<(u32, u32, u32, u32)> {
        let left = self.x.round().max(0.0);
        let top = self.y.round().max(0.0);
        let right = self.right().round().min(bounds.width as f32);
        let bottom = self.bottom().round().min(bounds.height as f32);

        if right <= left || bottom <= top {
            return None;
        }

        Some((
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }
}
