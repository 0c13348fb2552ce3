//! 2D vectors.

use std::ops::{Add, Mul, Sub};

/// A 2D point or offset in screen pixels.
///
/// Positions are kept as `f32` so layout math (relative positions, scale
/// factors) does not accumulate rounding; they are rounded only when a draw
/// call finally touches pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2([f32; 2]);

impl Vec2 {
    /// The origin.
    pub const ZERO: Self = Self([0.0, 0.0]);

    /// Creates a vector from its components.
    pub fn new(x: f32, y: f32) -> Self {
        Vec2([x, y])
    }

    /// The x component.
    pub fn x(&self) -> f32 {
        self.0[0]
    }

    /// The y component.
    pub fn y(&self) -> f32 {
        self.0[1]
    }

    /// Component-wise product, used to map relative positions into a rectangle.
    pub fn scale(&self, other: Self) -> Self {
        Vec2([self.x() * other.x(), self.y() * other.y()])
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Vec2([x, y])
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self([self.x() + other.x(), self.y() + other.y()])
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self([self.x() - other.x(), self.y() - other.y()])
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self([self.x() * scalar, self.y() * scalar])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_maps_relative_position() {
        let size = Vec2::new(1200.0, 900.0);
        let relative = Vec2::new(0.5, 0.25);
        assert_eq!(relative.scale(size), Vec2::new(600.0, 225.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(1.0, 1.0);
        assert_eq!(a - b, Vec2::new(2.0, 3.0));
        assert_eq!(a + b, Vec2::new(4.0, 5.0));
        assert_eq!(a * 2.0, Vec2::new(6.0, 8.0));
    }
}
