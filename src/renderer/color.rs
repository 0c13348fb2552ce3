//! RGBA colors.

use crate::error::AssetError;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a `RRGGBB` hex string (an optional leading `#` is accepted).
    ///
    /// `line` is only used to report where a malformed value came from.
    pub fn from_hex(value: &str, line: usize) -> Result<Self, AssetError> {
        let bad = || AssetError::BadHex {
            line,
            value: value.to_string(),
        };
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(bad());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Applies a gamma curve to the color channels, leaving alpha untouched.
    pub fn correct_gamma(self, gamma: f32) -> Self {
        let curve = |c: u8| ((c as f32 / 255.0).powf(gamma) * 255.0).round() as u8;
        Self {
            r: curve(self.r),
            g: curve(self.g),
            b: curve(self.b),
            a: self.a,
        }
    }

    /// Returns the color with its alpha scaled by `alpha / 255`.
    pub fn with_alpha(self, alpha: u8) -> Self {
        Self {
            a: ((self.a as u16 * alpha as u16) / 255) as u8,
            ..self
        }
    }

    /// Converts to an `image` pixel.
    pub fn to_rgba8(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("1a1c2c", 1).unwrap(), Color::rgb(26, 28, 44));
        assert_eq!(Color::from_hex("#FEF89A", 1).unwrap(), Color::rgb(254, 248, 154));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(matches!(
            Color::from_hex("12345", 3),
            Err(AssetError::BadHex { line: 3, .. })
        ));
        assert!(Color::from_hex("zz0000", 1).is_err());
        assert!(Color::from_hex("ééé", 1).is_err());
    }

    #[test]
    fn test_correct_gamma() {
        let black = Color::rgb(26, 28, 44);
        let corrected = black.correct_gamma(1.1);
        assert!(corrected.r < black.r);
        assert_eq!(Color::WHITE.correct_gamma(1.1), Color::WHITE);
        assert_eq!(Color::BLACK.correct_gamma(1.1), Color::BLACK);
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(Color::WHITE.with_alpha(0).a, 0);
        assert_eq!(Color::WHITE.with_alpha(255).a, 255);
        assert_eq!(Color::rgba(0, 0, 0, 128).with_alpha(128).a, 64);
    }
}
