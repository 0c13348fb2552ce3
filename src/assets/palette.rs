//! Named color palettes.
//!
//! A palette is stored as two line-aligned text files: `<name>.hex` with one
//! `RRGGBB` color per line and `<name>.map` with one name per line. Line *i* of
//! the map names line *i* of the hex file.

use std::collections::HashMap;

use crate::error::AssetError;
use crate::renderer::color::Color;

/// Colors by name, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colors: HashMap<String, Color>,
    names: Vec<String>,
}

impl Palette {
    /// Color registered under `name`.
    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    /// Color names in the order they were listed.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of named colors.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if the palette names no colors.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Joins the lines of a hex file and a map file into a [`Palette`].
///
/// Trailing blank lines are ignored. A name listed twice keeps its last color.
pub fn parse_palette(hex_text: &str, map_text: &str) -> Result<Palette, AssetError> {
    let hex_lines: Vec<&str> = hex_text.trim_end().lines().collect();
    let names: Vec<&str> = map_text.trim_end().lines().map(str::trim).collect();

    if hex_lines.len() != names.len() {
        return Err(AssetError::PaletteMismatch {
            hex: hex_lines.len(),
            names: names.len(),
        });
    }

    let mut palette = Palette::default();
    for (index, (hex, name)) in hex_lines.iter().zip(&names).enumerate() {
        let color = Color::from_hex(hex, index + 1)?;
        if palette.colors.insert(name.to_string(), color).is_none() {
            palette.names.push(name.to_string());
        }
    }
    Ok(palette)
}
