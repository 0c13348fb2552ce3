//! Asset loading.
//!
//! Everything under the assets directory is scanned once at startup. Files are
//! classified by suffix and keyed by their file stem, so `images/zls_icon.png`
//! is the image `zls_icon` regardless of the folder it sits in:
//!
//! | Suffix                 | Kind    |
//! |------------------------|---------|
//! | `.png` `.jpg` `.jpeg` `.bmp` | image |
//! | `.ttf` `.otf`          | font    |
//! | `.hex` (+ sibling `.map`) | palette |
//!
//! Any read or decode failure is returned from [`Assets::load`]; the caller is
//! expected to abort startup.

pub mod palette;

pub use palette::{Palette, parse_palette};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AssetError;
use crate::renderer::canvas::Surface;
use crate::renderer::color::Color;
use crate::renderer::text::{Font, TextRasterizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AssetKind {
    Image,
    Font,
    Palette,
}

impl AssetKind {
    fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "png" | "jpg" | "jpeg" | "bmp" => Some(AssetKind::Image),
            "ttf" | "otf" => Some(AssetKind::Font),
            "hex" => Some(AssetKind::Palette),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Font => "font",
            AssetKind::Palette => "palette",
        }
    }
}

/// Images, fonts and palettes loaded from disk.
pub struct Assets {
    images: HashMap<String, Surface>,
    fonts: HashMap<String, String>,
    palettes: HashMap<String, Palette>,
    palette: String,
    text: TextRasterizer,
}

impl Assets {
    /// Loads every asset below `dir` and selects `palette` for [`Assets::color`].
    pub fn load(dir: &Path, palette: &str) -> Result<Self, AssetError> {
        let mut files = Vec::new();
        collect_files(dir, &mut files)?;
        files.sort();

        let mut assets = Self {
            images: HashMap::new(),
            fonts: HashMap::new(),
            palettes: HashMap::new(),
            palette: palette.to_string(),
            text: TextRasterizer::new(),
        };
        let mut seen: HashMap<(AssetKind, String), PathBuf> = HashMap::new();

        for path in files {
            let Some(kind) = AssetKind::from_path(&path) else {
                continue;
            };
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                log::warn!("Skipping asset with a non UTF-8 name: {}", path.display());
                continue;
            };

            if let Some(first) = seen.get(&(kind, name.clone())) {
                return Err(AssetError::Duplicate {
                    kind: kind.label(),
                    name,
                    first: first.clone(),
                    second: path,
                });
            }

            match kind {
                AssetKind::Image => {
                    let surface = load_image(&path)?;
                    assets.images.insert(name.clone(), surface);
                }
                AssetKind::Font => {
                    let data = read(&path)?;
                    let families = assets.text.load_font(data);
                    let family = families
                        .into_iter()
                        .next()
                        .ok_or_else(|| AssetError::Font(path.clone()))?;
                    assets.fonts.insert(name.clone(), family);
                }
                AssetKind::Palette => {
                    let hex = fs::read_to_string(&path).map_err(|source| AssetError::Io {
                        path: path.clone(),
                        source,
                    })?;
                    let map_path = path.with_extension("map");
                    let map = fs::read_to_string(&map_path).map_err(|source| AssetError::Io {
                        path: map_path.clone(),
                        source,
                    })?;
                    assets.palettes.insert(name.clone(), parse_palette(&hex, &map)?);
                }
            }
            log::debug!("Loaded {} '{}' from {}", kind.label(), name, path.display());
            seen.insert((kind, name), path);
        }

        if !assets.palettes.contains_key(palette) {
            return Err(AssetError::Missing {
                kind: "palette",
                name: palette.to_string(),
            });
        }

        log::info!(
            "Loaded {} images, {} fonts and {} palettes from {}",
            assets.images.len(),
            assets.fonts.len(),
            assets.palettes.len(),
            dir.display()
        );
        Ok(assets)
    }

    /// Image named after its file stem.
    pub fn image(&self, name: &str) -> Result<Surface, AssetError> {
        self.images.get(name).cloned().ok_or_else(|| AssetError::Missing {
            kind: "image",
            name: name.to_string(),
        })
    }

    /// Looks up a font by file stem at a pixel size.
    pub fn font(&self, name: &str, size: f32) -> Result<Font, AssetError> {
        self.fonts
            .get(name)
            .map(|family| Font::new(family.as_str(), size))
            .ok_or_else(|| AssetError::Missing {
                kind: "font",
                name: name.to_string(),
            })
    }

    /// Looks up a color in the selected palette.
    pub fn color(&self, name: &str) -> Result<Color, AssetError> {
        self.palettes
            .get(&self.palette)
            .and_then(|palette| palette.get(name))
            .ok_or_else(|| AssetError::Missing {
                kind: "color",
                name: name.to_string(),
            })
    }

    /// Palette loaded from `<name>.hex` and `<name>.map`.
    pub fn palette(&self, name: &str) -> Result<&Palette, AssetError> {
        self.palettes.get(name).ok_or_else(|| AssetError::Missing {
            kind: "palette",
            name: name.to_string(),
        })
    }

    /// Rasterizes `text`; repeated requests are served from a bounded cache.
    pub fn render_text(&mut self, font: &Font, text: &str, color: Color) -> Surface {
        self.text.render(font, text, color)
    }
}

fn read(path: &Path) -> Result<Vec<u8>, AssetError> {
    fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_image(path: &Path) -> Result<Surface, AssetError> {
    let image = image::open(path).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Surface::new(image.to_rgba8()))
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), AssetError> {
    let io_error = |source| AssetError::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bundled_assets, scratch_dir};

    #[test]
    fn test_load_bundled_assets() {
        let assets = bundled_assets();

        assert_eq!(assets.color("black").unwrap(), Color::rgb(26, 28, 44));
        assert_eq!(assets.image("zls_icon").unwrap().size().width, 32);
        assert_eq!(assets.font("DejaVuSans", 12.0).unwrap().family(), "DejaVu Sans");
        assert_eq!(assets.palette("sweetie-16").unwrap().len(), 16);
    }

    #[test]
    fn test_missing_names() {
        let assets = bundled_assets();
        assert!(matches!(
            assets.image("nope"),
            Err(AssetError::Missing { kind: "image", .. })
        ));
        assert!(matches!(
            assets.color("nope"),
            Err(AssetError::Missing { kind: "color", .. })
        ));
        assert!(assets.font("nope", 10.0).is_err());
    }

    #[test]
    fn test_duplicate_stems_are_rejected() {
        let dir = scratch_dir("duplicate-stems");
        fs::create_dir_all(dir.join("a")).unwrap();
        fs::create_dir_all(dir.join("b")).unwrap();
        fs::write(dir.join("a/pal.hex"), "1a1c2c\n").unwrap();
        fs::write(dir.join("a/pal.map"), "black\n").unwrap();
        fs::write(dir.join("b/pal.hex"), "1a1c2c\n").unwrap();
        fs::write(dir.join("b/pal.map"), "black\n").unwrap();

        let result = Assets::load(&dir, "pal");
        assert!(matches!(
            result,
            Err(AssetError::Duplicate { kind: "palette", .. })
        ));
    }

    #[test]
    fn test_unknown_palette_is_fatal() {
        let dir = scratch_dir("unknown-palette");
        fs::write(dir.join("pal.hex"), "1a1c2c\n").unwrap();
        fs::write(dir.join("pal.map"), "black\n").unwrap();

        let result = Assets::load(&dir, "other");
        assert!(matches!(
            result,
            Err(AssetError::Missing { kind: "palette", .. })
        ));
    }

    #[test]
    fn test_palette_without_map_is_fatal() {
        let dir = scratch_dir("palette-without-map");
        fs::write(dir.join("pal.hex"), "1a1c2c\n").unwrap();

        assert!(matches!(
            Assets::load(&dir, "pal"),
            Err(AssetError::Io { .. })
        ));
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = scratch_dir("missing-directory").join("absent");
        assert!(matches!(
            Assets::load(&dir, "pal"),
            Err(AssetError::Io { .. })
        ));
    }
}
