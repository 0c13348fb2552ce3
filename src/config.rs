//! Runtime configuration.
//!
//! Settings live in a JSON file, `zipline.json` in the working directory unless
//! another path is given on the command line. Every field is optional; missing
//! fields take their default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::Size;

/// Config file read when no path is given.
pub const DEFAULT_CONFIG: &str = "zipline.json";

/// Settings read at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Window title.
    pub title: String,
    /// Initial window width; also the width the drawable area is designed for.
    pub width: u32,
    /// Initial window height; heights are scaled relative to this.
    pub height: u32,
    /// Whether the user may resize the window.
    pub resizable: bool,
    /// Frame rate cap. 0 runs unpaced.
    pub max_fps: u32,
    /// Image asset used as the window icon.
    pub icon: String,
    /// Directory scanned recursively for images, fonts and palettes.
    pub assets_dir: PathBuf,
    /// Palette every color name is looked up in.
    pub palette: String,
    /// Number of draw layers; at least 1.
    pub layer_count: usize,
    /// Palette color the drawable area is cleared to.
    pub bg_color: String,
    /// Color of the letterbox bars.
    pub outside_color: String,
    /// Scene shown first.
    pub initial_scene: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Zipline Simulation".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            max_fps: 60,
            icon: "zls_icon".to_string(),
            assets_dir: PathBuf::from("assets"),
            palette: "sweetie-16".to_string(),
            layer_count: 5,
            bg_color: "white".to_string(),
            outside_color: "black".to_string(),
            initial_scene: "intro".to_string(),
        }
    }
}

impl Config {
    /// Loads the config from `path`, or from [`DEFAULT_CONFIG`] if `None`.
    ///
    /// A missing default file yields the defaults. A file given explicitly
    /// must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG), false),
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {} found, using default settings", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        if let Err(reason) = config.validate() {
            return Err(ConfigError::Invalid { path, reason });
        }
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Rejects values that would leave the drawable area or the renderer
    /// without any extent.
    fn validate(&self) -> Result<(), &'static str> {
        if self.width == 0 || self.height == 0 {
            return Err("window width and height must be non-zero");
        }
        if self.layer_count == 0 {
            return Err("layer_count must be at least 1");
        }
        Ok(())
    }

    /// The configured window size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
