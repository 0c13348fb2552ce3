//! Error types for the simulation.
//!
//! Every fallible layer has its own error enum; [`Error`] aggregates them so the
//! frame loop and startup code can propagate with `?`. Nothing in here is retried:
//! asset and config errors abort startup, and any error raised while a frame is
//! running aborts that frame and stops the loop.

use std::path::PathBuf;

use crate::events::HandlerId;

/// Errors raised while locating, reading or decoding assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// An asset file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An image file could not be decoded.
    #[error("failed to decode image {path}: {source}")]
    Image {
        /// The image file that failed.
        path: PathBuf,
        /// The decoder error.
        source: image::ImageError,
    },

    /// A font file contained no usable faces.
    #[error("font {0} contains no usable faces")]
    Font(PathBuf),

    /// Two files of the same kind share a stem.
    #[error("duplicate {kind} asset '{name}' ({first} and {second})")]
    Duplicate {
        /// Asset kind ("image", "font", "palette").
        kind: &'static str,
        /// The shared stem.
        name: String,
        /// Path registered first.
        first: PathBuf,
        /// Path that collided.
        second: PathBuf,
    },

    /// A lookup by name found nothing.
    #[error("no {kind} asset named '{name}'")]
    Missing {
        /// Asset kind ("image", "font", "color", "palette").
        kind: &'static str,
        /// The requested name.
        name: String,
    },

    /// Hex and map files of a palette have different line counts.
    #[error("palette has {hex} colors but {names} names")]
    PaletteMismatch {
        /// Number of color lines.
        hex: usize,
        /// Number of name lines.
        names: usize,
    },

    /// A palette line is not a `RRGGBB` color.
    #[error("line {line}: '{value}' is not a RRGGBB color")]
    BadHex {
        /// One-based line number in the hex file.
        line: usize,
        /// The offending text.
        value: String,
    },
}

/// Errors raised by the renderer and the presentation layer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A draw call addressed a layer outside `-count..count`.
    #[error("layer index {index} is out of range for {count} layers")]
    LayerOutOfRange {
        /// The requested index.
        index: isize,
        /// The configured layer count.
        count: usize,
    },

    /// A renderer was asked for zero layers.
    #[error("a renderer needs at least one layer")]
    NoLayers,

    /// No adapter matched the window surface.
    #[error("no suitable graphics adapter: {0}")]
    Adapter(String),

    /// The device request was refused.
    #[error("failed to create graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The window surface could not be created.
    #[error("failed to create window surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// The surface supports no usable texture format.
    #[error("surface supports no usable texture format")]
    SurfaceFormat,

    /// The next swapchain texture could not be acquired.
    #[error("failed to acquire surface texture: {0}")]
    Acquire(#[from] wgpu::SurfaceError),

    /// The platform refused to open the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

/// Errors raised by misuse of the event manager.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The handler is not registered or its removal is already queued.
    #[error("handler {0} is not registered")]
    UnknownHandler(HandlerId),
}

/// Errors raised while reading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// The config file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid JSON for [`crate::config::Config`].
    #[error("invalid config {path}: {source}")]
    Parse {
        /// The config file.
        path: PathBuf,
        /// The parser error.
        source: serde_json::Error,
    },

    /// The file parsed but holds a value the simulation cannot run with.
    #[error("invalid config {path}: {reason}")]
    Invalid {
        /// The config file.
        path: PathBuf,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Errors raised by scene switching.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A transition named a scene that was never registered.
    #[error("no scene named '{0}'")]
    Unknown(String),
}

/// Any error the simulation can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Asset loading failed.
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// Rendering or presentation failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The event manager was misused.
    #[error(transparent)]
    Event(#[from] EventError),
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A scene transition failed.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
