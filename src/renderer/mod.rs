//! Main renderer module.
//!
//! Drawing is split in two halves. The CPU half ([`layers`], [`canvas`],
//! [`text`]) turns deferred draw calls into pixels; the GPU half
//! ([`wgpu_lib`], [`pipeline_builder`]) only uploads those pixels and puts
//! them on screen with a single textured quad.

/// Deferred canvas primitives and the pixel buffer they run against.
pub mod canvas;
/// RGBA color values.
pub mod color;
/// Aspect-locked drawable area and letterboxing.
pub mod drawable;
/// The layered deferred renderer.
pub mod layers;
/// The pass that draws the canvas texture to the surface.
pub mod pipeline_builder;
/// Text shaping and rasterization.
pub mod text;
/// Presents the canvas through WGPU.
pub mod wgpu_lib;

pub use canvas::{Canvas, CornerRadii, PixelCanvas, Surface};
pub use color::Color;
pub use drawable::DrawableArea;
pub use layers::Renderer;
