//! Display module.
//!
//! A [`Screen`] is what the renderer paints into and presents from: a CPU
//! canvas plus a way to push finished regions to the user. The production
//! screen is [`window::WgpuScreen`], a winit window whose canvas is uploaded
//! through wgpu. Tests use a headless screen that records what was presented.

#[cfg(test)]
pub mod headless;
pub mod window;

pub use window::{WgpuScreen, Window};

use crate::error::RenderError;
use crate::math::{Rect, Size};
use crate::renderer::canvas::Canvas;

/// A presentable display surface.
pub trait Screen {
    /// Current size in pixels.
    fn size(&self) -> Size;

    /// Adopts a size the platform reported, reallocating the canvas. Zero
    /// sizes from a minimized window are ignored.
    fn resize_surface(&mut self, size: Size);

    /// Asks the platform to resize the display. The request may be applied
    /// later, or not at all.
    fn request_size(&mut self, size: Size);

    /// The canvas draw calls paint into.
    fn canvas(&mut self) -> &mut dyn Canvas;

    /// Shows the given canvas regions to the user.
    fn present(&mut self, regions: &[Rect]) -> Result<(), RenderError>;
}
