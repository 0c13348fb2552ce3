//! A screen without a window, for tests.

use super::Screen;
use crate::error::RenderError;
use crate::math::{Rect, Size};
use crate::renderer::canvas::Canvas;
use crate::testing::RecordingCanvas;

/// Records presented regions and size requests instead of showing anything.
///
/// Size requests are granted immediately.
pub struct HeadlessScreen {
    /// Every draw call painted so far.
    pub canvas: RecordingCanvas,
    /// Regions of each present, oldest first.
    pub presented: Vec<Vec<Rect>>,
    /// Sizes asked for through [`Screen::request_size`].
    pub requested: Vec<Size>,
}

impl HeadlessScreen {
    /// A screen of `size` that has presented nothing.
    pub fn new(size: Size) -> Self {
        Self {
            canvas: RecordingCanvas::new(size),
            presented: Vec::new(),
            requested: Vec::new(),
        }
    }

    /// Simulates the user resizing the window.
    pub fn resize(&mut self, size: Size) {
        self.canvas.set_size(size);
    }
}

impl Screen for HeadlessScreen {
    fn size(&self) -> Size {
        self.canvas.size()
    }

    fn resize_surface(&mut self, size: Size) {
        if !size.is_empty() {
            self.resize(size);
        }
    }

    fn request_size(&mut self, size: Size) {
        self.requested.push(size);
        self.canvas.set_size(size);
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        &mut self.canvas
    }

    fn present(&mut self, regions: &[Rect]) -> Result<(), RenderError> {
        self.presented.push(regions.to_vec());
        Ok(())
    }
}
