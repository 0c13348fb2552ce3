//! The winit window and the screen built on it.

use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Icon;

use super::Screen;
use crate::error::RenderError;
use crate::math::{Rect, Size};
use crate::renderer::canvas::{Canvas, PixelCanvas, Surface};
use crate::renderer::color::Color;
use crate::renderer::wgpu_lib::WgpuPresenter;

/// Thin wrapper over the platform window.
pub struct Window {
    inner: Arc<winit::window::Window>,
}

impl Window {
    /// Opens a window with the given title, inner size and resizability.
    pub fn create(
        event_loop: &ActiveEventLoop,
        title: &str,
        size: Size,
        resizable: bool,
    ) -> Result<Self, RenderError> {
        let attributes = winit::window::Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::from(size))
            .with_resizable(resizable);
        let inner = event_loop.create_window(attributes)?;
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Uses `icon` as the window icon. Platforms that reject it keep their default.
    pub fn set_icon(&self, icon: &Surface) {
        let rgba = icon.image().as_raw().clone();
        match Icon::from_rgba(rgba, icon.width(), icon.height()) {
            Ok(icon) => self.inner.set_window_icon(Some(icon)),
            Err(err) => log::warn!("Window icon rejected: {}", err),
        }
    }

    /// Current inner size in physical pixels.
    pub fn inner_size(&self) -> Size {
        self.inner.inner_size().into()
    }

    /// Requests a new inner size. Returns the size if the platform applied it
    /// immediately; otherwise a resize event follows later.
    pub fn request_size(&self, size: Size) -> Option<Size> {
        self.inner
            .request_inner_size(PhysicalSize::from(size))
            .map(Size::from)
    }

    /// Schedules a `RedrawRequested` event.
    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    fn handle(&self) -> Arc<winit::window::Window> {
        Arc::clone(&self.inner)
    }
}

/// A [`Screen`] backed by a window, a pixel canvas and a WGPU presenter.
pub struct WgpuScreen {
    window: Window,
    canvas: PixelCanvas,
    presenter: WgpuPresenter,
}

impl WgpuScreen {
    /// Creates the surface and presenter for `window`.
    pub async fn new(instance: &wgpu::Instance, window: Window) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let size = Size::new(size.width.max(1), size.height.max(1));
        let surface = instance.create_surface(window.handle())?;
        let presenter = WgpuPresenter::new(instance, surface, size).await?;

        Ok(Self {
            window,
            canvas: PixelCanvas::new(size, Color::BLACK),
            presenter,
        })
    }

    /// The window presented to.
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Screen for WgpuScreen {
    fn size(&self) -> Size {
        self.canvas.size()
    }

    fn resize_surface(&mut self, size: Size) {
        if size.is_empty() {
            return;
        }
        self.presenter.resize(size);
        self.canvas.resize(size, Color::BLACK);
    }

    fn request_size(&mut self, size: Size) {
        if let Some(applied) = self.window.request_size(size) {
            self.resize_surface(applied);
        }
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        &mut self.canvas
    }

    fn present(&mut self, regions: &[Rect]) -> Result<(), RenderError> {
        self.presenter.present(&self.canvas, regions)
    }
}
