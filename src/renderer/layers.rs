//! The layered deferred renderer.
//!
//! Draw operations never touch pixels when they are called. Each one captures
//! its arguments in a closure and appends it to a numbered layer; [`Renderer::flush`]
//! later runs layer 0 first, then layer 1 and so on, first-in first-out within
//! a layer, and empties every layer. Objects can therefore draw in any order
//! and still stack correctly.
//!
//! Layer indexes are signed: `-1` is the topmost layer, `-layer_count` the
//! bottom one.
//!
//! The renderer also owns the [`DrawableArea`]. It registers its own resize
//! handler when it is built, so it is the first handler to see a resize and
//! every layout-aware object reads the already-updated area.

use super::canvas::{Canvas, CornerRadii, Surface};
use super::color::Color;
use super::drawable::DrawableArea;
use crate::display::Screen;
use crate::error::RenderError;
use crate::events::{Event, EventKind, EventManager, Handler, HandlerGuard};
use crate::math::{Rect, Size, Vec2};

type DrawCall = Box<dyn FnOnce(&mut dyn Canvas)>;

/// Buffers draw calls per layer and paints them once per frame.
pub struct Renderer {
    layers: Vec<Vec<DrawCall>>,
    area: DrawableArea,
    /// Letterbox bars painted since the last flush.
    bars: Vec<Rect>,
    bg_color: Color,
    outside_color: Color,
    _resize: HandlerGuard,
}

impl Renderer {
    /// Creates a renderer for a window of `original` size and registers its
    /// resize handler on `events`.
    pub fn new(original: Size, layer_count: usize, events: &EventManager) -> Result<Self, RenderError> {
        if layer_count == 0 {
            return Err(RenderError::NoLayers);
        }

        let resize = events.add_scoped(Handler::with_event(EventKind::Resize, |event, ctx| {
            if let Event::Resized(size) = event {
                ctx.renderer.on_resize(*size, &mut *ctx.screen);
            }
            Ok(())
        }));

        Ok(Self {
            layers: (0..layer_count).map(|_| Vec::new()).collect(),
            area: DrawableArea::new(original),
            bars: Vec::new(),
            bg_color: Color::WHITE,
            outside_color: Color::BLACK,
            _resize: resize,
        })
    }

    /// Number of layers draw calls can target.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Number of draw calls waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// The area content is drawn into.
    pub fn drawable(&self) -> &DrawableArea {
        &self.area
    }

    /// Shorthand for [`DrawableArea::height_scale`].
    pub fn height_scale(&self) -> f32 {
        self.area.height_scale()
    }

    /// Color the drawable area is cleared to.
    pub fn bg_color(&self) -> Color {
        self.bg_color
    }

    /// Sets the color the drawable area is cleared to before each frame.
    pub fn set_bg_color(&mut self, color: Color) {
        self.bg_color = color;
    }

    /// Color of the letterbox bars.
    pub fn outside_color(&self) -> Color {
        self.outside_color
    }

    /// Sets the color of the letterbox bars beside the drawable area.
    pub fn set_outside_color(&mut self, color: Color) {
        self.outside_color = color;
    }

    /// Queues a blit of `surface` with its top-left corner at `pos`.
    pub fn draw_surface(
        &mut self,
        layer: isize,
        surface: Surface,
        pos: Vec2,
    ) -> Result<(), RenderError> {
        self.push(layer, move |canvas| canvas.blit(&surface, pos))
    }

    /// Queues a solid fill of `rect`.
    pub fn draw_color(&mut self, layer: isize, color: Color, rect: Rect) -> Result<(), RenderError> {
        self.push(layer, move |canvas| canvas.fill(color, rect))
    }

    /// Queues a line; widths below 1 are drawn 1 pixel wide.
    pub fn draw_line(
        &mut self,
        layer: isize,
        color: Color,
        start: Vec2,
        end: Vec2,
        width: u32,
    ) -> Result<(), RenderError> {
        let width = width.max(1);
        self.push(layer, move |canvas| canvas.line(color, start, end, width))
    }

    /// Queues a filled rectangle with optional rounded corners.
    pub fn draw_rect(
        &mut self,
        layer: isize,
        color: Color,
        rect: Rect,
        radii: Option<CornerRadii>,
    ) -> Result<(), RenderError> {
        self.push(layer, move |canvas| canvas.rect(color, rect, radii))
    }

    /// Paints the frame: clears the drawable area, runs every layer in order,
    /// presents the area and leaves all layers empty.
    ///
    /// Bars painted by a resize earlier in the frame are presented along with
    /// the area, so a resized frame is still presented once. The layers are
    /// emptied even when presenting fails.
    pub fn flush(&mut self, screen: &mut dyn Screen) -> Result<(), RenderError> {
        let rect = self.area.rect();
        let canvas = screen.canvas();
        canvas.fill(self.bg_color, rect);

        let mut executed = 0usize;
        for layer in &mut self.layers {
            for call in layer.drain(..) {
                call(&mut *canvas);
                executed += 1;
            }
        }
        log::trace!("Flushed {} draw calls", executed);

        let mut regions = vec![rect];
        regions.append(&mut self.bars);
        screen.present(&regions)
    }

    /// Maps a signed layer index onto `0..layer_count`.
    fn resolve_layer(&self, layer: isize) -> Result<usize, RenderError> {
        let count = self.layers.len();
        let resolved = if layer < 0 {
            count as isize + layer
        } else {
            layer
        };

        if resolved < 0 || resolved >= count as isize {
            return Err(RenderError::LayerOutOfRange {
                index: layer,
                count,
            });
        }
        Ok(resolved as usize)
    }

    fn push<F>(&mut self, layer: isize, call: F) -> Result<(), RenderError>
    where
        F: FnOnce(&mut dyn Canvas) + 'static,
    {
        let index = self.resolve_layer(layer)?;
        self.layers[index].push(Box::new(call));
        Ok(())
    }

    /// Refits the drawable area and paints the bars. Presenting waits for
    /// the flush at the end of the frame.
    fn on_resize(&mut self, window: Size, screen: &mut dyn Screen) {
        // Minimized windows report a zero size; keep the last layout.
        if window.is_empty() {
            return;
        }

        let fit = self.area.fit(window);
        if let Some(size) = fit.grow_window {
            log::debug!(
                "Window {}x{} too narrow for drawable area, requesting {}x{}",
                window.width,
                window.height,
                size.width,
                size.height
            );
            screen.request_size(size);
        }

        // Only the latest bars matter; the rest of the window is the drawable
        // area, which the flush repaints.
        self.bars = [fit.left_bar, fit.right_bar]
            .into_iter()
            .filter(|bar| !bar.is_empty())
            .collect();
        let canvas = screen.canvas();
        for bar in &self.bars {
            canvas.fill(self.outside_color, *bar);
        }

        let rect = self.area.rect();
        log::debug!(
            "Drawable area {}x{} at ({}, {}), height scale {:.3}",
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            self.area.height_scale()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawOp, Harness};

    const RED: Color = Color::rgb(255, 0, 0);
    const GREEN: Color = Color::rgb(0, 255, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);
    const GRAY: Color = Color::rgb(128, 128, 128);

    fn fill_colors(ops: &[DrawOp]) -> Vec<Color> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Fill { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_layers_run_in_order() {
        let mut harness = Harness::new(Size::new(800, 600));
        let unit = Rect::new(0.0, 0.0, 1.0, 1.0);
        harness.renderer.draw_color(2, BLUE, unit).unwrap();
        harness.renderer.draw_color(0, RED, unit).unwrap();
        harness.renderer.draw_color(-1, GRAY, unit).unwrap();
        harness.renderer.draw_color(2, GREEN, unit).unwrap();
        harness.renderer.draw_color(0, BLUE, unit).unwrap();

        harness.renderer.flush(&mut harness.screen).unwrap();

        assert_eq!(
            fill_colors(harness.screen.canvas.ops()),
            vec![Color::WHITE, RED, BLUE, BLUE, GREEN, GRAY]
        );
    }

    #[test]
    fn test_flush_resets_layers() {
        let mut harness = Harness::new(Size::new(800, 600));
        harness
            .renderer
            .draw_line(1, RED, Vec2::ZERO, Vec2::new(10.0, 0.0), 2)
            .unwrap();
        assert_eq!(harness.renderer.pending(), 1);

        harness.renderer.flush(&mut harness.screen).unwrap();
        assert_eq!(harness.renderer.pending(), 0);
        harness.screen.canvas.clear();

        harness.renderer.flush(&mut harness.screen).unwrap();
        assert_eq!(
            harness.screen.canvas.ops(),
            &[DrawOp::Fill {
                color: Color::WHITE,
                rect: Rect::new(0.0, 0.0, 800.0, 600.0),
            }]
        );
        assert_eq!(harness.screen.presented.len(), 2);
    }

    #[test]
    fn test_negative_layer_indexes() {
        let harness = Harness::new(Size::new(800, 600));
        let renderer = &harness.renderer;
        assert_eq!(renderer.resolve_layer(-1).unwrap(), 4);
        assert_eq!(renderer.resolve_layer(-5).unwrap(), 0);
        assert_eq!(renderer.resolve_layer(0).unwrap(), 0);
        assert_eq!(renderer.resolve_layer(4).unwrap(), 4);
    }

    #[test]
    fn test_layer_out_of_range() {
        let mut harness = Harness::new(Size::new(800, 600));
        let unit = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            harness.renderer.draw_color(5, RED, unit),
            Err(RenderError::LayerOutOfRange { index: 5, count: 5 })
        ));
        assert!(matches!(
            harness.renderer.draw_color(-6, RED, unit),
            Err(RenderError::LayerOutOfRange { index: -6, count: 5 })
        ));
        assert_eq!(harness.renderer.pending(), 0);
    }

    #[test]
    fn test_resize_on_wide_window() {
        let mut harness = Harness::new(Size::new(800, 600));
        harness.screen.resize(Size::new(1600, 900));
        harness.dispatch(vec![Event::Resized(Size::new(1600, 900))]).unwrap();

        let area = harness.renderer.drawable();
        assert_eq!(area.size(), Vec2::new(1200.0, 900.0));
        assert_eq!(area.pos(), Vec2::new(200.0, 0.0));
        assert_eq!(area.height_scale(), 1.5);
        assert!(harness.screen.requested.is_empty());

        let left = Rect::new(0.0, 0.0, 200.0, 900.0);
        let right = Rect::new(1400.0, 0.0, 200.0, 900.0);
        assert!(harness.screen.presented.is_empty());
        assert_eq!(
            harness.screen.canvas.ops(),
            &[
                DrawOp::Fill {
                    color: Color::BLACK,
                    rect: left
                },
                DrawOp::Fill {
                    color: Color::BLACK,
                    rect: right
                },
            ]
        );
    }

    #[test]
    fn test_resize_on_narrow_window_grows_it() {
        let mut harness = Harness::new(Size::new(800, 600));
        harness.screen.resize(Size::new(1000, 900));
        harness.dispatch(vec![Event::Resized(Size::new(1000, 900))]).unwrap();

        assert_eq!(harness.screen.requested, vec![Size::new(1200, 900)]);
        assert_eq!(harness.screen.size(), Size::new(1200, 900));
        assert_eq!(
            harness.renderer.drawable().rect(),
            Rect::new(0.0, 0.0, 1200.0, 900.0)
        );
        assert_eq!(harness.renderer.height_scale(), 1.5);
    }

    #[test]
    fn test_minimized_window_keeps_layout() {
        let mut harness = Harness::new(Size::new(800, 600));
        harness.dispatch(vec![Event::Resized(Size::new(0, 0))]).unwrap();

        assert_eq!(
            harness.renderer.drawable().rect(),
            Rect::new(0.0, 0.0, 800.0, 600.0)
        );
        assert!(harness.screen.presented.is_empty());
    }

    #[test]
    fn test_flush_paints_background_in_drawable_area() {
        let mut harness = Harness::new(Size::new(800, 600));
        harness.renderer.set_bg_color(GRAY);
        harness.screen.resize(Size::new(1600, 900));
        harness.dispatch(vec![Event::Resized(Size::new(1600, 900))]).unwrap();
        harness.screen.canvas.clear();

        harness.renderer.flush(&mut harness.screen).unwrap();
        let drawable = Rect::new(200.0, 0.0, 1200.0, 900.0);
        assert_eq!(
            harness.screen.canvas.ops(),
            &[DrawOp::Fill {
                color: GRAY,
                rect: drawable
            }]
        );
        assert_eq!(harness.screen.presented.len(), 1);
    }

    #[test]
    fn test_resized_frame_presents_once() {
        let mut harness = Harness::new(Size::new(800, 600));
        harness.resize(Size::new(1600, 900)).unwrap();
        harness.renderer.flush(&mut harness.screen).unwrap();

        let drawable = Rect::new(200.0, 0.0, 1200.0, 900.0);
        let left = Rect::new(0.0, 0.0, 200.0, 900.0);
        let right = Rect::new(1400.0, 0.0, 200.0, 900.0);
        assert_eq!(harness.screen.presented, vec![vec![drawable, left, right]]);

        // The bars are not presented again on the next frame.
        harness.renderer.flush(&mut harness.screen).unwrap();
        assert_eq!(harness.screen.presented.last(), Some(&vec![drawable]));
    }

    #[test]
    fn test_zero_layers_are_rejected() {
        let events = EventManager::new();
        assert!(matches!(
            Renderer::new(Size::new(800, 600), 0, &events),
            Err(RenderError::NoLayers)
        ));
        assert_eq!(events.len(), 0);
    }
}
