//! Titled, outlined panels laid out relative to the drawable area.
//!
//! A panel spans two relative corners of the drawable area, e.g.
//! `(0.0, 0.0)..(0.66, 0.66)` for the top-left two thirds. Its geometry is
//! recomputed on start and whenever the window is resized, after the renderer
//! has updated the drawable area.

use std::cell::Cell;
use std::rc::Rc;

use super::{GUI_FONT, Object, SceneContext};
use crate::error::Result;
use crate::events::{EventKind, Handler, HandlerGuard};
use crate::math::{Rect, Vec2};
use crate::renderer::{Color, DrawableArea};

/// Colors and sizes of a panel, in unscaled pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStyle {
    /// Body fill.
    pub color: Color,
    /// Outline color.
    pub line_color: Color,
    /// Outline width in pixels.
    pub line_thickness: u32,
    /// Title bar fill.
    pub border_color: Color,
    /// Title bar height.
    pub border_height: f32,
    /// Title color.
    pub text_color: Color,
    /// Title font size.
    pub text_size: f32,
    /// Title x offset from the left edge.
    pub text_x_offset: f32,
}

/// Panel geometry for the current drawable area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanelLayout {
    /// Panel body.
    pub rect: Rect,
    /// Title bar across the top of the body.
    pub border_rect: Rect,
    /// Title x offset, scaled.
    pub text_x_offset: f32,
    /// Height scale the layout was computed for.
    pub scale: f32,
}

impl PanelLayout {
    fn compute(area: &DrawableArea, rel_start: Vec2, rel_end: Vec2, style: &PanelStyle) -> Self {
        let scale = area.height_scale();
        let start = area.relative(rel_start);
        let end = area.relative(rel_end);
        let rect = Rect::from_corners(start, end);
        Self {
            rect,
            border_rect: Rect::new(start.x(), start.y(), rect.width, style.border_height * scale),
            text_x_offset: style.text_x_offset * scale,
            scale,
        }
    }
}

/// A filled rectangle with a title bar and an outline.
pub struct Panel {
    name: String,
    title: String,
    rel_start: Vec2,
    rel_end: Vec2,
    style: PanelStyle,
    layout: Rc<Cell<PanelLayout>>,
    resize: Option<HandlerGuard>,
}

impl Panel {
    /// Creates a panel spanning `rel_start` to `rel_end` of the drawable area.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        rel_start: Vec2,
        rel_end: Vec2,
        style: PanelStyle,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            rel_start,
            rel_end,
            style,
            layout: Rc::default(),
            resize: None,
        }
    }

    /// Geometry from the last start or resize.
    pub fn layout(&self) -> PanelLayout {
        self.layout.get()
    }
}

impl Object for Panel {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        let (rel_start, rel_end, style) = (self.rel_start, self.rel_end, self.style);
        self.layout.set(PanelLayout::compute(
            ctx.renderer.drawable(),
            rel_start,
            rel_end,
            &style,
        ));

        let layout = Rc::clone(&self.layout);
        self.resize = Some(ctx.events.add_scoped(Handler::on(EventKind::Resize, move |ctx| {
            layout.set(PanelLayout::compute(
                ctx.renderer.drawable(),
                rel_start,
                rel_end,
                &style,
            ));
            Ok(())
        })));
        Ok(())
    }

    fn draw(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        let layout = self.layout.get();
        let style = &self.style;
        let rect = layout.rect;

        ctx.renderer.draw_color(0, style.color, rect)?;
        ctx.renderer
            .draw_rect(-2, style.border_color, layout.border_rect, None)?;

        let font = ctx
            .assets
            .font(GUI_FONT, (style.text_size * layout.scale).round())?;
        let title = ctx.assets.render_text(&font, &self.title, style.text_color);
        let title_pos = rect.top_left() + Vec2::new(layout.text_x_offset, 0.0);
        ctx.renderer.draw_surface(-1, title, title_pos)?;

        let outline = [
            (rect.top_left(), rect.top_right()),
            (rect.top_left(), rect.bottom_left()),
            (rect.top_right(), rect.bottom_right()),
            (rect.bottom_left(), rect.bottom_right()),
        ];
        for (start, end) in outline {
            ctx.renderer
                .draw_line(-1, style.line_color, start, end, style.line_thickness)?;
        }
        Ok(())
    }

    fn end(&mut self, _ctx: &mut SceneContext<'_>) -> Result<()> {
        self.resize = None;
        Ok(())
    }
}
