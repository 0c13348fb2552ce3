//! Shared test fixtures.

use std::path::{Path, PathBuf};

use crate::app::LoopControl;
use crate::assets::Assets;
use crate::display::headless::HeadlessScreen;
use crate::error::Result;
use crate::events::{Event, EventContext, EventManager};
use crate::math::{Rect, Size, Vec2};
use crate::renderer::Renderer;
use crate::renderer::canvas::{Canvas, CornerRadii, Surface};
use crate::renderer::color::Color;
use crate::scene::SceneContext;

/// A draw primitive as seen by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill {
        color: Color,
        rect: Rect,
    },
    Blit {
        pos: Vec2,
        size: Size,
        alpha: u8,
    },
    Line {
        color: Color,
        start: Vec2,
        end: Vec2,
        width: u32,
    },
    Rect {
        color: Color,
        rect: Rect,
        radii: Option<CornerRadii>,
    },
}

/// A canvas that records calls instead of painting.
pub struct RecordingCanvas {
    size: Size,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn fill(&mut self, color: Color, rect: Rect) {
        self.ops.push(DrawOp::Fill { color, rect });
    }

    fn blit(&mut self, surface: &Surface, pos: Vec2) {
        self.ops.push(DrawOp::Blit {
            pos,
            size: surface.size(),
            alpha: surface.alpha(),
        });
    }

    fn line(&mut self, color: Color, start: Vec2, end: Vec2, width: u32) {
        self.ops.push(DrawOp::Line {
            color,
            start,
            end,
            width,
        });
    }

    fn rect(&mut self, color: Color, rect: Rect, radii: Option<CornerRadii>) {
        self.ops.push(DrawOp::Rect { color, rect, radii });
    }
}

/// Everything a frame needs, minus the window.
pub struct Harness {
    pub events: EventManager,
    pub renderer: Renderer,
    pub screen: HeadlessScreen,
    pub control: LoopControl,
    pub next_scene: String,
}

impl Harness {
    pub fn new(size: Size) -> Self {
        let events = EventManager::new();
        let renderer = Renderer::new(size, 5, &events).unwrap();
        Self {
            events,
            renderer,
            screen: HeadlessScreen::new(size),
            control: LoopControl::new(),
            next_scene: String::new(),
        }
    }

    pub fn context(&mut self) -> EventContext<'_> {
        EventContext {
            renderer: &mut self.renderer,
            screen: &mut self.screen,
            control: &mut self.control,
        }
    }

    pub fn scene_context<'a>(&'a mut self, assets: &'a mut Assets) -> SceneContext<'a> {
        SceneContext {
            events: &self.events,
            renderer: &mut self.renderer,
            assets,
            next_scene: &mut self.next_scene,
        }
    }

    /// Runs one batch through the harness's own event manager.
    pub fn dispatch(&mut self, batch: Vec<Event>) -> Result<()> {
        let events = self.events.clone();
        events.update(batch, &mut self.context())
    }

    /// Resizes the screen and dispatches the matching event.
    pub fn resize(&mut self, size: Size) -> Result<()> {
        self.screen.resize(size);
        self.dispatch(vec![Event::Resized(size)])
    }
}

/// The assets shipped with the crate.
pub fn bundled_assets() -> Assets {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    Assets::load(&dir, "sweetie-16").unwrap()
}

/// An empty directory unique to this process and `name`.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("zipline-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
