//! State of a running simulation.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use winit::event_loop::ActiveEventLoop;

use super::{FrameClock, LoopControl};
use crate::assets::Assets;
use crate::config::Config;
use crate::display::{Screen, WgpuScreen, Window};
use crate::error::Result;
use crate::events::{Event, EventKind, EventManager, Handler, HandlerGuard};
use crate::renderer::Renderer;
use crate::scene::SceneManager;
use crate::scene::intro::intro_scene;
use crate::scene::visual::visual_scene;

/// Everything that exists once the window is open.
pub struct AppState<S: Screen = WgpuScreen> {
    /// The display frames are painted to.
    pub screen: S,
    /// Handler registry, dispatched once per frame.
    pub events: EventManager,
    /// Layered renderer owning the drawable area.
    pub renderer: Renderer,
    /// Loaded images, fonts and palettes.
    pub assets: Assets,
    /// Registered scenes and the current one.
    pub scenes: SceneManager,
    /// Cleared by the quit handler.
    pub control: LoopControl,
    /// Frame timing and pacing.
    pub clock: FrameClock,
    /// Events received since the last frame.
    pub queue: Vec<Event>,
    pub(super) interrupted: Arc<AtomicBool>,
    _quit: HandlerGuard,
}

impl AppState {
    /// Opens the window and builds the renderer and scenes on it.
    pub async fn new(
        event_loop: &ActiveEventLoop,
        instance: &wgpu::Instance,
        config: &Config,
        assets: Assets,
        interrupted: Arc<AtomicBool>,
    ) -> Result<Self> {
        let window = Window::create(event_loop, &config.title, config.size(), config.resizable)?;
        match assets.image(&config.icon) {
            Ok(icon) => window.set_icon(&icon),
            Err(err) => log::warn!("No window icon: {}", err),
        }
        let screen = WgpuScreen::new(instance, window).await?;
        log::info!(
            "Opened '{}' at {}x{}",
            config.title,
            screen.size().width,
            screen.size().height
        );

        Self::with_screen(screen, config, assets, interrupted)
    }
}

impl<S: Screen> AppState<S> {
    /// Builds the renderer and scenes on an already open screen.
    ///
    /// The renderer is created before anything else registers a handler, so
    /// its resize handler runs first.
    pub fn with_screen(
        screen: S,
        config: &Config,
        assets: Assets,
        interrupted: Arc<AtomicBool>,
    ) -> Result<Self> {
        let events = EventManager::new();
        let mut renderer = Renderer::new(config.size(), config.layer_count, &events)?;
        renderer.set_bg_color(assets.color(&config.bg_color)?);
        renderer.set_outside_color(assets.color(&config.outside_color)?);

        let quit = events.add_scoped(Handler::on(EventKind::Quit, |ctx| {
            ctx.control.exit();
            Ok(())
        }));

        let mut scenes = SceneManager::new(&config.initial_scene);
        scenes.register(intro_scene());
        scenes.register(visual_scene());

        // The platform may not have granted the requested size.
        let mut queue = Vec::new();
        if screen.size() != config.size() {
            queue.push(Event::Resized(screen.size()));
        }

        Ok(Self {
            screen,
            events,
            renderer,
            assets,
            scenes,
            control: LoopControl::new(),
            clock: FrameClock::new(config.max_fps),
            queue,
            interrupted,
            _quit: quit,
        })
    }

    /// Queues an event for the next frame.
    pub fn push_event(&mut self, event: Event) {
        if let Event::Resized(size) = event {
            self.screen.resize_surface(size);
        }
        self.queue.push(event);
    }

    /// Ends the running scene before the window closes.
    pub fn shutdown(&mut self) -> Result<()> {
        self.scenes
            .shutdown(&self.events, &mut self.renderer, &mut self.assets)
    }
}
