//! The winit application handler.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::WindowId;

use super::app_state::AppState;
use crate::assets::Assets;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::Event;

/// Drives the simulation from the winit event loop.
///
/// # Lifecycle
/// 1. Created with [`App::new`] before the event loop starts
/// 2. `resumed` opens the window and builds the [`AppState`]
/// 3. Window events are queued; `RedrawRequested` runs a frame
/// 4. The loop exits on quit or on the first error, which [`App::finish`]
///    hands back to the caller
pub struct App {
    instance: wgpu::Instance,
    config: Config,
    assets: Option<Assets>,
    interrupted: Arc<AtomicBool>,
    state: Option<AppState>,
    error: Option<Error>,
}

impl App {
    /// Creates an app that opens its window once the event loop resumes.
    ///
    /// `interrupted` is polled once per frame; setting it queues a quit.
    pub fn new(config: Config, assets: Assets, interrupted: Arc<AtomicBool>) -> Self {
        Self {
            instance: wgpu::Instance::new(&wgpu::InstanceDescriptor::default()),
            config,
            assets: Some(assets),
            interrupted,
            state: None,
            error: None,
        }
    }

    /// Consumes the app, returning the error that stopped the loop, if any.
    pub fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        log::error!("{}", err);
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }

    fn handle_redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let result = state.frame();
        let running = state.control.is_running();
        match result {
            Err(err) => self.fail(event_loop, err),
            Ok(()) if !running => event_loop.exit(),
            Ok(()) => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let Some(assets) = self.assets.take() else {
            return;
        };

        let state = pollster::block_on(AppState::new(
            event_loop,
            &self.instance,
            &self.config,
            assets,
            Arc::clone(&self.interrupted),
        ));
        match state {
            Ok(state) => {
                state.screen.window().request_redraw();
                self.state = Some(state);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        if let WindowEvent::RedrawRequested = event {
            self.handle_redraw(event_loop);
            return;
        }

        let Some(state) = self.state.as_mut() else {
            return;
        };
        if let Some(event) = Event::from_window_event(&event) {
            state.push_event(event);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let deadline = state.clock.deadline();
        if Instant::now() >= deadline {
            state.screen.window().request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut state) = self.state.take() {
            if let Err(err) = state.shutdown() {
                log::error!("Shutting down: {}", err);
                self.error.get_or_insert(err);
            }
        }
        log::info!("Exiting");
    }
}
