//! Application module.
//!
//! Ties the window, the event manager, the renderer and the scenes together
//! into the frame loop.
//!
//! # Module Structure
//!
//! - [`app_state`]: [`AppState`], everything that exists once the window is open
//! - [`event_handler`]: [`App`], the winit [`ApplicationHandler`] driving the loop
//! - [`update`]: the per-frame work
//! - [`clock`]: [`FrameClock`], frame timing and pacing
//!
//! # Frame Order
//!
//! 1. Window events queued since the last frame are dispatched to every handler
//! 2. The scene manager switches scenes if asked, then updates and draws
//! 3. The renderer flushes its layers and presents
//! 4. The clock schedules the next frame
//!
//! A quit event clears the [`LoopControl`] flag; the loop stops once the
//! current frame is done.
//!
//! [`ApplicationHandler`]: winit::application::ApplicationHandler

pub mod app_state;
pub mod clock;
pub mod event_handler;
pub mod update;

pub use app_state::AppState;
pub use clock::FrameClock;
pub use event_handler::App;

/// The main loop's run flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopControl {
    running: bool,
}

impl LoopControl {
    /// Starts in the running state.
    pub fn new() -> Self {
        Self { running: true }
    }

    /// Stops the loop after the current frame.
    pub fn exit(&mut self) {
        if self.running {
            log::info!("Quit requested");
        }
        self.running = false;
    }

    /// False once [`LoopControl::exit`] was called.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for LoopControl {
    fn default() -> Self {
        Self::new()
    }
}
