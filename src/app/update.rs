//! The per-frame work.

use std::sync::atomic::Ordering;

use super::app_state::AppState;
use crate::display::Screen;
use crate::error::Result;
use crate::events::{Event, EventContext};

impl<S: Screen> AppState<S> {
    /// Runs one frame: dispatch, scene step, flush.
    ///
    /// A quit seen during dispatch still lets the frame finish; callers check
    /// [`super::LoopControl::is_running`] afterwards.
    pub fn frame(&mut self) -> Result<()> {
        if self.interrupted.swap(false, Ordering::SeqCst) {
            log::info!("Interrupted");
            self.queue.push(Event::Quit);
        }

        let dt = self.clock.tick();
        let batch = std::mem::take(&mut self.queue);
        let mut ctx = EventContext {
            renderer: &mut self.renderer,
            screen: &mut self.screen,
            control: &mut self.control,
        };
        self.events.update(batch, &mut ctx)?;

        self.scenes
            .step(dt, &self.events, &mut self.renderer, &mut self.assets)?;
        self.renderer.flush(&mut self.screen)?;

        log::trace!("Frame took {:.4}s, {:.1} fps", dt, self.clock.fps());
        Ok(())
    }
}
