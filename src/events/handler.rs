//! Event handler values.
//!
//! A [`Handler`] pairs an [`EventKind`] filter with an action. The action either
//! receives the matched event or only the dispatch context, mirroring whether
//! the caller cares about the event payload. Anything the action needs beyond
//! that is captured by the closure when the handler is built.

use super::{Event, EventContext, EventKind};
use crate::error::Result;

type PlainAction = Box<dyn FnMut(&mut EventContext<'_>) -> Result<()>>;
type EventAction = Box<dyn FnMut(&Event, &mut EventContext<'_>) -> Result<()>>;

enum Action {
    Plain(PlainAction),
    WithEvent(EventAction),
}

/// A filtered event callback.
///
/// # Example
/// ```ignore
/// let quit = Handler::on(EventKind::Quit, |ctx| {
///     ctx.control.exit();
///     Ok(())
/// });
/// let id = events.add_handler(quit);
/// ```
pub struct Handler {
    kind: EventKind,
    action: Action,
}

impl Handler {
    /// Builds a handler whose action runs without the event payload.
    pub fn on<F>(kind: EventKind, action: F) -> Self
    where
        F: FnMut(&mut EventContext<'_>) -> Result<()> + 'static,
    {
        Self {
            kind,
            action: Action::Plain(Box::new(action)),
        }
    }

    /// Builds a handler whose action receives the matched event.
    pub fn with_event<F>(kind: EventKind, action: F) -> Self
    where
        F: FnMut(&Event, &mut EventContext<'_>) -> Result<()> + 'static,
    {
        Self {
            kind,
            action: Action::WithEvent(Box::new(action)),
        }
    }

    /// The kind of event this handler reacts to.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Whether the action is given the event itself.
    pub fn passes_event(&self) -> bool {
        matches!(self.action, Action::WithEvent(_))
    }

    /// Runs the action if `event` matches the filter.
    ///
    /// Returns whether the event matched. Errors from the action are returned
    /// unchanged.
    pub fn dispatch(&mut self, event: &Event, ctx: &mut EventContext<'_>) -> Result<bool> {
        if event.kind() != self.kind {
            return Ok(false);
        }

        match &mut self.action {
            Action::Plain(action) => action(ctx)?,
            Action::WithEvent(action) => action(event, ctx)?,
        }
        Ok(true)
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("kind", &self.kind)
            .field("passes_event", &self.passes_event())
            .finish()
    }
}
