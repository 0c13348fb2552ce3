//! Handler registry and per-frame dispatch.
//!
//! The [`EventManager`] is a cheap, cloneable handle over single-threaded shared
//! state. Handlers, scene objects and the renderer all hold their own handle,
//! which lets a handler register or remove handlers while a dispatch pass is
//! running without corrupting it:
//!
//! - dispatch iterates a snapshot of the registry taken before the first event,
//!   so a handler added mid-pass runs from the next frame on;
//! - removal only queues the id; the registry is pruned once the whole batch has
//!   been dispatched (and again before the next snapshot), so a handler removed
//!   mid-pass still sees the rest of its batch and none after it.
//!
//! Handlers run in registration order. The renderer registers its resize handler
//! before any scene object exists, so the drawable geometry is always updated
//! before layout handlers read it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::{Event, EventContext, Handler};
use crate::error::{EventError, Result};

/// Identifies a registered handler. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Default)]
struct Registry {
    handlers: BTreeMap<HandlerId, Rc<RefCell<Handler>>>,
    next_id: u64,
    pending_removal: Vec<HandlerId>,
}

/// Registry of event handlers and the per-frame dispatcher.
#[derive(Clone, Default)]
pub struct EventManager {
    registry: Rc<RefCell<Registry>>,
}

impl EventManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler and returns its id.
    ///
    /// Ids increase monotonically for the lifetime of the manager.
    pub fn add_handler(&self, handler: Handler) -> HandlerId {
        let mut registry = self.registry.borrow_mut();
        let id = HandlerId(registry.next_id);
        registry.next_id += 1;
        log::trace!("Registered {:?} handler {}", handler.kind(), id);
        registry.handlers.insert(id, Rc::new(RefCell::new(handler)));
        id
    }

    /// Registers a handler that is removed again when the returned guard drops.
    pub fn add_scoped(&self, handler: Handler) -> HandlerGuard {
        let id = self.add_handler(handler);
        HandlerGuard {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Queues a handler for removal once the current dispatch pass is over.
    ///
    /// # Errors
    /// [`EventError::UnknownHandler`] if `id` is not registered or its removal
    /// has already been requested.
    pub fn remove_handler(&self, id: HandlerId) -> std::result::Result<(), EventError> {
        queue_removal(&self.registry, id)
    }

    /// Returns true if `id` is registered and not queued for removal.
    pub fn is_registered(&self, id: HandlerId) -> bool {
        let registry = self.registry.borrow();
        registry.handlers.contains_key(&id) && !registry.pending_removal.contains(&id)
    }

    /// Number of handlers currently in the registry, including ones queued for removal.
    pub fn len(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    /// Returns true if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatches one frame's batch of events.
    ///
    /// Removals queued since the last pass are applied first, then every event,
    /// in arrival order, is offered to every handler of the snapshot taken at
    /// that point. Removals queued during the pass are applied after the last
    /// event.
    ///
    /// # Errors
    /// The first handler error aborts the pass and is returned as is; removals
    /// queued so far are applied at the start of the next pass.
    pub fn update<I>(&self, events: I, ctx: &mut EventContext<'_>) -> Result<()>
    where
        I: IntoIterator<Item = Event>,
    {
        let mut removed = self.apply_removals();
        let snapshot: Vec<Rc<RefCell<Handler>>> =
            self.registry.borrow().handlers.values().cloned().collect();

        let mut dispatched = 0usize;
        for event in events {
            for handler in &snapshot {
                handler.borrow_mut().dispatch(&event, ctx)?;
            }
            dispatched += 1;
        }

        removed += self.apply_removals();
        if dispatched > 0 || removed > 0 {
            log::trace!(
                "Dispatched {} events to {} handlers, removed {}",
                dispatched,
                snapshot.len(),
                removed
            );
        }
        Ok(())
    }

    fn apply_removals(&self) -> usize {
        let removed: Vec<Rc<RefCell<Handler>>> = {
            let mut registry = self.registry.borrow_mut();
            let pending = std::mem::take(&mut registry.pending_removal);
            pending
                .into_iter()
                .filter_map(|id| registry.handlers.remove(&id))
                .collect()
        };
        // Dropped outside the borrow: a handler may own guards of its own.
        removed.len()
    }
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("EventManager")
            .field("handlers", &registry.handlers.len())
            .field("pending_removal", &registry.pending_removal)
            .finish()
    }
}

fn queue_removal(
    registry: &Rc<RefCell<Registry>>,
    id: HandlerId,
) -> std::result::Result<(), EventError> {
    let mut registry = registry.borrow_mut();
    if !registry.handlers.contains_key(&id) || registry.pending_removal.contains(&id) {
        return Err(EventError::UnknownHandler(id));
    }
    registry.pending_removal.push(id);
    Ok(())
}

/// Keeps a handler registered for as long as the guard lives.
///
/// Dropping the guard queues the handler for removal, so an object holding one
/// cannot leave a stale handler behind however it is torn down.
#[must_use = "dropping the guard removes the handler"]
pub struct HandlerGuard {
    id: HandlerId,
    registry: Weak<RefCell<Registry>>,
}

impl HandlerGuard {
    /// The id of the guarded handler.
    pub fn id(&self) -> HandlerId {
        self.id
    }
}

impl fmt::Debug for HandlerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerGuard").field(&self.id).finish()
    }
}

impl Drop for HandlerGuard {
    fn drop(&mut self) {
        // The manager may already be gone at shutdown; nothing left to clean up then.
        if let Some(registry) = self.registry.upgrade() {
            if let Err(err) = queue_removal(&registry, self.id) {
                log::warn!("Releasing handler guard: {}", err);
            }
        }
    }
}
