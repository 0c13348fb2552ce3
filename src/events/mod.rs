//! Event module.
//!
//! Platform window events are converted into [`Event`] values and queued by the
//! application. Once per frame the queued batch is handed to the
//! [`EventManager`], which dispatches every event to every registered
//! [`Handler`]. Handlers filter by [`EventKind`] themselves, so the manager never
//! short-circuits: a matching handler does not stop the event from reaching the
//! next one.
//!
//! # Module Structure
//!
//! - [`handler`]: the [`Handler`] value (kind filter + action)
//! - [`manager`]: the [`EventManager`] registry, [`HandlerId`] and [`HandlerGuard`]

pub mod handler;
pub mod manager;

pub use handler::Handler;
pub use manager::{EventManager, HandlerGuard, HandlerId};

use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::app::LoopControl;
use crate::display::Screen;
use crate::math::{Size, Vec2};
use crate::renderer::Renderer;

/// A platform event, detached from the window system that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user asked to close the application.
    Quit,
    /// The window's inner size changed.
    Resized(Size),
    /// A key was pressed or released.
    Key {
        /// The physical key.
        key: PhysicalKey,
        /// True on press, false on release.
        pressed: bool,
    },
    /// The cursor moved inside the window.
    MouseMotion(Vec2),
    /// A mouse button was pressed or released.
    MouseButton {
        /// The button.
        button: MouseButton,
        /// True on press, false on release.
        pressed: bool,
    },
    /// The window gained or lost focus.
    Focus(bool),
}

/// The kind of an [`Event`], used by handlers as their filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`Event::Quit`].
    Quit,
    /// [`Event::Resized`].
    Resize,
    /// [`Event::Key`].
    Key,
    /// [`Event::MouseMotion`].
    MouseMotion,
    /// [`Event::MouseButton`].
    MouseButton,
    /// [`Event::Focus`].
    Focus,
}

impl Event {
    /// Returns the kind this event is filtered by.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Quit => EventKind::Quit,
            Event::Resized(_) => EventKind::Resize,
            Event::Key { .. } => EventKind::Key,
            Event::MouseMotion(_) => EventKind::MouseMotion,
            Event::MouseButton { .. } => EventKind::MouseButton,
            Event::Focus(_) => EventKind::Focus,
        }
    }

    /// Converts a winit window event, ignoring the ones the simulation has no use for.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CloseRequested => Some(Event::Quit),
            WindowEvent::Resized(size) => Some(Event::Resized(Size::from(*size))),
            WindowEvent::KeyboardInput { event, .. } if !event.repeat => Some(Event::Key {
                key: event.physical_key,
                pressed: event.state == ElementState::Pressed,
            }),
            WindowEvent::CursorMoved { position, .. } => Some(Event::MouseMotion(Vec2::new(
                position.x as f32,
                position.y as f32,
            ))),
            WindowEvent::MouseInput { state, button, .. } => Some(Event::MouseButton {
                button: *button,
                pressed: *state == ElementState::Pressed,
            }),
            WindowEvent::Focused(focused) => Some(Event::Focus(*focused)),
            _ => None,
        }
    }
}

/// Everything a handler may touch while an event is dispatched.
///
/// The renderer is the only writer of the drawable geometry; other handlers
/// read it through [`Renderer::drawable`].
pub struct EventContext<'a> {
    /// The frame's renderer.
    pub renderer: &'a mut Renderer,
    /// The display the renderer presents to.
    pub screen: &'a mut dyn Screen,
    /// The main loop's run flag.
    pub control: &'a mut LoopControl,
}
