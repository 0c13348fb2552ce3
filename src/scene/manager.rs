//! Switching between scenes.

use std::collections::HashMap;

use super::{Scene, SceneContext};
use crate::assets::Assets;
use crate::error::{Result, SceneError};
use crate::events::EventManager;
use crate::renderer::Renderer;

/// Owns every scene and runs the current one.
///
/// A switch requested during a frame takes effect at the start of the next
/// [`SceneManager::step`]: the old scene ends before the new one starts.
pub struct SceneManager {
    scenes: HashMap<String, Scene>,
    current: Option<String>,
    requested: String,
}

impl SceneManager {
    /// Creates a manager that will start `initial` on the first step.
    pub fn new(initial: &str) -> Self {
        Self {
            scenes: HashMap::new(),
            current: None,
            requested: initial.to_string(),
        }
    }

    /// Adds a scene, replacing any scene with the same name.
    pub fn register(&mut self, scene: Scene) {
        if self.scenes.contains_key(scene.name()) {
            log::warn!("Scene '{}' registered twice", scene.name());
        }
        self.scenes.insert(scene.name().to_string(), scene);
    }

    /// Asks for `name` to run from the next step on.
    pub fn request(&mut self, name: &str) {
        name.clone_into(&mut self.requested);
    }

    /// Scene currently running, if one was started.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Scene the next step switches to.
    pub fn requested(&self) -> &str {
        &self.requested
    }

    /// Switches scenes if one was requested, then updates and draws the
    /// current scene.
    pub fn step(
        &mut self,
        dt: f32,
        events: &EventManager,
        renderer: &mut Renderer,
        assets: &mut Assets,
    ) -> Result<()> {
        let Self {
            scenes,
            current,
            requested,
        } = self;

        if !scenes.contains_key(requested.as_str()) {
            return Err(SceneError::Unknown(requested.clone()).into());
        }
        let name = requested.clone();
        let mut ctx = SceneContext {
            events,
            renderer,
            assets,
            next_scene: requested,
        };

        if current.as_deref() != Some(name.as_str()) {
            if let Some(previous) = current.take() {
                if let Some(scene) = scenes.get_mut(&previous) {
                    scene.end(&mut ctx)?;
                }
            }
            if let Some(scene) = scenes.get_mut(&name) {
                scene.start(&mut ctx)?;
            }
            *current = Some(name.clone());
        }

        if let Some(scene) = scenes.get_mut(&name) {
            scene.update(dt, &mut ctx)?;
            scene.draw(&mut ctx)?;
        }
        Ok(())
    }

    /// Ends the current scene, if any.
    pub fn shutdown(
        &mut self,
        events: &EventManager,
        renderer: &mut Renderer,
        assets: &mut Assets,
    ) -> Result<()> {
        let Some(name) = self.current.take() else {
            return Ok(());
        };
        let mut ctx = SceneContext {
            events,
            renderer,
            assets,
            next_scene: &mut self.requested,
        };
        match self.scenes.get_mut(&name) {
            Some(scene) => scene.end(&mut ctx),
            None => Ok(()),
        }
    }
}
