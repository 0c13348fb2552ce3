//! Scene composition.
//!
//! A [`Scene`] is a named, ordered set of [`Object`]s built fresh every time
//! the scene starts. The [`SceneManager`] keeps all scenes by name and
//! switches between them on request.
//!
//! # Module Structure
//!
//! - [`manager`]: the [`SceneManager`]
//! - [`intro`]: the fading title sequence shown at startup
//! - [`panel`]: a titled, outlined panel laid out relative to the drawable area
//! - [`visual`]: the three-panel visualization scene

pub mod intro;
pub mod manager;
pub mod panel;
pub mod visual;

pub use manager::SceneManager;

use crate::assets::Assets;
use crate::error::Result;
use crate::events::EventManager;
use crate::renderer::Renderer;

/// Font used by every piece of interface text.
pub const GUI_FONT: &str = "DejaVuSans";

/// What an object may touch during a lifecycle call.
pub struct SceneContext<'a> {
    /// Registry for the object's own handlers.
    pub events: &'a EventManager,
    /// Renderer draw calls are queued on.
    pub renderer: &'a mut Renderer,
    /// Fonts, images and colors.
    pub assets: &'a mut Assets,
    /// Name of the scene to run next frame.
    pub next_scene: &'a mut String,
}

impl SceneContext<'_> {
    /// Switches to `name` at the start of the next frame.
    pub fn request_scene(&mut self, name: &str) {
        if self.next_scene.as_str() != name {
            log::debug!("Scene '{}' requested", name);
            name.clone_into(self.next_scene);
        }
    }
}

/// Something living in a scene.
///
/// Every hook defaults to doing nothing.
pub trait Object {
    /// Unique name within the scene.
    fn name(&self) -> &str;

    /// Called once when the scene starts, before the first update.
    fn start(&mut self, _ctx: &mut SceneContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Advances the object by `dt` seconds.
    fn update(&mut self, _dt: f32, _ctx: &mut SceneContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Queues this frame's draw calls.
    fn draw(&mut self, _ctx: &mut SceneContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Releases anything acquired in [`Object::start`].
    fn end(&mut self, _ctx: &mut SceneContext<'_>) -> Result<()> {
        Ok(())
    }
}

type Populate = Box<dyn Fn(&Assets) -> Result<Vec<Box<dyn Object>>>>;

/// A named set of objects.
pub struct Scene {
    name: String,
    bg_color: Option<String>,
    populate: Populate,
    objects: Vec<Box<dyn Object>>,
}

impl Scene {
    /// Creates a scene whose objects are built by `populate` on every start.
    pub fn new<F>(name: impl Into<String>, populate: F) -> Self
    where
        F: Fn(&Assets) -> Result<Vec<Box<dyn Object>>> + 'static,
    {
        Self {
            name: name.into(),
            bg_color: None,
            populate: Box::new(populate),
            objects: Vec::new(),
        }
    }

    /// Sets the renderer background to the palette color `color` on start.
    pub fn with_bg_color(mut self, color: impl Into<String>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    /// Name the scene is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &dyn Object> {
        self.objects.iter().map(|object| object.as_ref())
    }

    /// Adds objects in order. An object named like an existing one replaces it
    /// in place.
    pub fn set_objects(&mut self, objects: Vec<Box<dyn Object>>) {
        for object in objects {
            match self.objects.iter().position(|o| o.name() == object.name()) {
                Some(index) => {
                    log::warn!(
                        "Scene '{}' already has an object named '{}', replacing it",
                        self.name,
                        object.name()
                    );
                    self.objects[index] = object;
                }
                None => self.objects.push(object),
            }
        }
    }

    /// Builds the objects and starts each of them.
    pub fn start(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        if let Some(color) = &self.bg_color {
            let color = ctx.assets.color(color)?;
            ctx.renderer.set_bg_color(color);
        }

        let objects = (self.populate)(ctx.assets)?;
        self.set_objects(objects);
        for object in &mut self.objects {
            object.start(ctx)?;
        }
        log::info!(
            "Scene '{}' started with {} objects",
            self.name,
            self.objects.len()
        );
        Ok(())
    }

    /// Updates every object with the frame's delta time.
    pub fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>) -> Result<()> {
        for object in &mut self.objects {
            object.update(dt, ctx)?;
        }
        Ok(())
    }

    /// Queues every object's draw calls.
    pub fn draw(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        for object in &mut self.objects {
            object.draw(ctx)?;
        }
        Ok(())
    }

    /// Ends every object and drops them.
    pub fn end(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        let result = self
            .objects
            .iter_mut()
            .try_for_each(|object| object.end(ctx));
        self.objects.clear();
        log::debug!("Scene '{}' ended", self.name);
        result
    }
}
