//! Zipline Simulation
//!
//! A windowed simulation front end built on an event-driven, layered deferred
//! renderer. Window events are dispatched once per frame to registered
//! handlers; scene objects queue draw calls on numbered layers; the renderer
//! paints them in layer order into a CPU canvas that wgpu puts on screen.
//! Content keeps the aspect ratio of the configured window size and is
//! letterboxed when the window is wider.
//!
//! # Architecture
//! - `app/`: the winit application handler and the frame loop
//! - `events/`: event values, handlers and the dispatching registry
//! - `renderer/`: deferred layers, the pixel canvas, text and wgpu presentation
//! - `display/`: the window and the screen abstraction the renderer paints to
//! - `assets/`: images, fonts and color palettes loaded from disk
//! - `scene/`: scenes, scene objects and the scene manager
//! - `math/`: vectors, rectangles and sizes
//!
//! # Usage
//! `zipline [config.json]`. Logging is controlled with `RUST_LOG` and defaults
//! to `info`.

#![warn(missing_docs)]
pub mod app;
pub mod assets;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod math;
pub mod renderer;
pub mod scene;

#[cfg(test)]
mod testing;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::assets::Assets;
use crate::config::Config;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run().inspect_err(|err| log::error!("{:#}", err))
}

fn run() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref()).context("loading configuration")?;

    let assets = Assets::load(&config.assets_dir, &config.palette).with_context(|| {
        format!("loading assets from {}", config.assets_dir.display())
    })?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("installing Ctrl-C handler")?;

    let event_loop = EventLoop::new().context("creating event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::App::new(config, assets, interrupted);
    event_loop.run_app(&mut app).context("running event loop")?;
    app.finish().context("simulation stopped")
}
