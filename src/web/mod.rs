// src/web/mod.rs
//! Browser backend: canvas surface, image loading, animation frames and a
//! `spawn_local` spawner, plus `create_engine` to wire them together.

pub mod canvas;
pub mod frames;
pub mod images;
pub mod spawn;

pub use canvas::CanvasSurface;
pub use frames::{AnimationFrames, PerformanceClock};
pub use images::load_image;
pub use spawn::WebSpawner;

use log::info;
use web_sys::HtmlImageElement;

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::frame_loop::EngineHandle;
use crate::loader::Loader;

/// Builds an engine rendering into the canvas named by `config.canvas_id`.
///
/// Textures load as `HtmlImageElement`s; `config.error_image` is used for
/// every texture that is not loaded.
pub fn create_engine(config: &EngineConfig) -> Result<EngineHandle<CanvasSurface>, EngineError> {
    let surface = CanvasSurface::by_id(&config.canvas_id, config.alpha)?;

    let error_image = HtmlImageElement::new().map_err(EngineError::platform)?;
    error_image.set_src(&config.error_image);

    let textures = Loader::new(|_id, url| load_image(url), error_image, WebSpawner);
    let clock = PerformanceClock::new()?;

    info!("web: engine bound to canvas `{}`", config.canvas_id);
    Ok(EngineHandle::new(Engine::new(surface, textures, clock, config.hook_failures)))
}
