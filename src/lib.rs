// src/lib.rs
//! A small 2D canvas engine.
//!
//! - [`loader::Loader`] loads items asynchronously, at most one load per id,
//!   and hands out a fallback item for anything not loaded.
//! - [`engine::Engine`] owns the surface, the texture loader and a flat list
//!   of entities, and runs the update/draw sweep for each frame.
//! - [`frame_loop::FrameLoop`] drives the engine from a frame scheduler.
//! - [`events::EventHub`] lets entities react to named events such as
//!   [`events::FRAME`].
//!
//! The platform (clock, frame scheduler, drawing surface, task spawner) is
//! injected; [`web`] provides the browser implementations.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod demo;
pub mod engine;
pub mod entity;
pub mod error;
pub mod events;
pub mod frame_loop;
pub mod loader;
pub mod logging;
pub mod surface;
pub mod time;
pub mod web;

#[cfg(test)]
mod testing;

pub use config::{EngineConfig, HookFailurePolicy};
pub use engine::{Engine, TickReport};
pub use entity::{Actor, Body, Capabilities, Context, Entity, Sprite};
pub use error::{EngineError, HookError, HookFailure, HookPhase, LoadError, SurfaceError};
pub use events::{EventHub, FRAME};
pub use frame_loop::{EngineHandle, FrameLoop};
pub use loader::{LoadHandle, Loader};
pub use surface::Surface;
pub use time::{Clock, FrameRequest, FrameScheduler, TimeState};

// Runs when the wasm module is instantiated.
#[wasm_bindgen(start)]
pub fn on_module_load() {
    console_error_panic_hook::set_once();
    logging::init_logging(EngineConfig::default().level_filter());
    log::info!("canvas_engine loaded");
}
