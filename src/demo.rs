// src/demo.rs
//! Small demo: one red sprite sliding to the right.

use std::rc::Rc;

use log::error;
use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::entity::Sprite;
use crate::error::EngineError;
use crate::events::FRAME;
use crate::frame_loop::FrameLoop;
use crate::web::{create_engine, AnimationFrames};

/// Horizontal speed of the demo sprite, in canvas units per second.
const SPEED: f64 = 50.0;

/// Renders the demo into the canvas with id `canvas_id`, using the image at
/// `texture_url`.
///
/// The loop starts immediately; the sprite appears once its texture has
/// loaded. Returns the running loop so JavaScript can stop it.
#[wasm_bindgen]
pub fn start_demo(canvas_id: &str, texture_url: &str) -> Result<DemoLoop, JsValue> {
    let config = EngineConfig { canvas_id: canvas_id.to_string(), ..Default::default() };
    let engine = create_engine(&config)?;
    let _ = engine.borrow().textures().add("red", texture_url).map_err(EngineError::from)?;

    let loading = engine.load();
    wasm_bindgen_futures::spawn_local(async move {
        match loading.await {
            Ok(engine) => {
                let mut engine = engine.borrow_mut();
                let image = engine.textures().get("red");
                engine
                    .add_entity(Sprite::new("red", 20.0, 20.0, image))
                    .on(FRAME, |body, time| body.x += SPEED * time.delta);
            }
            Err(err) => error!("demo: {}", err),
        }
    });

    let frames = AnimationFrames::new()?;
    let running = engine.start(Rc::new(frames))?;
    Ok(DemoLoop { running })
}

/// JavaScript handle on the demo's frame loop.
#[wasm_bindgen]
pub struct DemoLoop {
    running: FrameLoop,
}

#[wasm_bindgen]
impl DemoLoop {
    pub fn stop(&self) {
        self.running.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.running.is_running()
    }
}
