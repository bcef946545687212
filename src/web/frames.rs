// src/web/frames.rs
//! `requestAnimationFrame` scheduling and the `performance.now()` clock.

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Performance, Window};

use crate::error::{describe_js, EngineError};
use crate::time::{Clock, FrameCallback, FrameRequest, FrameScheduler};

/// Frame scheduler backed by `window.requestAnimationFrame`.
pub struct AnimationFrames {
    window: Window,
}

impl AnimationFrames {
    pub fn new() -> Result<Self, EngineError> {
        let window = web_sys::window().ok_or_else(|| EngineError::Platform("no window".into()))?;
        Ok(Self { window })
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameRequest, EngineError> {
        // The browser hands over milliseconds.
        let js_callback = Closure::once_into_js(move |timestamp_ms: f64| callback(timestamp_ms / 1000.0));
        self.window
            .request_animation_frame(js_callback.unchecked_ref())
            .map(FrameRequest)
            .map_err(|err| EngineError::Schedule(describe_js(&err)))
    }

    fn cancel_frame(&self, request: FrameRequest) {
        // The cancelled closure is never called, so its JS side is not freed.
        if let Err(err) = self.window.cancel_animation_frame(request.0) {
            warn!("AnimationFrames: cancel of {:?} failed: {}", request, describe_js(&err));
        }
    }
}

/// Clock reading `performance.now()` in seconds.
pub struct PerformanceClock {
    performance: Performance,
}

impl PerformanceClock {
    pub fn new() -> Result<Self, EngineError> {
        let performance = web_sys::window()
            .and_then(|window| window.performance())
            .ok_or_else(|| EngineError::Platform("performance API unavailable".into()))?;
        Ok(Self { performance })
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> f64 {
        self.performance.now() / 1000.0
    }
}
