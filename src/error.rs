// src/error.rs
//! Error types shared across the engine.
//!
//! `LoadError` is `Clone` because every waiter on a shared load future gets
//! its own copy of the outcome.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures reported by [`crate::loader::Loader`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// `add` was called with an id that is already pending or loaded.
    #[error("load id `{0}` already exists")]
    DuplicateId(String),
    /// `load` was called with an id that is not tracked.
    #[error("load id `{0}` not found")]
    NotFound(String),
    /// The item loader rejected the request. The id has been rolled back.
    #[error("failed to load `{id}`: {reason}")]
    Failed { id: String, reason: String },
    /// The load task could not be handed to the spawner.
    #[error("failed to spawn load task for `{id}`: {reason}")]
    Spawn { id: String, reason: String },
}

impl LoadError {
    /// The id this error is about.
    pub fn id(&self) -> &str {
        match self {
            LoadError::DuplicateId(id) | LoadError::NotFound(id) => id,
            LoadError::Failed { id, .. } | LoadError::Spawn { id, .. } => id,
        }
    }
}

/// A drawing call rejected by the surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("surface call `{call}` failed: {reason}")]
pub struct SurfaceError {
    pub call: &'static str,
    pub reason: String,
}

impl SurfaceError {
    pub fn new(call: &'static str, reason: impl Into<String>) -> Self {
        Self { call, reason: reason.into() }
    }

    pub(crate) fn from_js(call: &'static str, value: JsValue) -> Self {
        Self::new(call, describe_js(&value))
    }
}

/// Failure raised by an entity hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("{0}")]
    Failed(String),
}

/// Which entity hook a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Start,
    Update,
    Draw,
}

/// A hook failure together with the entity that raised it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{phase:?} hook of entity #{index} (`{name}`) failed: {error}")]
pub struct HookFailure {
    /// Position of the entity in insertion order.
    pub index: usize,
    pub name: String,
    pub phase: HookPhase,
    pub error: HookError,
}

/// Top-level engine failures.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Hook(#[from] HookFailure),
    #[error("frame scheduling failed: {0}")]
    Schedule(String),
    #[error("platform error: {0}")]
    Platform(String),
    #[error("invalid engine config: {0}")]
    Config(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn platform(value: JsValue) -> Self {
        EngineError::Platform(describe_js(&value))
    }
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from(js_sys::Error::new(&err.to_string()))
    }
}

/// Best-effort text for a JavaScript error value.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
