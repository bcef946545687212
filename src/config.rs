// src/config.rs
//! Engine settings, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// 32x32 magenta/black checker drawn for textures that failed to load.
pub const DEFAULT_ERROR_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAACAAAAAgAQMAAABJtOi3AAAAAXNSR0IArs4c6QAAAARnQU1BAACxjwv8YQUAAAAJcEhZcwAADsMAAA7DAcdvqGQAAAAZdEVYdFNvZnR3YXJlAHBhaW50Lm5ldCA0LjAuMTczbp9jAAAABlBMVEUAAAD/AP82/WKvAAAAFElEQVQI12NgYPj/n4GKBHVNYwAA7b0/wfSyzYsAAAAASUVORK5CYII=";

/// What the engine does when an entity hook returns an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookFailurePolicy {
    /// Log the failure and carry on with the next entity.
    #[default]
    Isolate,
    /// Drop the rest of the current sweep.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `id` of the `<canvas>` element to render into.
    pub canvas_id: String,
    /// Whether the 2D context keeps an alpha channel.
    pub alpha: bool,
    /// URL of the fallback texture.
    pub error_image: String,
    pub hook_failures: HookFailurePolicy,
    /// Maximum `log` level: `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            alpha: false,
            error_image: DEFAULT_ERROR_IMAGE.to_string(),
            hook_failures: HookFailurePolicy::Isolate,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parses a JSON object. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// `log_level` as a filter; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
