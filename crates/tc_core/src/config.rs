//! # Editor Configuration
//!
//! Tuning constants for playback, possession snapping and entity spawning.
//!
//! ```rust
//! use tc_core::config::EditorConfig;
//!
//! let config = EditorConfig::default();
//! assert_eq!(config.step_duration_ms, 4000.0);
//! ```

use crate::error::{Result, TacticError};
use crate::geometry::{Pitch, Position};
use serde::{Deserialize, Serialize};
use std::{env, fs};

pub const CONFIG_PATH_ENV: &str = "TC_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Real time spent interpolating between two consecutive frames
    pub step_duration_ms: f64,
    /// Ball snaps to an entity closer than this while being dragged
    pub capture_radius: f64,
    /// Ball position relative to its owner
    pub possession_offset: Position,
    /// Stand-in for entities missing from a frame
    pub fallback_position: Position,
    /// Distance of the spawn column from each team's own goal line
    pub spawn_inset: f64,
    /// Surface used for new documents
    pub default_pitch: Pitch,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            step_duration_ms: 4000.0,
            capture_radius: 3.0,
            possession_offset: Position::new(1.0, 1.0),
            fallback_position: Position::ORIGIN,
            spawn_inset: 2.0,
            default_pitch: Pitch::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        let config: EditorConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.step_duration_ms.is_finite() && self.step_duration_ms > 0.0) {
            return Err(TacticError::InvalidConfig(format!(
                "step_duration_ms must be positive, got {}",
                self.step_duration_ms
            )));
        }
        if !(self.capture_radius.is_finite() && self.capture_radius >= 0.0) {
            return Err(TacticError::InvalidConfig(format!(
                "capture_radius must be non-negative, got {}",
                self.capture_radius
            )));
        }
        if !self.default_pitch.is_valid() {
            return Err(TacticError::InvalidConfig(format!(
                "default_pitch must be positive, got {}x{}",
                self.default_pitch.length, self.default_pitch.width
            )));
        }
        if self.spawn_inset < 0.0 || self.spawn_inset > self.default_pitch.length {
            return Err(TacticError::InvalidConfig(format!(
                "spawn_inset out of range: {}",
                self.spawn_inset
            )));
        }
        Ok(())
    }

    /// Defaults, overridden by the JSON file named in `TC_CONFIG_PATH` if set.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            TacticError::InvalidConfig(format!("failed to read {CONFIG_PATH_ENV}='{path}': {e}"))
        })?;

        Self::from_json(&content)
    }
}
