//! Persisted tactic document
//!
//! Wire shape (one element of the tactic database export):
//!
//! ```json
//! {
//!   "meta": {
//!     "tactic_id": "...", "title": "...",
//!     "pitch": {"length": 105.0, "width": 68.0},
//!     "teams": {"A": {"name": "...", "color": "#..."}, "B": {...}},
//!     "players": [{"id": "A-0", "team": "A", "label": "1", "role": "GK"}],
//!     "last_modified": 1760000000000
//!   },
//!   "frames": [{"id": "...", "player_pos": {"A-0": [5.0, 34.0]},
//!               "ball": {"x": 52.5, "y": 34.0, "owner_id": null}, "note": ""}]
//! }
//! ```

use super::entity::{Entity, Team};
use super::frame::Frame;
use crate::error::{Result, TacticError};
use crate::geometry::Pitch;
use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamMeta {
    pub name: String,
    /// Hex color string
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamsMeta {
    #[serde(rename = "A")]
    pub a: TeamMeta,
    #[serde(rename = "B")]
    pub b: TeamMeta,
}

impl Default for TeamsMeta {
    fn default() -> Self {
        Self {
            a: TeamMeta { name: "Home".to_string(), color: "#d32f2f".to_string() },
            b: TeamMeta { name: "Away".to_string(), color: "#1976d2".to_string() },
        }
    }
}

impl TeamsMeta {
    pub fn get(&self, team: Team) -> &TeamMeta {
        match team {
            Team::A => &self.a,
            Team::B => &self.b,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentMeta {
    #[serde(alias = "id")]
    pub tactic_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(alias = "surfaceDimensions")]
    pub pitch: Pitch,
    #[serde(default)]
    pub teams: TeamsMeta,
    #[serde(alias = "entities", default)]
    pub players: Vec<Entity>,
    /// Unix milliseconds of the last save
    #[serde(alias = "lastModifiedTimestamp", default)]
    pub last_modified: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    pub meta: DocumentMeta,
    pub frames: Vec<Frame>,
}

impl Document {
    pub fn tactic_id(&self) -> &str {
        &self.meta.tactic_id
    }

    pub fn touch(&mut self) {
        self.meta.last_modified = Some(Utc::now().timestamp_millis());
    }

    /// Structural checks applied before a document is opened or persisted.
    pub fn validate(&self) -> Result<()> {
        if self.frames.is_empty() {
            return Err(TacticError::EmptyDocument { tactic_id: self.meta.tactic_id.clone() });
        }

        if !self.meta.pitch.is_valid() {
            return Err(TacticError::Validation(format!(
                "invalid pitch {}x{}",
                self.meta.pitch.length, self.meta.pitch.width
            )));
        }

        let mut frame_ids = HashSet::new();
        for frame in &self.frames {
            if !frame_ids.insert(frame.id.as_str()) {
                return Err(TacticError::Validation(format!("duplicate frame id {}", frame.id)));
            }
        }

        let mut player_ids = HashSet::new();
        for player in &self.meta.players {
            if !player_ids.insert(player.id.as_str()) {
                return Err(TacticError::Validation(format!("duplicate player id {}", player.id)));
            }
        }

        Ok(())
    }
}

pub fn new_tactic_id() -> String {
    Uuid::new_v4().to_string()
}
