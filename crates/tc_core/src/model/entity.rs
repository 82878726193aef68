use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity ids are opaque strings (`A-0`, `B-3f9c2a1d`, ...).
pub type EntityId = String;

pub const PLACEHOLDER_LABEL: &str = "?";
pub const PLACEHOLDER_ROLE: &str = "SUB";

/// Team affiliation. Team A defends the x = 0 goal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked player. Static attributes only; positions live in frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Entity {
    pub id: EntityId,
    pub team: Team,
    /// Jersey number or short user label
    #[serde(default)]
    pub label: String,
    /// GK, CB, ST, SUB, ...
    #[serde(default)]
    pub role: String,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, team: Team, label: impl Into<String>, role: impl Into<String>) -> Self {
        Self { id: id.into(), team, label: label.into(), role: role.into() }
    }

    /// Freshly added bench player.
    pub fn placeholder(id: impl Into<EntityId>, team: Team) -> Self {
        Self::new(id, team, PLACEHOLDER_LABEL, PLACEHOLDER_ROLE)
    }
}
