use super::entity::EntityId;
use crate::geometry::Position;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Ball position plus optional possession.
///
/// When `owner_id` is set the owner is authoritative and `x`/`y` are a cache
/// of `owner position + possession offset` (see [`BallState::possessed_by`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BallState {
    pub x: f64,
    pub y: f64,
    #[serde(default, alias = "ownerIdOrNull")]
    pub owner_id: Option<EntityId>,
}

impl BallState {
    pub fn loose(at: Position) -> Self {
        Self { x: at.x, y: at.y, owner_id: None }
    }

    /// Ball held by `owner`, placed at the owner's position plus `offset`.
    pub fn possessed_by(owner: impl Into<EntityId>, owner_pos: Position, offset: Position) -> Self {
        let at = owner_pos.offset(offset);
        Self { x: at.x, y: at.y, owner_id: Some(owner.into()) }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn set_position(&mut self, at: Position) {
        self.x = at.x;
        self.y = at.y;
    }

    pub fn is_owned_by(&self, id: &str) -> bool {
        self.owner_id.as_deref() == Some(id)
    }
}

/// A keyframe: complete snapshot of entity and ball positions.
///
/// `positions` may hold stale ids of removed entities and may lack ids of
/// entities added later; readers default instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Frame {
    pub id: String,
    #[serde(rename = "player_pos", alias = "positions", default)]
    pub positions: BTreeMap<EntityId, Position>,
    pub ball: BallState,
    #[serde(default)]
    pub note: String,
}

impl Frame {
    pub fn new(positions: BTreeMap<EntityId, Position>, ball: BallState) -> Self {
        Self { id: new_frame_id(), positions, ball, note: String::new() }
    }

    /// Copy of this frame's coordinates under a fresh id with an empty note.
    pub fn successor(&self) -> Self {
        Self::new(self.positions.clone(), self.ball.clone())
    }

    pub fn position_of(&self, id: &str) -> Option<Position> {
        self.positions.get(id).copied()
    }
}

pub fn new_frame_id() -> String {
    Uuid::new_v4().to_string()
}
