//! Spatial Interaction Controller
//!
//! Pointer drags mutate the current frame only. Dragging the ball near an
//! entity snaps it into that entity's possession; dragging the owner drags
//! the ball along on every move.

use crate::geometry::{Pitch, Position};
use crate::model::{BallState, EntityId, Frame};
use crate::registry::EntityRegistry;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragTarget {
    Entity(EntityId),
    Ball,
}

/// Possession snapping parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PossessionRules {
    pub capture_radius: f64,
    pub offset: Position,
}

impl PossessionRules {
    pub fn ball_for(&self, owner: &str, owner_pos: Position) -> BallState {
        BallState::possessed_by(owner, owner_pos, self.offset)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionController {
    target: Option<DragTarget>,
    dragging: bool,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, target: DragTarget) {
        self.target = Some(target);
        self.dragging = true;
    }

    /// Pointer released or left the surface; the selection stays.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn target(&self) -> Option<&DragTarget> {
        self.target.as_ref()
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.dragging = false;
    }

    /// Applies a pointer move to `frame`. Returns false when no drag is active.
    pub fn drag_to(
        &self,
        raw: Position,
        frame: &mut Frame,
        registry: &EntityRegistry,
        pitch: &Pitch,
        rules: &PossessionRules,
    ) -> bool {
        if !self.dragging {
            return false;
        }
        match &self.target {
            Some(DragTarget::Ball) => {
                drag_ball(frame, registry, pitch.clamp(raw), rules);
                true
            }
            Some(DragTarget::Entity(id)) => {
                drag_entity(frame, id, pitch.clamp(raw), rules);
                true
            }
            None => false,
        }
    }
}

/// First entity in registry order strictly inside the capture radius.
///
/// Not distance-ranked: when several entities qualify the earliest wins.
pub fn find_capturer<'a>(
    registry: &'a EntityRegistry,
    frame: &Frame,
    candidate: Position,
    capture_radius: f64,
) -> Option<&'a EntityId> {
    registry
        .iter()
        .find(|entity| {
            frame.position_of(&entity.id).is_some_and(|pos| pos.distance(&candidate) < capture_radius)
        })
        .map(|entity| &entity.id)
}

pub fn drag_ball(frame: &mut Frame, registry: &EntityRegistry, candidate: Position, rules: &PossessionRules) {
    let capturer = find_capturer(registry, frame, candidate, rules.capture_radius)
        .and_then(|id| frame.position_of(id).map(|pos| (id, pos)));

    frame.ball = match capturer {
        Some((id, owner_pos)) => {
            debug!("Ball captured by {}", id);
            rules.ball_for(id, owner_pos)
        }
        None => BallState::loose(candidate),
    };
}

pub fn drag_entity(frame: &mut Frame, id: &str, candidate: Position, rules: &PossessionRules) {
    frame.positions.insert(id.to_string(), candidate);
    if frame.ball.is_owned_by(id) {
        frame.ball.set_position(candidate.offset(rules.offset));
    }
}
