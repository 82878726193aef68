// Default formation layouts for new documents and formation reset

use crate::geometry::{Pitch, Position};
use crate::model::{Entity, EntityId, Team};
use std::collections::BTreeMap;

/// Formation slot in normalized team-view coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FormationSlot {
    pub role: &'static str,
    /// 0.0 = left touchline, 1.0 = right touchline
    pub width: f64,
    /// 0.0 = own goal line, 1.0 = halfway line
    pub depth: f64,
}

const fn slot(role: &'static str, width: f64, depth: f64) -> FormationSlot {
    FormationSlot { role, width, depth }
}

/// 4-4-2 (Classic)
pub static T442: [FormationSlot; 11] = [
    slot("GK", 0.5, 0.05),
    slot("LB", 0.15, 0.35),
    slot("LCB", 0.38, 0.3),
    slot("RCB", 0.62, 0.3),
    slot("RB", 0.85, 0.35),
    slot("LM", 0.15, 0.65),
    slot("LCM", 0.4, 0.6),
    slot("RCM", 0.6, 0.6),
    slot("RM", 0.85, 0.65),
    slot("LS", 0.4, 0.9),
    slot("RS", 0.6, 0.9),
];

/// Places a normalized slot inside `team`'s half.
///
/// Team A attacks +x; team B is the point mirror of team A.
pub fn slot_position(slot: &FormationSlot, team: Team, pitch: &Pitch) -> Position {
    let half = pitch.length * 0.5;
    match team {
        Team::A => Position::new(slot.depth * half, (1.0 - slot.width) * pitch.width),
        Team::B => Position::new(pitch.length - slot.depth * half, slot.width * pitch.width),
    }
}

pub fn formation_id(team: Team, index: usize) -> EntityId {
    format!("{team}-{index}")
}

/// Both teams in their default 4-4-2, registry order A then B.
pub fn default_entities() -> Vec<Entity> {
    [Team::A, Team::B]
        .into_iter()
        .flat_map(|team| {
            T442.iter().enumerate().map(move |(i, slot)| {
                Entity::new(formation_id(team, i), team, (i + 1).to_string(), slot.role)
            })
        })
        .collect()
}

pub fn default_positions(pitch: &Pitch) -> BTreeMap<EntityId, Position> {
    [Team::A, Team::B]
        .into_iter()
        .flat_map(|team| {
            T442.iter()
                .enumerate()
                .map(move |(i, slot)| (formation_id(team, i), slot_position(slot, team, pitch)))
        })
        .collect()
}
