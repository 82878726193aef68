//! Render-State Projector
//!
//! Pure mapping from (store, registry, playback phase, progress) to the flat
//! position map the presentation layer draws. Never fails: out-of-range
//! cursors degrade to an empty render state.

use crate::geometry::Position;
use crate::model::{BallState, EntityId, Frame};
use crate::registry::EntityRegistry;
use crate::store::KeyframeStore;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RenderMode {
    /// Stored frame values
    #[default]
    Static,
    /// Blend between the current frame and the next one
    Interpolated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    pub frame_index: usize,
    pub progress: f64,
    pub mode: RenderMode,
    /// Live registry entities only
    pub positions: BTreeMap<EntityId, Position>,
    pub ball: BallState,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            frame_index: 0,
            progress: 0.0,
            mode: RenderMode::Static,
            positions: BTreeMap::new(),
            ball: BallState::loose(Position::ORIGIN),
        }
    }
}

/// Inputs for one projection.
#[derive(Debug, Clone, Copy)]
pub struct Projection<'a> {
    pub store: &'a KeyframeStore,
    pub registry: &'a EntityRegistry,
    pub playing: bool,
    pub progress: f64,
    /// Stand-in for entities missing from a frame
    pub fallback: Position,
    /// Ball offset from its owner
    pub possession_offset: Position,
}

pub fn project(input: &Projection<'_>) -> RenderState {
    let index = input.store.current_index();
    let Some(current) = input.store.get(index) else {
        return RenderState::default();
    };

    if !input.playing || input.store.is_last(index) {
        return project_static(input, index, current);
    }

    match input.store.get(index + 1) {
        Some(next) => project_interpolated(input, index, current, next),
        None => RenderState::default(),
    }
}

fn project_static(input: &Projection<'_>, index: usize, frame: &Frame) -> RenderState {
    let positions: BTreeMap<EntityId, Position> = input
        .registry
        .iter()
        .map(|e| (e.id.clone(), frame.position_of(&e.id).unwrap_or(input.fallback)))
        .collect();

    let ball = match frame.ball.owner_id.as_deref() {
        Some(owner) if input.registry.contains(owner) => {
            let at = ball_anchor(input, frame);
            BallState { x: at.x, y: at.y, owner_id: Some(owner.to_string()) }
        }
        _ => BallState::loose(frame.ball.position()),
    };

    RenderState { frame_index: index, progress: input.progress, mode: RenderMode::Static, positions, ball }
}

fn project_interpolated(input: &Projection<'_>, index: usize, current: &Frame, next: &Frame) -> RenderState {
    let t = input.progress;
    let positions = input
        .registry
        .iter()
        .map(|e| {
            let from = current.position_of(&e.id).unwrap_or(input.fallback);
            let to = next.position_of(&e.id).unwrap_or(from);
            (e.id.clone(), from.lerp(&to, t))
        })
        .collect();

    let ball = BallState::loose(ball_anchor(input, current).lerp(&ball_anchor(input, next), t));

    RenderState { frame_index: index, progress: t, mode: RenderMode::Interpolated, positions, ball }
}

/// Where the ball sits in `frame`: derived from a live owner, stored otherwise.
fn ball_anchor(input: &Projection<'_>, frame: &Frame) -> Position {
    match frame.ball.owner_id.as_deref() {
        Some(owner) if input.registry.contains(owner) => {
            frame.position_of(owner).unwrap_or(input.fallback).offset(input.possession_offset)
        }
        _ => frame.ball.position(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Team};

    const OFFSET: Position = Position::new(1.0, 1.0);

    fn frame(entries: &[(&str, f64, f64)], ball: BallState) -> Frame {
        let positions = entries.iter().map(|(id, x, y)| (id.to_string(), Position::new(*x, *y))).collect();
        Frame::new(positions, ball)
    }

    fn registry(ids: &[&str]) -> EntityRegistry {
        EntityRegistry::new(ids.iter().map(|id| Entity::new(*id, Team::A, "", "")).collect())
    }

    fn input<'a>(store: &'a KeyframeStore, registry: &'a EntityRegistry, playing: bool, progress: f64) -> Projection<'a> {
        Projection { store, registry, playing, progress, fallback: Position::ORIGIN, possession_offset: OFFSET }
    }

    fn two_frames() -> KeyframeStore {
        KeyframeStore::from_frames(vec![
            frame(&[("A-0", 5.0, 34.0)], BallState::loose(Position::new(50.0, 30.0))),
            frame(&[("A-0", 20.0, 34.0)], BallState::loose(Position::new(60.0, 40.0))),
        ])
        .unwrap()
    }

    #[test]
    fn test_static_returns_stored_values() {
        let store = two_frames();
        let reg = registry(&["A-0"]);
        let state = project(&input(&store, &reg, false, 0.7));
        assert_eq!(state.mode, RenderMode::Static);
        assert_eq!(state.positions["A-0"], Position::new(5.0, 34.0));
        assert_eq!(state.ball.position(), Position::new(50.0, 30.0));
    }

    #[test]
    fn test_static_is_idempotent() {
        let store = two_frames();
        let reg = registry(&["A-0", "A-9"]);
        let a = project(&input(&store, &reg, false, 0.0));
        let b = project(&input(&store, &reg, false, 0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_entity_defaults() {
        let store = two_frames();
        let reg = registry(&["A-0", "A-9"]);
        let state = project(&input(&store, &reg, false, 0.0));
        assert_eq!(state.positions["A-9"], Position::ORIGIN);

        let state = project(&input(&store, &reg, true, 0.5));
        assert_eq!(state.positions["A-9"], Position::ORIGIN);
    }

    #[test]
    fn test_stale_ids_are_hidden() {
        let store = KeyframeStore::new(frame(
            &[("A-0", 5.0, 34.0), ("A-gone", 1.0, 1.0)],
            BallState::loose(Position::ORIGIN),
        ));
        let reg = registry(&["A-0"]);
        let state = project(&input(&store, &reg, false, 0.0));
        assert_eq!(state.positions.len(), 1);
        assert!(!state.positions.contains_key("A-gone"));
    }

    #[test]
    fn test_interpolates_midway() {
        let store = two_frames();
        let reg = registry(&["A-0"]);
        let state = project(&input(&store, &reg, true, 0.5));
        assert_eq!(state.mode, RenderMode::Interpolated);
        assert_eq!(state.positions["A-0"], Position::new(12.5, 34.0));
        assert_eq!(state.ball.position(), Position::new(55.0, 35.0));
        assert_eq!(state.ball.owner_id, None);
    }

    #[test]
    fn test_progress_zero_matches_current_frame() {
        let store = two_frames();
        let reg = registry(&["A-0"]);
        let state = project(&input(&store, &reg, true, 0.0));
        assert_eq!(state.positions["A-0"], Position::new(5.0, 34.0));
        assert_eq!(state.ball.position(), Position::new(50.0, 30.0));
    }

    #[test]
    fn test_progress_near_one_approaches_next() {
        let store = two_frames();
        let reg = registry(&["A-0"]);
        let state = project(&input(&store, &reg, true, 0.999_999));
        assert!((state.positions["A-0"].x - 20.0).abs() < 1e-3);
        assert!(state.positions["A-0"].x < 20.0);
    }

    #[test]
    fn test_missing_in_next_holds_current() {
        let store = KeyframeStore::from_frames(vec![
            frame(&[("A-0", 5.0, 34.0), ("A-1", 10.0, 10.0)], BallState::loose(Position::ORIGIN)),
            frame(&[("A-0", 20.0, 34.0)], BallState::loose(Position::ORIGIN)),
        ])
        .unwrap();
        let reg = registry(&["A-0", "A-1"]);
        let state = project(&input(&store, &reg, true, 0.5));
        assert_eq!(state.positions["A-1"], Position::new(10.0, 10.0));
    }

    #[test]
    fn test_playing_on_last_frame_is_static() {
        let mut store = two_frames();
        store.select(1);
        let reg = registry(&["A-0"]);
        let state = project(&input(&store, &reg, true, 0.5));
        assert_eq!(state.mode, RenderMode::Static);
        assert_eq!(state.positions["A-0"], Position::new(20.0, 34.0));
    }

    #[test]
    fn test_ball_follows_owner_in_static_mode() {
        let mut ball = BallState::loose(Position::new(99.0, 99.0));
        ball.owner_id = Some("A-0".to_string());
        let store = KeyframeStore::new(frame(&[("A-0", 10.0, 10.0)], ball));
        let reg = registry(&["A-0"]);
        let state = project(&input(&store, &reg, false, 0.0));
        assert_eq!(state.ball.position(), Position::new(11.0, 11.0));
        assert_eq!(state.ball.owner_id.as_deref(), Some("A-0"));
    }

    #[test]
    fn test_removed_owner_releases_ball() {
        let mut ball = BallState::loose(Position::new(11.0, 11.0));
        ball.owner_id = Some("A-gone".to_string());
        let store = KeyframeStore::new(frame(&[("A-0", 10.0, 10.0)], ball));
        let reg = registry(&["A-0"]);
        let state = project(&input(&store, &reg, false, 0.0));
        assert_eq!(state.ball.owner_id, None);
        assert_eq!(state.ball.position(), Position::new(11.0, 11.0));
    }

    #[test]
    fn test_interpolated_ball_starts_at_owner() {
        let mut stale = BallState::loose(Position::new(41.0, 41.0));
        stale.owner_id = Some("A-0".to_string());
        let store = KeyframeStore::from_frames(vec![
            frame(&[("A-0", 10.0, 10.0)], stale),
            frame(&[("A-0", 30.0, 10.0)], BallState::possessed_by("A-0", Position::new(30.0, 10.0), OFFSET)),
        ])
        .unwrap();
        let reg = registry(&["A-0"]);

        let at_rest = project(&input(&store, &reg, false, 0.0));
        let at_start = project(&input(&store, &reg, true, 0.0));
        assert_eq!(at_rest.ball.position(), Position::new(11.0, 11.0));
        assert_eq!(at_start.ball.position(), at_rest.ball.position());

        let midway = project(&input(&store, &reg, true, 0.5));
        assert_eq!(midway.ball.position(), Position::new(21.0, 11.0));
        assert_eq!(midway.ball.owner_id, None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Projection is total over cursor, registry and progress
            #[test]
            fn prop_projection_never_panics(
                frames in 1usize..5,
                cursor in 0usize..5,
                extra_ids in proptest::collection::vec("[A-B]-[0-9]{1,2}", 0..6),
                progress in 0.0f64..1.0,
                playing in any::<bool>()
            ) {
                let store_frames = (0..frames)
                    .map(|i| frame(&[("A-0", i as f64, 1.0)], BallState::loose(Position::ORIGIN)))
                    .collect();
                let mut store = KeyframeStore::from_frames(store_frames).unwrap();
                store.select(cursor);
                let mut ids = vec!["A-0".to_string()];
                ids.extend(extra_ids);
                let reg = EntityRegistry::new(ids.iter().map(|id| Entity::new(id.clone(), Team::A, "", "")).collect());

                let state = project(&input(&store, &reg, playing, progress));
                prop_assert!(state.positions.len() <= reg.len());
                for id in state.positions.keys() {
                    prop_assert!(reg.contains(id));
                }
            }
        }
    }
}
