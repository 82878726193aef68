//! Frame canonicalization for export consumers
//!
//! The player set is defined by frame 0. Every frame is restricted to that
//! set and entries missing from a later frame are forward-filled from the
//! previous frame, so downstream analysis sees dense, consistent frames.
//!
//! Frame maps are keyed in id order, so the player list follows the
//! document's `players` order instead; frame-0 ids without a player entry
//! come last in id order.

use crate::geometry::Position;
use crate::model::{Document, EntityId, Frame};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalFrames {
    pub frames: Vec<Frame>,
    /// Frame-0 player ids, in `meta.players` order
    pub player_ids: Vec<EntityId>,
}

pub fn canonicalize_frames(doc: &Document) -> CanonicalFrames {
    let Some(first) = doc.frames.first() else {
        return CanonicalFrames { frames: Vec::new(), player_ids: Vec::new() };
    };
    let listed = doc.meta.players.iter().map(|p| &p.id).filter(|id| first.positions.contains_key(*id));
    let unlisted = first.positions.keys().filter(|id| !doc.meta.players.iter().any(|p| &p.id == *id));
    let player_ids: Vec<EntityId> = listed.chain(unlisted).cloned().collect();

    let mut last: BTreeMap<EntityId, Position> = first.positions.clone();
    let frames = doc
        .frames
        .iter()
        .map(|raw| {
            let positions: BTreeMap<EntityId, Position> = player_ids
                .iter()
                .map(|id| {
                    let pos = raw.position_of(id).or_else(|| last.get(id).copied()).unwrap_or_default();
                    (id.clone(), pos)
                })
                .collect();
            last = positions.clone();
            Frame { id: raw.id.clone(), positions, ball: raw.ball.clone(), note: raw.note.clone() }
        })
        .collect();

    CanonicalFrames { frames, player_ids }
}

impl Document {
    /// Copy of this document with canonical frames.
    pub fn canonicalized(&self) -> Document {
        Document { meta: self.meta.clone(), frames: canonicalize_frames(self).frames }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Pitch;
    use crate::model::{BallState, DocumentMeta, Entity, Team, TeamsMeta};

    fn frame(entries: &[(&str, f64)]) -> Frame {
        let positions = entries.iter().map(|(id, x)| (id.to_string(), Position::new(*x, 10.0))).collect();
        Frame::new(positions, BallState::loose(Position::ORIGIN))
    }

    fn doc(frames: Vec<Frame>) -> Document {
        Document {
            meta: DocumentMeta {
                tactic_id: "t".to_string(),
                title: String::new(),
                pitch: Pitch::default(),
                teams: TeamsMeta::default(),
                players: Vec::new(),
                last_modified: None,
            },
            frames,
        }
    }

    #[test]
    fn test_frame0_defines_player_set() {
        let d = doc(vec![frame(&[("A-0", 1.0), ("A-1", 2.0)]), frame(&[("A-0", 3.0), ("B-7", 9.0)])]);
        let canon = canonicalize_frames(&d);
        assert_eq!(canon.player_ids, vec!["A-0".to_string(), "A-1".to_string()]);
        assert!(canon.frames.iter().all(|f| f.positions.len() == 2));
        assert!(!canon.frames[1].positions.contains_key("B-7"));
    }

    #[test]
    fn test_player_ids_follow_roster_order() {
        let mut d = doc(vec![frame(&[("A-0", 1.0), ("A-10", 2.0), ("A-2", 3.0), ("X-1", 4.0)])]);
        d.meta.players = ["A-0", "A-2", "A-10", "A-99"]
            .iter()
            .map(|id| Entity::new(*id, Team::A, "", ""))
            .collect();
        let canon = canonicalize_frames(&d);
        assert_eq!(canon.player_ids, vec!["A-0", "A-2", "A-10", "X-1"]);
    }

    #[test]
    fn test_forward_fill() {
        let d = doc(vec![frame(&[("A-0", 1.0), ("A-1", 2.0)]), frame(&[("A-0", 3.0)]), frame(&[("A-0", 4.0)])]);
        let canon = canonicalize_frames(&d);
        assert_eq!(canon.frames[1].position_of("A-1"), Some(Position::new(2.0, 10.0)));
        assert_eq!(canon.frames[2].position_of("A-1"), Some(Position::new(2.0, 10.0)));
        assert_eq!(canon.frames[2].position_of("A-0"), Some(Position::new(4.0, 10.0)));
    }

    #[test]
    fn test_keeps_ids_and_notes() {
        let mut f = frame(&[("A-0", 1.0)]);
        f.note = "press".to_string();
        let d = doc(vec![f.clone()]);
        let out = d.canonicalized();
        assert_eq!(out.frames[0].id, f.id);
        assert_eq!(out.frames[0].note, "press");
    }

    #[test]
    fn test_empty_document() {
        let canon = canonicalize_frames(&doc(Vec::new()));
        assert!(canon.frames.is_empty());
        assert!(canon.player_ids.is_empty());
    }
}
