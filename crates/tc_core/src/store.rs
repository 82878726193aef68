//! Keyframe store
//!
//! Ordered, never-empty frame sequence plus the current-frame cursor.
//! Order is playback order.

use crate::geometry::Position;
use crate::model::{EntityId, Frame};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeStore {
    frames: Vec<Frame>,
    current: usize,
}

impl KeyframeStore {
    pub fn new(initial: Frame) -> Self {
        Self { frames: vec![initial], current: 0 }
    }

    /// `None` when `frames` is empty.
    pub fn from_frames(frames: Vec<Frame>) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        Some(Self { frames, current: 0 })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false for a store built through the public constructors.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.get(self.current)
    }

    pub fn current_mut(&mut self) -> Option<&mut Frame> {
        self.frames.get_mut(self.current)
    }

    pub fn last_index(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    pub fn is_last(&self, index: usize) -> bool {
        index >= self.last_index()
    }

    /// Moves the cursor. Out-of-range indices are rejected.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.frames.len() {
            debug!("Ignoring select of frame {} (len {})", index, self.frames.len());
            return false;
        }
        self.current = index;
        true
    }

    /// Clones the last frame under a fresh id and makes it current.
    pub fn append_frame(&mut self) -> Option<usize> {
        let Some(last) = self.frames.last() else {
            warn!("append_frame on an empty store");
            return None;
        };
        let frame = last.successor();
        self.frames.push(frame);
        self.current = self.frames.len() - 1;
        debug!("Appended frame {} of {}", self.current, self.frames.len());
        Some(self.current)
    }

    /// Removes the frame at `index`; refuses to drop the last remaining frame.
    pub fn delete_frame(&mut self, index: usize) -> bool {
        if self.frames.len() <= 1 || index >= self.frames.len() {
            debug!("Refusing to delete frame {} (len {})", index, self.frames.len());
            return false;
        }
        self.frames.remove(index);
        if index < self.current {
            self.current -= 1;
        }
        self.current = self.current.min(self.last_index());
        debug!("Deleted frame {}, current now {}", index, self.current);
        true
    }

    pub fn set_note(&mut self, index: usize, note: impl Into<String>) -> bool {
        match self.frames.get_mut(index) {
            Some(frame) => {
                frame.note = note.into();
                true
            }
            None => false,
        }
    }

    /// Gives every frame a position for `id`, keeping existing entries.
    pub fn insert_everywhere(&mut self, id: &EntityId, at: Position) {
        for frame in &mut self.frames {
            frame.positions.entry(id.clone()).or_insert(at);
        }
    }
}
