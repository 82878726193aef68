//! Document data model: entities, frames and the persisted document shape.

pub mod document;
pub mod entity;
pub mod frame;

pub use document::{Document, DocumentMeta, TeamMeta, TeamsMeta};
pub use entity::{Entity, EntityId, Team};
pub use frame::{BallState, Frame};
