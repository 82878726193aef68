//! # tc_core - Tactic Board Keyframe Engine
//!
//! Editing and playback core for animated tactic boards: players and a ball
//! placed on a pitch across an ordered sequence of keyframes, played back as
//! a linear interpolation between consecutive frames.
//!
//! ## Features
//! - Keyframe store with stable entity identity across frames
//! - Drag interaction with nearest-entity possession snapping
//! - Host-driven playback clock with stale-tick cancellation
//! - Pure render-state projection that never fails
//! - JSON document format compatible with the tactic database export

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]

pub mod canonicalize;
pub mod config;
pub mod error;
pub mod formation;
pub mod geometry;
pub mod interaction;
pub mod io;
pub mod model;
pub mod persistence;
pub mod playback;
pub mod projector;
pub mod registry;
pub mod session;
pub mod store;
pub mod ticker;

pub use canonicalize::{canonicalize_frames, CanonicalFrames};
pub use config::EditorConfig;
pub use error::{Result, TacticError};
pub use geometry::{Pitch, Position};
pub use interaction::{DragTarget, InteractionController, PossessionRules};
pub use io::{ensure_tactic_schema, load_document_json, save_document_json, select_tactic};
pub use model::{BallState, Document, DocumentMeta, Entity, EntityId, Frame, Team, TeamMeta, TeamsMeta};
pub use persistence::{DocumentStore, JsonFileStore, Library, MemoryStore};
pub use playback::{PlaybackEngine, PlaybackState, TickOutcome};
pub use projector::{project, Projection, RenderMode, RenderState};
pub use registry::EntityRegistry;
pub use session::{Confirmed, EditorSession, PendingAction};
pub use store::KeyframeStore;
pub use ticker::{FrameTicker, TickHandle};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON Schema of the persisted document.
pub fn document_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(Document)
}
