//! Tactic board command line tooling
//!
//! Headless operations over tactic documents: creation, inspection,
//! playback, canonicalization and library management.

use anyhow::{bail, Result};
use serde::Serialize;
use tc_core::{
    Document, EditorConfig, EditorSession, JsonFileStore, Library, Pitch, RenderState, TickOutcome,
};
use tracing::{debug, info};

/// One-line overview of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub tactic_id: String,
    pub title: String,
    pub pitch: Pitch,
    pub frames: usize,
    pub players: usize,
    pub notes: Vec<String>,
    pub last_modified: Option<i64>,
}

impl DocumentSummary {
    pub fn of(doc: &Document) -> Self {
        Self {
            tactic_id: doc.meta.tactic_id.clone(),
            title: doc.meta.title.clone(),
            pitch: doc.meta.pitch,
            frames: doc.frames.len(),
            players: doc.meta.players.len(),
            notes: doc.frames.iter().map(|f| f.note.clone()).collect(),
            last_modified: doc.meta.last_modified,
        }
    }
}

/// Fresh document with both default formations.
pub fn create_document(title: &str, config: EditorConfig) -> Result<Document> {
    Ok(EditorSession::new_document(title, config)?.to_document())
}

/// Plays `doc` from its first frame on a simulated clock ticking at `fps`.
///
/// Returns the render state after every tick, ending with the state after
/// playback finished.
pub fn play_document(doc: Document, config: EditorConfig, fps: f64) -> Result<Vec<RenderState>> {
    if !(fps.is_finite() && fps > 0.0) {
        bail!("fps must be positive, got {fps}");
    }
    let interval_ms = 1000.0 / fps;

    let mut session = EditorSession::open(doc, config)?;
    session.select_frame(0);

    let mut now_ms = 0.0;
    let mut states = vec![session.render_state()];
    let Some(mut handle) = session.toggle_play(now_ms) else {
        bail!("playback did not start");
    };
    info!("Playing {} at {} fps", session.tactic_id(), fps);

    loop {
        now_ms += interval_ms;
        match session.on_tick(handle, now_ms) {
            TickOutcome::Continue(next) => handle = next,
            TickOutcome::Finished => {
                states.push(session.render_state());
                break;
            }
            TickOutcome::Ignored => bail!("tick {} was rejected", handle.id()),
        }
        states.push(session.render_state());
    }

    debug!("Playback produced {} states over {:.0} ms", states.len(), now_ms);
    session.close();
    Ok(states)
}

pub fn list_library(path: &std::path::Path) -> Vec<DocumentSummary> {
    let mut library = Library::new(JsonFileStore::new(path));
    library.list_all().iter().map(DocumentSummary::of).collect()
}

/// Removes `tactic_id` and returns what is left.
pub fn delete_from_library(path: &std::path::Path, tactic_id: &str) -> Vec<DocumentSummary> {
    let mut library = Library::new(JsonFileStore::new(path));
    library.delete_by_id(tactic_id).iter().map(DocumentSummary::of).collect()
}
