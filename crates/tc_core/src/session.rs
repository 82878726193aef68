//! Editor session
//!
//! Single owner of all mutable editing state for one open document: entity
//! registry, keyframe store, playback engine and pointer interaction. Every
//! operation goes through this type; there is no global state.
//!
//! Dragging and playback are mutually exclusive: pointer operations are
//! no-ops while playing, and anything that moves the timeline under the
//! playback clock (frame select, delete, append, load, close) cancels it.

use crate::config::EditorConfig;
use crate::error::{Result, TacticError};
use crate::formation;
use crate::geometry::{Pitch, Position};
use crate::interaction::{DragTarget, InteractionController, PossessionRules};
use crate::model::document::new_tactic_id;
use crate::model::{BallState, Document, DocumentMeta, EntityId, Frame, Team, TeamsMeta};
use crate::persistence::{DocumentStore, Library};
use crate::playback::{PlaybackEngine, PlaybackState, TickOutcome};
use crate::projector::{project, Projection, RenderState};
use crate::registry::{spawn_position, EntityRegistry};
use crate::store::KeyframeStore;
use crate::ticker::TickHandle;
use tracing::{debug, info, warn};

/// Destructive actions held until the user confirms them.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    ResetFormation,
    LoadDocument(Box<Document>),
    DeleteDocument(String),
}

impl PendingAction {
    pub fn label(&self) -> &'static str {
        match self {
            PendingAction::ResetFormation => "reset formation",
            PendingAction::LoadDocument(_) => "load document",
            PendingAction::DeleteDocument(_) => "delete document",
        }
    }
}

/// What a confirmation actually did.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmed {
    Nothing,
    FormationReset,
    Loaded { tactic_id: String },
    LoadRejected,
    Deleted { remaining: Vec<Document> },
}

pub struct EditorSession {
    config: EditorConfig,
    /// Document header; `players` is kept empty, the registry owns entities
    meta: DocumentMeta,
    registry: EntityRegistry,
    store: KeyframeStore,
    playback: PlaybackEngine,
    interaction: InteractionController,
    pending: Option<PendingAction>,
}

impl EditorSession {
    /// Fresh document: both default formations in a single frame, loose ball
    /// at the centre spot.
    pub fn new_document(title: impl Into<String>, config: EditorConfig) -> Result<Self> {
        config.validate()?;
        let pitch = config.default_pitch;
        let frame = Frame::new(formation::default_positions(&pitch), BallState::loose(pitch.center()));
        let meta = DocumentMeta {
            tactic_id: new_tactic_id(),
            title: title.into(),
            pitch,
            teams: TeamsMeta::default(),
            players: Vec::new(),
            last_modified: None,
        };
        info!("New document {}", meta.tactic_id);
        Ok(Self {
            playback: PlaybackEngine::new(config.step_duration_ms),
            config,
            meta,
            registry: EntityRegistry::new(formation::default_entities()),
            store: KeyframeStore::new(frame),
            interaction: InteractionController::new(),
            pending: None,
        })
    }

    pub fn open(document: Document, config: EditorConfig) -> Result<Self> {
        config.validate()?;
        document.validate()?;
        let Document { mut meta, frames } = document;
        let players = std::mem::take(&mut meta.players);
        let store = KeyframeStore::from_frames(frames)
            .ok_or_else(|| TacticError::EmptyDocument { tactic_id: meta.tactic_id.clone() })?;

        info!("Opened document {} ({} frames, {} players)", meta.tactic_id, store.len(), players.len());
        Ok(Self {
            playback: PlaybackEngine::new(config.step_duration_ms),
            config,
            meta,
            registry: EntityRegistry::new(players),
            store,
            interaction: InteractionController::new(),
            pending: None,
        })
    }

    /// Snapshot for persistence, stamped with the current time.
    pub fn to_document(&self) -> Document {
        let mut meta = self.meta.clone();
        meta.players = self.registry.entities().to_vec();
        let mut document = Document { meta, frames: self.store.frames().to_vec() };
        document.touch();
        document
    }

    /// Tears the session down; any outstanding tick handle goes stale.
    pub fn close(mut self) {
        self.playback.reset();
        info!("Closed document {}", self.meta.tactic_id);
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    pub fn tactic_id(&self) -> &str {
        &self.meta.tactic_id
    }

    pub fn pitch(&self) -> Pitch {
        self.meta.pitch
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.meta.title = title.into();
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn store(&self) -> &KeyframeStore {
        &self.store
    }

    pub fn current_index(&self) -> usize {
        self.store.current_index()
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    fn possession_rules(&self) -> PossessionRules {
        PossessionRules { capture_radius: self.config.capture_radius, offset: self.config.possession_offset }
    }

    // ------------------------------------------------------------------
    // Entity registry
    // ------------------------------------------------------------------

    /// Adds a placeholder entity and gives it a spawn position in every frame.
    pub fn add_entity(&mut self, team: Team) -> EntityId {
        let id = self.registry.add(team);
        let spawn = spawn_position(team, &self.meta.pitch, self.config.spawn_inset);
        self.store.insert_everywhere(&id, spawn);
        id
    }

    /// Frames keep the removed id's positions; projection hides them.
    pub fn remove_entity(&mut self, id: &str) -> bool {
        if self.registry.remove(id).is_none() {
            return false;
        }
        if self.interaction.target() == Some(&DragTarget::Entity(id.to_string())) {
            self.interaction.clear();
        }
        debug!("Removed entity {}", id);
        true
    }

    pub fn relabel(&mut self, id: &str, label: impl Into<String>) -> bool {
        self.registry.relabel(id, label)
    }

    /// Replaces all entities and the current frame's layout with the default
    /// formations. Other frames are untouched. Reached through
    /// [`PendingAction::ResetFormation`] and [`EditorSession::confirm`].
    pub fn reset_to_default_formation(&mut self) {
        self.playback.reset();
        self.interaction.clear();
        self.registry.replace_all(formation::default_entities());

        let positions = formation::default_positions(&self.meta.pitch);
        let offset = self.config.possession_offset;
        if let Some(frame) = self.store.current_mut() {
            frame.positions = positions;
            let owner_pos = frame.ball.owner_id.as_deref().and_then(|owner| frame.position_of(owner));
            match owner_pos {
                Some(pos) => frame.ball.set_position(pos.offset(offset)),
                None => frame.ball.owner_id = None,
            }
        }
        info!("Reset frame {} to default formation", self.store.current_index());
    }

    // ------------------------------------------------------------------
    // Keyframe store
    // ------------------------------------------------------------------

    pub fn append_frame(&mut self) -> Option<usize> {
        self.playback.reset();
        self.store.append_frame()
    }

    /// Refused deletions leave playback running.
    pub fn delete_frame(&mut self, index: usize) -> bool {
        if self.store.len() <= 1 || index >= self.store.len() {
            return false;
        }
        self.playback.reset();
        self.store.delete_frame(index)
    }

    /// Jumps the timeline; cancels playback and clears progress. Out of range
    /// indices change nothing.
    pub fn select_frame(&mut self, index: usize) -> bool {
        if index >= self.store.len() {
            return false;
        }
        self.playback.reset();
        self.store.select(index)
    }

    pub fn set_note(&mut self, index: usize, note: impl Into<String>) -> bool {
        self.store.set_note(index, note)
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn progress(&self) -> f64 {
        self.playback.progress()
    }

    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.playback.pending_tick()
    }

    pub fn start_playback(&mut self, now_ms: f64) -> TickHandle {
        self.interaction.release();
        self.playback.start(&mut self.store, now_ms)
    }

    pub fn stop_playback(&mut self) -> bool {
        self.playback.stop()
    }

    /// Play/stop button. Returns the first tick handle when playback starts.
    pub fn toggle_play(&mut self, now_ms: f64) -> Option<TickHandle> {
        if self.playback.is_playing() {
            self.playback.stop();
            None
        } else {
            Some(self.start_playback(now_ms))
        }
    }

    pub fn on_tick(&mut self, handle: TickHandle, now_ms: f64) -> TickOutcome {
        self.playback.tick(handle, now_ms, &mut self.store)
    }

    // ------------------------------------------------------------------
    // Pointer interaction
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, target: DragTarget) -> bool {
        if self.playback.is_playing() {
            return false;
        }
        if let DragTarget::Entity(id) = &target {
            if !self.registry.contains(id) {
                debug!("Ignoring press on unknown entity {}", id);
                return false;
            }
        }
        self.interaction.press(target);
        true
    }

    /// `raw` is already in surface units; it is clamped to the pitch here.
    pub fn pointer_move(&mut self, raw: Position) -> bool {
        if self.playback.is_playing() {
            return false;
        }
        let rules = self.possession_rules();
        let Some(frame) = self.store.current_mut() else {
            return false;
        };
        self.interaction.drag_to(raw, frame, &self.registry, &self.meta.pitch, &rules)
    }

    pub fn pointer_up(&mut self) {
        self.interaction.release();
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.release();
    }

    // ------------------------------------------------------------------
    // Presentation
    // ------------------------------------------------------------------

    pub fn render_state(&self) -> RenderState {
        project(&Projection {
            store: &self.store,
            registry: &self.registry,
            playing: self.playback.is_playing(),
            progress: self.playback.progress(),
            fallback: self.config.fallback_position,
            possession_offset: self.config.possession_offset,
        })
    }

    // ------------------------------------------------------------------
    // Confirmation gate and persistence
    // ------------------------------------------------------------------

    /// Holds a destructive action until [`EditorSession::confirm`].
    pub fn request(&mut self, action: PendingAction) {
        debug!("Awaiting confirmation to {}", action.label());
        self.pending = Some(action);
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn confirm<S: DocumentStore>(&mut self, library: &mut Library<S>) -> Confirmed {
        match self.pending.take() {
            None => Confirmed::Nothing,
            Some(PendingAction::ResetFormation) => {
                self.reset_to_default_formation();
                Confirmed::FormationReset
            }
            Some(PendingAction::LoadDocument(document)) => match self.replace_document(*document) {
                Ok(()) => Confirmed::Loaded { tactic_id: self.meta.tactic_id.clone() },
                Err(e) => {
                    warn!("Refusing to load document: {}", e);
                    Confirmed::LoadRejected
                }
            },
            Some(PendingAction::DeleteDocument(tactic_id)) => {
                Confirmed::Deleted { remaining: library.delete_by_id(&tactic_id) }
            }
        }
    }

    /// Persists the current document. Failures are logged and reported as
    /// `false`; the session keeps working either way.
    pub fn save<S: DocumentStore>(&mut self, library: &mut Library<S>) -> bool {
        let document = self.to_document();
        match library.save(&document) {
            Some(_) => {
                self.meta.last_modified = document.meta.last_modified;
                true
            }
            None => false,
        }
    }

    fn replace_document(&mut self, document: Document) -> Result<()> {
        let config = self.config.clone();
        let mut replacement = EditorSession::open(document, config)?;
        self.playback.reset();
        replacement.playback.inherit_ticks(&self.playback);
        *self = replacement;
        Ok(())
    }
}
