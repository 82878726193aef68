//! Timeline Playback Engine
//!
//! Continuous-time clock over the keyframe store. Each live tick advances
//! `progress` by `elapsed / step_duration_ms`; crossing 1.0 moves the store
//! cursor to the next frame, carrying the remainder. Reaching the end of the
//! last frame stops playback with progress pinned at 1.0.

use crate::store::KeyframeStore;
use crate::ticker::{FrameTicker, TickHandle};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PlaybackState {
    Stopped,
    Playing { started_at_ms: f64, last_tick_ms: f64 },
}

/// Result of handing a tick back to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Stale or cancelled handle; nothing changed
    Ignored,
    /// Still playing; request the next display refresh for this handle
    Continue(TickHandle),
    /// Reached the end of the last frame
    Finished,
}

#[derive(Debug, Clone)]
pub struct PlaybackEngine {
    state: PlaybackState,
    progress: f64,
    step_duration_ms: f64,
    ticker: FrameTicker,
}

impl PlaybackEngine {
    pub fn new(step_duration_ms: f64) -> Self {
        Self { state: PlaybackState::Stopped, progress: 0.0, step_duration_ms, ticker: FrameTicker::new() }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    /// Fraction of the way from the current frame to the next.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn step_duration_ms(&self) -> f64 {
        self.step_duration_ms
    }

    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.ticker.pending()
    }

    /// Starts from the current frame, or rewinds to frame 0 when the cursor
    /// already sits on the last frame.
    pub fn start(&mut self, store: &mut KeyframeStore, now_ms: f64) -> TickHandle {
        if self.is_playing() {
            if let Some(handle) = self.ticker.pending() {
                return handle;
            }
        }

        if store.is_last(store.current_index()) {
            store.select(0);
        }
        self.progress = 0.0;
        self.state = PlaybackState::Playing { started_at_ms: now_ms, last_tick_ms: now_ms };
        info!("Playback started at frame {} of {}", store.current_index(), store.len());
        self.ticker.schedule()
    }

    /// Halts the clock, keeping the cursor and progress where they are.
    pub fn stop(&mut self) -> bool {
        self.ticker.cancel();
        if !self.is_playing() {
            return false;
        }
        self.state = PlaybackState::Stopped;
        info!("Playback stopped at progress {:.3}", self.progress);
        true
    }

    /// Stops and clears progress; used when the timeline is moved under us.
    pub fn reset(&mut self) {
        self.stop();
        self.progress = 0.0;
    }

    /// Continues the handle sequence of `previous`, so ticks issued for a
    /// replaced document stay stale here.
    pub fn inherit_ticks(&mut self, previous: &PlaybackEngine) {
        self.ticker = previous.ticker.successor();
    }

    pub fn tick(&mut self, handle: TickHandle, now_ms: f64, store: &mut KeyframeStore) -> TickOutcome {
        if !self.ticker.fire(handle) {
            debug!("Ignoring stale tick {}", handle.id());
            return TickOutcome::Ignored;
        }
        let PlaybackState::Playing { started_at_ms, last_tick_ms } = self.state else {
            return TickOutcome::Ignored;
        };

        let elapsed = now_ms - last_tick_ms;
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        self.progress += elapsed / self.step_duration_ms;
        self.state = PlaybackState::Playing { started_at_ms, last_tick_ms: now_ms };

        while self.progress >= 1.0 {
            let current = store.current_index();
            if store.is_last(current) {
                self.state = PlaybackState::Stopped;
                self.progress = 1.0;
                info!("Playback finished at frame {}", current);
                return TickOutcome::Finished;
            }
            store.select(current + 1);
            self.progress -= 1.0;
            debug!("Playback advanced to frame {}", current + 1);
        }

        TickOutcome::Continue(self.ticker.schedule())
    }
}
