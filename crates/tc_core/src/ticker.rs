//! Frame ticker
//!
//! Host-driven replacement for a self-rescheduling display callback. The host
//! asks for a handle, waits for its next display refresh, then hands the
//! handle back with a timestamp. Only the most recently scheduled handle is
//! live: scheduling again or cancelling invalidates older ones, so a late
//! callback after stop or teardown is ignored.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default, Clone)]
pub struct FrameTicker {
    generation: u64,
    pending: Option<TickHandle>,
}

impl FrameTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new handle, superseding any outstanding one.
    pub fn schedule(&mut self) -> TickHandle {
        self.generation += 1;
        let handle = TickHandle(self.generation);
        self.pending = Some(handle);
        handle
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fresh ticker whose handles never collide with ones issued by `self`.
    pub fn successor(&self) -> Self {
        Self { generation: self.generation, pending: None }
    }

    /// Consumes `handle` if it is the live one.
    pub fn fire(&mut self, handle: TickHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
