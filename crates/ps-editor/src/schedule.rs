//! Deferred swap commit.
//!
//! Holds at most one pending commit, keyed by `SwapId` so a stale cancel or
//! tick can never act on a newer swap. Time is whatever clock the host
//! passes in (typically `performance.now()`), in milliseconds.

use ps_core::SwapId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledCommit {
    pub id: SwapId,
    pub due_ms: f64,
}

#[derive(Debug, Default)]
pub struct CommitScheduler {
    pending: Option<ScheduledCommit>,
}

impl CommitScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `id` to commit at `due_ms`. Returns the commit it displaced,
    /// if one was pending.
    pub fn schedule(&mut self, id: SwapId, due_ms: f64) -> Option<ScheduledCommit> {
        self.pending.replace(ScheduledCommit { id, due_ms })
    }

    /// Cancel the pending commit if it belongs to `id`.
    pub fn cancel(&mut self, id: SwapId) -> bool {
        match self.pending {
            Some(p) if p.id == id => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> Option<ScheduledCommit> {
        self.pending
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Remove and return the pending commit once `now_ms` has reached it.
    pub fn take_due(&mut self, now_ms: f64) -> Option<SwapId> {
        match self.pending {
            Some(p) if now_ms >= p.due_ms => {
                self.pending = None;
                Some(p.id)
            }
            _ => None,
        }
    }
}
