//! Page orchestrator: owns the entries and commits swaps.
//!
//! A drop records the single `SwappingState` immediately (which flips the
//! two tiles' derived states on the next render) and schedules the commit
//! for `swap_duration_ms` later. `tick` performs the commit once due. Only
//! one swap may be in flight; further drops are rejected until it commits
//! or is cancelled.

use crate::history::{SwapHistory, SwapRecord};
use crate::schedule::{CommitScheduler, ScheduledCommit};
use ps_core::{
    DropInfo, Entries, ImageId, ImageState, Slot, SwapConfig, SwapError, SwapId, SwappingState,
    derive_image_state, image_state_for,
};

/// Why a drop did not start a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The dragged image was dropped on its own tile.
    SelfDrop,
    /// Another swap has not committed yet.
    SwapInFlight,
    /// One of the images is not on this page.
    UnknownImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Accepted(SwapId),
    Ignored(IgnoreReason),
}

/// The authoritative page state.
pub struct PrintPage {
    entries: Entries,
    swapping: Option<SwappingState>,
    scheduler: CommitScheduler,
    history: SwapHistory,
    config: SwapConfig,
    next_swap_id: u64,
}

impl PrintPage {
    pub fn new(entries: Entries, config: SwapConfig) -> Self {
        Self {
            entries,
            swapping: None,
            scheduler: CommitScheduler::new(),
            history: SwapHistory::new(config.history_depth),
            config,
            next_swap_id: 1,
        }
    }

    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub fn swapping(&self) -> Option<&SwappingState> {
        self.swapping.as_ref()
    }

    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    pub fn pending_commit(&self) -> Option<ScheduledCommit> {
        self.scheduler.pending()
    }

    // ─── Derived tile state ──────────────────────────────────────────────

    pub fn image_state(&self, slot: Slot) -> Option<ImageState> {
        derive_image_state(&self.entries, self.swapping.as_ref(), slot)
    }

    pub fn image_state_of(&self, image: ImageId) -> ImageState {
        image_state_for(image, self.swapping.as_ref())
    }

    /// Every tile's state, from one snapshot of `(entries, swapping)`.
    pub fn image_states(&self) -> Vec<(Slot, ImageState)> {
        let swapping = self.swapping.as_ref();
        self.entries
            .slots()
            .map(|(slot, image)| (slot, image_state_for(image, swapping)))
            .collect()
    }

    // ─── Swap lifecycle ──────────────────────────────────────────────────

    /// Handle a drop of `drop.image` onto the tile showing `target`.
    pub fn on_drop(&mut self, target: ImageId, drop: DropInfo, now_ms: f64) -> DropOutcome {
        if drop.image == target {
            return DropOutcome::Ignored(IgnoreReason::SelfDrop);
        }
        if self.swapping.is_some() || !self.scheduler.is_idle() {
            log::warn!(
                "drop of {} onto {target} rejected: a swap is still in flight",
                drop.image
            );
            return DropOutcome::Ignored(IgnoreReason::SwapInFlight);
        }
        if self.entries.locate(target).is_none() || self.entries.locate(drop.image).is_none() {
            log::warn!("drop of {} onto {target} rejected: unknown image", drop.image);
            return DropOutcome::Ignored(IgnoreReason::UnknownImage);
        }

        let id = SwapId(self.next_swap_id);
        self.next_swap_id += 1;
        self.swapping = Some(SwappingState {
            id,
            original: target,
            replacement: drop.image,
            drop_x: drop.drop_x,
            drop_y: drop.drop_y,
        });
        let due_ms = now_ms + f64::from(self.config.swap_duration_ms);
        self.scheduler.schedule(id, due_ms);
        log::debug!("swap {id:?}: {} -> {target}, commit at {due_ms}ms", drop.image);
        DropOutcome::Accepted(id)
    }

    /// Commit the pending swap if it is due.
    ///
    /// # Errors
    /// `SwapError::ImageNotFound` if an identifier vanished from the entries.
    /// The commit is aborted: entries are left as they were and the
    /// swapping state is cleared.
    pub fn tick(&mut self, now_ms: f64) -> Result<Option<SwapRecord>, SwapError> {
        let Some(id) = self.scheduler.take_due(now_ms) else {
            return Ok(None);
        };
        let swap = match self.swapping.take() {
            Some(swap) if swap.id == id => swap,
            other => {
                log::warn!("commit {id:?} fired without matching swap state");
                self.swapping = other;
                return Ok(None);
            }
        };

        let next = match self.entries.swapped(swap.original, swap.replacement) {
            Ok(next) => next,
            Err(e) => {
                log::error!("swap {id:?} aborted: {e}");
                return Err(e);
            }
        };
        self.entries = next;

        let record = SwapRecord {
            id,
            original: swap.original,
            replacement: swap.replacement,
        };
        self.history.push(record);
        log::info!(
            "swap {id:?} committed: {} <-> {}",
            swap.original,
            swap.replacement
        );
        Ok(Some(record))
    }

    /// Cancel the in-flight swap `id`, leaving the entries unchanged.
    pub fn cancel(&mut self, id: SwapId) -> bool {
        if !self.scheduler.cancel(id) {
            return false;
        }
        if self.swapping.is_some_and(|s| s.id == id) {
            self.swapping = None;
        }
        log::debug!("swap {id:?} cancelled");
        true
    }

    /// Cancel whatever swap is in flight.
    pub fn cancel_pending(&mut self) -> bool {
        match self.swapping {
            Some(swap) => self.cancel(swap.id),
            None => false,
        }
    }

    // ─── Undo / Redo ─────────────────────────────────────────────────────

    /// Reverse the last committed swap. Refused while a swap is in flight.
    pub fn undo(&mut self) -> Result<Option<SwapRecord>, SwapError> {
        if self.swapping.is_some() {
            return Ok(None);
        }
        self.history.undo(&mut self.entries)
    }

    /// Re-apply the last undone swap. Refused while a swap is in flight.
    pub fn redo(&mut self) -> Result<Option<SwapRecord>, SwapError> {
        if self.swapping.is_some() {
            return Ok(None);
        }
        self.history.redo(&mut self.entries)
    }

    pub fn can_undo(&self) -> bool {
        self.swapping.is_none() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.swapping.is_none() && self.history.can_redo()
    }
}
