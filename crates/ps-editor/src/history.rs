//! Undo/Redo for committed swaps.
//!
//! A swap is its own inverse, so a record only needs the two identifiers.
//! Undo and redo both re-run the swap on a copy of the entries and replace
//! them, the same copy-then-replace path the animated commit uses.

use ps_core::{Entries, ImageId, SwapError, SwapId};

/// A committed swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRecord {
    pub id: SwapId,
    /// Image of the drop target.
    pub original: ImageId,
    /// Image of the drag source.
    pub replacement: ImageId,
}

/// Bounded undo/redo stacks of swap records.
pub struct SwapHistory {
    undo_stack: Vec<SwapRecord>,
    redo_stack: Vec<SwapRecord>,
    /// Maximum undo depth.
    max_depth: usize,
}

impl SwapHistory {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(64)),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Record a freshly committed swap. Clears the redo stack.
    pub fn push(&mut self, record: SwapRecord) {
        if self.max_depth == 0 {
            return;
        }
        self.undo_stack.push(record);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Reverse the last swap.
    ///
    /// # Errors
    /// `SwapError::ImageNotFound` if the record no longer matches `entries`;
    /// the record stays on the undo stack and `entries` is untouched.
    pub fn undo(&mut self, entries: &mut Entries) -> Result<Option<SwapRecord>, SwapError> {
        let Some(record) = self.undo_stack.pop() else {
            return Ok(None);
        };
        match entries.swapped(record.original, record.replacement) {
            Ok(next) => {
                *entries = next;
                self.redo_stack.push(record);
                Ok(Some(record))
            }
            Err(e) => {
                self.undo_stack.push(record);
                Err(e)
            }
        }
    }

    /// Re-apply the last undone swap.
    pub fn redo(&mut self, entries: &mut Entries) -> Result<Option<SwapRecord>, SwapError> {
        let Some(record) = self.redo_stack.pop() else {
            return Ok(None);
        };
        match entries.swapped(record.original, record.replacement) {
            Ok(next) => {
                *entries = next;
                self.undo_stack.push(record);
                Ok(Some(record))
            }
            Err(e) => {
                self.redo_stack.push(record);
                Err(e)
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
