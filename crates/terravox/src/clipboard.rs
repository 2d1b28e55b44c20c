//! # Selection Clipboard
//!
//! The in-memory sink a finished import hands its selection to. One slot,
//! last write wins, shared behind a lock so a future interactive surface
//! can read it from another thread.

use parking_lot::Mutex;

use terravox_import::VoxelSelection;

/// Single-slot clipboard for the most recent import result.
#[derive(Default)]
pub struct Clipboard {
    slot: Mutex<Option<VoxelSelection>>,
}

impl Clipboard {
    /// Creates an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a selection, replacing any previous content.
    pub fn store(&self, selection: VoxelSelection) {
        *self.slot.lock() = Some(selection);
    }

    /// A copy of the current content, if any.
    #[must_use]
    pub fn current(&self) -> Option<VoxelSelection> {
        self.slot.lock().clone()
    }
}
