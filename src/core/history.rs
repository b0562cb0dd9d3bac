//! One-slot undo/redo history.
//!
//! The machine remembers exactly one step backwards (the state occupied
//! before the latest transition) and one step forwards (the state left
//! behind by the latest undo). Both slots are explicit options; a state
//! legitimately named by the empty string is still a real state and never
//! collides with "no history".

use super::config::StateName;
use serde::{Deserialize, Serialize};
use std::mem;

/// Single-depth previous/next state pair backing undo and redo.
///
/// [`record`](HistorySlot::record) stores the state being left by a
/// transition. [`undo`](HistorySlot::undo) exchanges the current state with
/// the stored previous state, arming redo; [`redo`](HistorySlot::redo) is
/// the mirror image. Each slot holds one step, so two consecutive undos
/// (or redos) never both succeed.
///
/// # Example
///
/// ```rust
/// use turnstile::HistorySlot;
///
/// let mut slot = HistorySlot::new();
/// let mut current = "running".to_string();
///
/// slot.record("idle".to_string());
/// assert_eq!(slot.previous(), Some("idle"));
///
/// assert!(slot.undo(&mut current));
/// assert_eq!(current, "idle");
/// assert_eq!(slot.next(), Some("running"));
///
/// assert!(slot.redo(&mut current));
/// assert_eq!(current, "running");
/// assert!(slot.next().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySlot {
    previous: Option<StateName>,
    next: Option<StateName>,
}

impl HistorySlot {
    /// Create an empty slot: no undo, no redo available.
    pub fn new() -> Self {
        Self::default()
    }

    /// State stored for undo, if any.
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// State stored for redo, if any.
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Record the state being left by a transition.
    ///
    /// Overwrites any earlier undo target. The redo slot is deliberately
    /// left untouched: a pending redo target survives later transitions
    /// and can go stale relative to the machine's current state.
    pub fn record(&mut self, from: StateName) {
        self.previous = Some(from);
    }

    /// Exchange `current` with the stored previous state.
    ///
    /// On success the old current state moves into the redo slot and the
    /// undo slot empties, so a second consecutive undo returns `false`.
    /// Returns `false` without touching anything when no previous state is
    /// stored.
    pub fn undo(&mut self, current: &mut StateName) -> bool {
        match self.previous.take() {
            Some(previous) => {
                self.next = Some(mem::replace(current, previous));
                true
            }
            None => false,
        }
    }

    /// Exchange `current` with the stored next state.
    ///
    /// On success the old current state moves into the undo slot and the
    /// redo slot empties. Returns `false` without touching anything when no
    /// next state is stored.
    pub fn redo(&mut self, current: &mut StateName) -> bool {
        match self.next.take() {
            Some(next) => {
                self.previous = Some(mem::replace(current, next));
                true
            }
            None => false,
        }
    }

    /// Drop both slots, disabling undo and redo.
    pub fn clear(&mut self) {
        self.previous = None;
        self.next = None;
    }
}
