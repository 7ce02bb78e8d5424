//! Bounded undo history of match snapshots.

use crate::models::MatchState;
use std::collections::VecDeque;

/// Snapshots kept for undo; older ones are dropped.
pub const UNDO_DEPTH: usize = 10;

/// Stack of deep copies of the match state, taken before each submitted turn.
#[derive(Clone, Debug)]
pub struct UndoHistory {
    snapshots: VecDeque<MatchState>,
    capacity: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::with_capacity(UNDO_DEPTH)
    }
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `capacity` snapshots (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record `state` as the most recent snapshot, dropping the oldest when full.
    pub fn snapshot(&mut self, state: &MatchState) {
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(state.clone());
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<MatchState> {
        self.snapshots.pop_back()
    }

    /// Restore the most recent snapshot into `state`. Returns false (and leaves `state` alone)
    /// when there is nothing to undo.
    pub fn undo(&mut self, state: &mut MatchState) -> bool {
        match self.pop() {
            Some(previous) => {
                *state = previous;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
