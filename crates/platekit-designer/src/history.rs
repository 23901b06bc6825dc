//! Undo/redo history
//!
//! A linear list of full snapshots plus a cursor. Committing a new state
//! discards every snapshot after the cursor, so redo is only possible
//! directly after an undo.

use platekit_core::EditError;

/// Default number of snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Snapshot history over any cloneable state.
///
/// Snapshots are deep copies (`Clone`), never shared with the live state.
#[derive(Debug, Clone)]
pub struct EditHistory<S> {
    snapshots: Vec<S>,
    cursor: usize,
    limit: usize,
}

impl<S: Clone> EditHistory<S> {
    /// Creates an empty history keeping at most `limit` snapshots.
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Creates a history whose first snapshot is `initial`.
    pub fn with_initial(initial: &S, limit: usize) -> Self {
        let mut history = Self::new(limit);
        history.commit(initial);
        history
    }

    /// Record a new state: truncate after the cursor, append, move the cursor to it.
    pub fn commit(&mut self, state: &S) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push(state.clone());
        if self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back one snapshot and return it.
    pub fn undo(&mut self) -> Result<&S, EditError> {
        if !self.can_undo() {
            return Err(EditError::NothingToUndo);
        }
        self.cursor -= 1;
        Ok(&self.snapshots[self.cursor])
    }

    /// Step forward one snapshot and return it.
    pub fn redo(&mut self) -> Result<&S, EditError> {
        if !self.can_redo() {
            return Err(EditError::NothingToRedo);
        }
        self.cursor += 1;
        Ok(&self.snapshots[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor < self.snapshots.len() - 1
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&S> {
        self.snapshots.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of steps available to undo.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Number of steps available to redo.
    pub fn redo_depth(&self) -> usize {
        if self.snapshots.is_empty() {
            0
        } else {
            self.snapshots.len() - 1 - self.cursor
        }
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = 0;
    }

    /// Drop everything and start over from `state`.
    pub fn reset(&mut self, state: &S) {
        self.clear();
        self.commit(state);
    }
}

impl<S: Clone> Default for EditHistory<S> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
