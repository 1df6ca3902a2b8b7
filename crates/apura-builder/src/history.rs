//! Linear undo/redo history over configuration snapshots
//!
//! The history stores immutable pre-mutation snapshots in a single vector
//! with a cursor. Recording a snapshot while undone discards the redo
//! branch. Capacity is unbounded; the stack lives and dies with one
//! builder session.

use apura_model::AnalysisConfiguration;

/// Snapshot stack with a cursor into the linear sequence
#[derive(Debug, Default)]
pub struct History {
    snapshots: Vec<AnalysisConfiguration>,
    /// Index of the newest reachable snapshot; -1 before the first record
    cursor: isize,
}

impl History {
    /// Empty history
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: -1,
        }
    }

    /// Record the pre-mutation state
    ///
    /// Must be called exactly once, immediately before applying a mutation.
    /// Truncates any redo branch: snapshots past the cursor are dropped,
    /// the new snapshot is appended, and the cursor moves to it.
    pub fn record(&mut self, before: &AnalysisConfiguration) {
        let keep = usize::try_from(self.cursor + 1).unwrap_or(0);
        self.snapshots.truncate(keep);
        self.snapshots.push(before.clone());
        self.cursor = self.snapshots.len() as isize - 1;
    }

    /// Step back, returning the configuration to activate
    ///
    /// `None` when there is nothing further to undo; the caller keeps the
    /// current configuration.
    pub fn undo(&mut self) -> Option<AnalysisConfiguration> {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.snapshots.get(self.cursor as usize).cloned()
        } else {
            None
        }
    }

    /// Step forward, returning the configuration to activate
    ///
    /// `None` when the cursor is already at the newest snapshot.
    pub fn redo(&mut self) -> Option<AnalysisConfiguration> {
        if self.cursor < self.snapshots.len() as isize - 1 {
            self.cursor += 1;
            self.snapshots.get(self.cursor as usize).cloned()
        } else {
            None
        }
    }

    /// Whether a further undo would change the active configuration
    #[inline]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo branch exists
    #[inline]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.snapshots.len() as isize - 1
    }

    /// Number of stored snapshots
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether nothing was recorded yet
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Current cursor position (-1 before the first record)
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> isize {
        self.cursor
    }
}
