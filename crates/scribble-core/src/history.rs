//! Branching undo/redo history.
//!
//! The store holds a linear list of snapshots and a cursor into it. Undo and
//! redo only move the cursor; a `commit` after an undo cuts the redo branch.

/// Linear snapshot history with a movable cursor.
///
/// Invariant: `cursor < snapshots.len()`, and `snapshots` is never empty.
#[derive(Debug, Clone)]
pub struct HistoryStore<T> {
    snapshots: Vec<T>,
    cursor: usize,
}

impl<T: Default> Default for HistoryStore<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> HistoryStore<T> {
    /// Create a history whose only snapshot is `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    /// The current snapshot.
    pub fn current(&self) -> &T {
        &self.snapshots[self.cursor]
    }

    /// Number of stored snapshots, including any redo branch.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; a history holds at least one snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the current snapshot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Snapshots reachable by undo/redo, oldest first.
    pub fn snapshots(&self) -> &[T] {
        &self.snapshots
    }

    /// Add a new snapshot after the cursor, discarding any redo branch.
    pub fn commit(&mut self, snapshot: T) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor += 1;
        log::debug!("history commit: cursor={} len={}", self.cursor, self.snapshots.len());
    }

    /// Replace the current snapshot in place.
    pub fn amend(&mut self, snapshot: T) {
        self.snapshots[self.cursor] = snapshot;
        log::trace!("history amend: cursor={}", self.cursor);
    }

    /// Step back one snapshot. Returns false at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        log::debug!("history undo: cursor={} len={}", self.cursor, self.snapshots.len());
        true
    }

    /// Step forward one snapshot. Returns false at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        log::debug!("history redo: cursor={} len={}", self.cursor, self.snapshots.len());
        true
    }
}

impl<T: Clone> HistoryStore<T> {
    /// Commit a modified copy of the current snapshot.
    pub fn commit_with(&mut self, edit: impl FnOnce(&mut T)) {
        let mut next = self.current().clone();
        edit(&mut next);
        self.commit(next);
    }

    /// Amend the current snapshot in place through a closure.
    pub fn amend_with(&mut self, edit: impl FnOnce(&mut T)) {
        edit(&mut self.snapshots[self.cursor]);
        log::trace!("history amend: cursor={}", self.cursor);
    }
}
