//! Undo/Redo snapshot stack.
//!
//! Host-side history: a list of settled node-list snapshots and a cursor.
//! The entry under the cursor is the current state; `save` drops every
//! entry after the cursor (the redo branch) before pushing. Undo and redo
//! only move the cursor and hand back the snapshot to install.

use lp_core::model::Snapshot;

#[derive(Debug, Clone)]
pub struct CommandStack {
    entries: Vec<Snapshot>,
    index: usize,
    /// Maximum number of entries, including the current one.
    max_depth: usize,
}

impl CommandStack {
    pub fn new(initial: Snapshot, max_depth: usize) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Record a new settled state.
    /// Returns `false` (and records nothing) when it equals the current one.
    pub fn save(&mut self, snapshot: Snapshot) -> bool {
        if self.entries[self.index] == snapshot {
            log::debug!("history: snapshot equals current entry, not saved");
            return false;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);
        if self.entries.len() > self.max_depth {
            self.entries.remove(0);
        }
        self.index = self.entries.len() - 1;
        log::debug!("history: saved entry {} of {}", self.index + 1, self.entries.len());
        true
    }

    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.entries[self.index].clone())
    }

    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.entries[self.index].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn current(&self) -> &Snapshot {
        &self.entries[self.index]
    }

    /// Forget everything and start over from `initial`.
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.entries.push(initial);
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
