use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::todo::Todo;

/// The log keeps at most this many entries; the oldest are dropped first.
pub const HISTORY_LIMIT: usize = 50;

/// What kind of mutation an entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Create,
    Update,
    Delete,
    Complete,
    Uncomplete,
}

/// One reversible mutation record. Immutable once appended.
///
/// `previous_state` is absent for creates, `new_state` is absent for
/// deletes; everything else carries both full records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub action: HistoryAction,
    pub todo_id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<Todo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_state: Option<Todo>,
}

impl HistoryEntry {
    pub fn new(
        action: HistoryAction,
        todo_id: Uuid,
        previous_state: Option<Todo>,
        new_state: Option<Todo>,
    ) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4(),
            action,
            todo_id,
            timestamp: Utc::now(),
            previous_state,
            new_state,
        }
    }
}

/// The undo/redo ledger: an entry list plus a cursor separating applied
/// (undoable) entries from superseded (redoable) ones.
///
/// `cursor == None` means no entries are applied. Entries after the
/// cursor are the redo branch; appending a new entry discards them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl HistoryLog {
    pub fn new() -> HistoryLog {
        HistoryLog::default()
    }

    /// Rehydrate from persisted entries, keeping at most the most
    /// recent [`HISTORY_LIMIT`]. The cursor points at the last entry:
    /// persisted entries are already reflected in the persisted todo
    /// collection, so they are all undoable and none is redoable.
    pub fn with_entries(mut entries: Vec<HistoryEntry>) -> HistoryLog {
        if entries.len() > HISTORY_LIMIT {
            let excess = entries.len() - HISTORY_LIMIT;
            entries.drain(..excess);
        }
        let cursor = entries.len().checked_sub(1);
        HistoryLog { entries, cursor }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        match self.cursor {
            None => !self.entries.is_empty(),
            Some(i) => i + 1 < self.entries.len(),
        }
    }

    /// Append a new entry: truncate the stale redo branch, push, and cap
    /// at [`HISTORY_LIMIT`], dropping the oldest entries. The cursor ends
    /// on the new last entry.
    pub fn push(&mut self, entry: HistoryEntry) {
        let applied = self.cursor.map_or(0, |i| i + 1);
        self.entries.truncate(applied);
        self.entries.push(entry);
        if self.entries.len() > HISTORY_LIMIT {
            let excess = self.entries.len() - HISTORY_LIMIT;
            self.entries.drain(..excess);
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Move the cursor back one step and return the entry it was on.
    /// Returns `None` when nothing is applied. Never removes entries.
    pub fn step_back(&mut self) -> Option<&HistoryEntry> {
        let i = self.cursor?;
        self.cursor = i.checked_sub(1);
        Some(&self.entries[i])
    }

    /// Move the cursor forward one step and return the entry it lands on.
    /// Returns `None` when the redo branch is empty.
    pub fn step_forward(&mut self) -> Option<&HistoryEntry> {
        let next = self.cursor.map_or(0, |i| i + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        Some(&self.entries[next])
    }
}
