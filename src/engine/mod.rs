mod mutate;
mod undo;

use chrono::Utc;
use uuid::Uuid;

use crate::model::category::{default_categories, Category};
use crate::model::filters::Filters;
use crate::model::history::{HistoryEntry, HistoryLog};
use crate::model::todo::Todo;
use crate::ops::query::{self, Stats};
use crate::ops::snapshot::{self, SnapshotError};

/// Which persisted records have changed since the last [`TodoEngine::take_changes`].
///
/// The engine never writes anywhere itself; after each mutation the
/// collaborator collects this set and persists (or batches) the dirty
/// records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub todos: bool,
    pub categories: bool,
    pub filters: bool,
    pub history: bool,
}

impl Changes {
    pub fn any(self) -> bool {
        self.todos || self.categories || self.filters || self.history
    }
}

/// Counts from an applied import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportResult {
    pub todos_added: usize,
    pub categories_added: usize,
}

/// The todo state engine: owns the live collection, the category
/// catalog, the filter criteria, and the undo/redo ledger. One engine
/// per session; every operation is synchronous and runs to completion.
#[derive(Debug, Default)]
pub struct TodoEngine {
    pub(crate) todos: Vec<Todo>,
    pub(crate) categories: Vec<Category>,
    pub(crate) filters: Filters,
    pub(crate) history: HistoryLog,
    pub(crate) changes: Changes,
}

impl TodoEngine {
    /// A fresh engine seeded with the default category catalog.
    pub fn new() -> TodoEngine {
        TodoEngine {
            todos: Vec::new(),
            categories: default_categories(),
            filters: Filters::default(),
            history: HistoryLog::new(),
            changes: Changes::default(),
        }
    }

    /// Rehydrate an engine from persisted records. Persisted history
    /// entries are treated as fully applied (undoable, none redoable).
    pub fn from_parts(
        todos: Vec<Todo>,
        categories: Vec<Category>,
        filters: Filters,
        history: Vec<HistoryEntry>,
    ) -> TodoEngine {
        TodoEngine {
            todos,
            categories,
            filters,
            history: HistoryLog::with_entries(history),
            changes: Changes::default(),
        }
    }

    // --- Read surface ---

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The live collection run through the current filter criteria.
    pub fn filtered_todos(&self) -> Vec<&Todo> {
        query::filter_todos(&self.todos, &self.filters, Utc::now())
    }

    /// Derived statistics for the live collection.
    pub fn stats(&self) -> Stats {
        query::compute_stats(&self.todos, &self.categories, Utc::now())
    }

    /// Hand the accumulated dirty-record set to the caller and reset it.
    pub fn take_changes(&mut self) -> Changes {
        std::mem::take(&mut self.changes)
    }

    // --- Snapshot codec surface ---

    /// Serialize the full todo collection and category catalog.
    pub fn export(&self) -> Result<String, SnapshotError> {
        snapshot::export_snapshot(&self.todos, &self.categories)
    }

    /// Parse and apply an exported snapshot. On a format error nothing is
    /// applied. Imported todos get fresh ids and are appended; imported
    /// categories are appended unless a category with the same name
    /// already exists.
    pub fn import(&mut self, data: &str) -> Result<ImportResult, SnapshotError> {
        let parsed = snapshot::parse_snapshot(data)?;

        let todos_added = parsed.todos.len();
        for mut todo in parsed.todos {
            todo.id = Uuid::new_v4();
            todo.tags = crate::model::todo::normalize_tags(todo.tags);
            self.todos.push(todo);
        }

        let mut categories_added = 0;
        for category in parsed.categories {
            let name_taken = self.categories.iter().any(|c| c.name == category.name);
            if !name_taken {
                self.categories.push(category);
                categories_added += 1;
            }
        }

        if todos_added > 0 {
            self.changes.todos = true;
        }
        if categories_added > 0 {
            self.changes.categories = true;
        }
        Ok(ImportResult {
            todos_added,
            categories_added,
        })
    }

    // --- Internal helpers ---

    pub(crate) fn todo_mut(&mut self, id: Uuid) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|t| t.id == id)
    }
}
