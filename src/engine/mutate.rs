use chrono::Utc;
use uuid::Uuid;

use crate::model::category::{Category, CategoryPatch};
use crate::model::filters::Filters;
use crate::model::history::{HistoryAction, HistoryEntry};
use crate::model::todo::{Todo, TodoDraft, TodoPatch};

use super::TodoEngine;

impl TodoEngine {
    // -----------------------------------------------------------------------
    // Todo mutations. Each records a history entry (except reorder) and
    // leaves the collection id-unique.
    // -----------------------------------------------------------------------

    /// Add a new todo at the end of the manual order. A draft whose title
    /// is empty after trimming is silently rejected.
    pub fn create(&mut self, draft: TodoDraft) {
        if draft.title.trim().is_empty() {
            return;
        }
        let todo = Todo::from_draft(draft, self.todos.len());
        self.record(HistoryEntry::new(
            HistoryAction::Create,
            todo.id,
            None,
            Some(todo.clone()),
        ));
        self.todos.push(todo);
        self.changes.todos = true;
    }

    /// Merge partial fields into a todo and bump `updated_at`. Unknown id
    /// is a no-op; a patch that blanks the title is silently rejected.
    pub fn update(&mut self, id: Uuid, patch: TodoPatch) {
        if patch.blanks_title() {
            return;
        }
        let Some(todo) = self.todo_mut(id) else {
            return;
        };
        let previous = todo.clone();
        patch.apply(todo);
        todo.updated_at = Utc::now();
        let entry = HistoryEntry::new(
            HistoryAction::Update,
            id,
            Some(previous),
            Some(todo.clone()),
        );
        self.record(entry);
        self.changes.todos = true;
    }

    /// Flip the completion flag. The history action reflects the
    /// resulting state: `Complete` or `Uncomplete`.
    pub fn toggle_complete(&mut self, id: Uuid) {
        let Some(todo) = self.todo_mut(id) else {
            return;
        };
        let previous = todo.clone();
        todo.completed = !todo.completed;
        todo.updated_at = Utc::now();
        let action = if todo.completed {
            HistoryAction::Complete
        } else {
            HistoryAction::Uncomplete
        };
        let entry = HistoryEntry::new(action, id, Some(previous), Some(todo.clone()));
        self.record(entry);
        self.changes.todos = true;
    }

    /// Remove a todo. The full removed record rides in the history entry
    /// so undo can resurrect it exactly.
    pub fn delete(&mut self, id: Uuid) {
        let Some(idx) = self.todos.iter().position(|t| t.id == id) else {
            return;
        };
        let removed = self.todos.remove(idx);
        self.record(HistoryEntry::new(
            HistoryAction::Delete,
            id,
            Some(removed),
            None,
        ));
        self.changes.todos = true;
    }

    /// Clone an existing todo: new id, `" (Copy)"` title suffix,
    /// completion reset, fresh timestamps, appended at the end of the
    /// manual order.
    pub fn duplicate(&mut self, id: Uuid) {
        let Some(source) = self.todos.iter().find(|t| t.id == id) else {
            return;
        };
        let now = Utc::now();
        let mut copy = source.clone();
        copy.id = Uuid::new_v4();
        copy.title = format!("{} (Copy)", source.title);
        copy.completed = false;
        copy.created_at = now;
        copy.updated_at = now;
        copy.order = self.todos.len();
        self.record(HistoryEntry::new(
            HistoryAction::Create,
            copy.id,
            None,
            Some(copy.clone()),
        ));
        self.todos.push(copy);
        self.changes.todos = true;
    }

    /// Move the element at `from` to position `to` in the manual-order
    /// sequence, then renumber every todo's `order` to its positional
    /// index and bump every `updated_at`.
    ///
    /// Deliberately not recorded in history: manual reordering is not
    /// undoable.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from >= self.todos.len() {
            return;
        }
        // Work over the ordering sequence, not raw insertion order
        self.todos.sort_by_key(|t| t.order);
        let moved = self.todos.remove(from);
        let to = to.min(self.todos.len());
        self.todos.insert(to, moved);

        let now = Utc::now();
        for (index, todo) in self.todos.iter_mut().enumerate() {
            todo.order = index;
            todo.updated_at = now;
        }
        self.changes.todos = true;
    }

    // -----------------------------------------------------------------------
    // Bulk operations. Each affected todo still gets its own history
    // entry — bulk actions undo one step at a time.
    // -----------------------------------------------------------------------

    pub fn bulk_delete(&mut self, ids: &[Uuid]) {
        for &id in ids {
            self.delete(id);
        }
    }

    /// Complete every listed todo that is still open. Already-completed
    /// todos are untouched (no entry recorded for them).
    pub fn bulk_complete(&mut self, ids: &[Uuid]) {
        for &id in ids {
            let Some(todo) = self.todo_mut(id) else {
                continue;
            };
            if todo.completed {
                continue;
            }
            let previous = todo.clone();
            todo.completed = true;
            todo.updated_at = Utc::now();
            let entry = HistoryEntry::new(
                HistoryAction::Complete,
                id,
                Some(previous),
                Some(todo.clone()),
            );
            self.record(entry);
            self.changes.todos = true;
        }
    }

    /// Reassign the named category, by value, to every listed todo.
    /// No-op if the category id is unknown.
    pub fn bulk_update_category(&mut self, ids: &[Uuid], category_id: Uuid) {
        let Some(category) = self
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .cloned()
        else {
            return;
        };
        for &id in ids {
            let Some(todo) = self.todo_mut(id) else {
                continue;
            };
            let previous = todo.clone();
            todo.assign_category(&category);
            todo.updated_at = Utc::now();
            let entry = HistoryEntry::new(
                HistoryAction::Update,
                id,
                Some(previous),
                Some(todo.clone()),
            );
            self.record(entry);
            self.changes.todos = true;
        }
    }

    /// Delete every currently-completed todo.
    pub fn clear_completed(&mut self) {
        let completed: Vec<Uuid> = self
            .todos
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id)
            .collect();
        self.bulk_delete(&completed);
    }

    // -----------------------------------------------------------------------
    // Category operations. The catalog entry is canonical; todos hold
    // denormalized copies, so edits must cascade explicitly. None of
    // these record history.
    // -----------------------------------------------------------------------

    /// Append a category to the catalog. Returns the assigned id.
    pub fn add_category(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Uuid {
        let category = Category::new(name, color, icon);
        let id = category.id;
        self.categories.push(category);
        self.changes.categories = true;
        id
    }

    /// Update the canonical entry and rewrite the embedded copy held by
    /// every todo assigned to it. Unknown id is a no-op.
    pub fn update_category(&mut self, id: Uuid, patch: CategoryPatch) {
        let Some(category) = self.categories.iter_mut().find(|c| c.id == id) else {
            return;
        };
        category.apply(&patch);
        let updated = category.clone();
        self.changes.categories = true;

        let now = Utc::now();
        for todo in self.todos.iter_mut().filter(|t| t.category.id == id) {
            todo.assign_category(&updated);
            todo.updated_at = now;
            self.changes.todos = true;
        }
    }

    /// Remove a category, first reassigning its todos to the fallback
    /// (the first remaining catalog entry). Deleting the last category
    /// is a no-op — there would be nowhere to reassign.
    pub fn delete_category(&mut self, id: Uuid) {
        let Some(idx) = self.categories.iter().position(|c| c.id == id) else {
            return;
        };
        let Some(fallback) = self
            .categories
            .iter()
            .find(|c| c.id != id)
            .cloned()
        else {
            return;
        };

        let now = Utc::now();
        for todo in self.todos.iter_mut().filter(|t| t.category.id == id) {
            todo.assign_category(&fallback);
            todo.updated_at = now;
            self.changes.todos = true;
        }
        self.categories.remove(idx);
        self.changes.categories = true;
    }

    // -----------------------------------------------------------------------
    // Filter criteria
    // -----------------------------------------------------------------------

    pub fn set_filters(&mut self, filters: Filters) {
        if self.filters != filters {
            self.filters = filters;
            self.changes.filters = true;
        }
    }

    pub fn reset_filters(&mut self) {
        self.set_filters(Filters::default());
    }

    // -----------------------------------------------------------------------

    /// Append a mutation record: the ledger truncates any stale redo
    /// branch, caps itself, and moves its cursor.
    fn record(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
        self.changes.history = true;
    }
}
