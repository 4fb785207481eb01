use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;

/// Task priority. Ordering ranks High above Medium above Low.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A single todo record. The category is embedded by value — a full copy
/// taken at assignment time, not a reference into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Manual-order index, dense over the live collection after a reorder.
    pub order: usize,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Todo {
    /// Build a todo from draft fields. Assigns a fresh id, stamps both
    /// timestamps with the same instant, and normalizes tags.
    pub fn from_draft(draft: TodoDraft, order: usize) -> Todo {
        let now = Utc::now();
        Todo {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            completed: draft.completed,
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
            order,
            tags: normalize_tags(draft.tags),
        }
    }

    /// Assign a category by value — copies the category's current fields.
    pub fn assign_category(&mut self, category: &Category) {
        self.category = category.clone();
    }

    /// True when the todo is past due and still open.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }
}

/// Input for creating a todo: everything the caller controls. Identity,
/// timestamps, and order are assigned by the engine.
#[derive(Debug, Clone)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub category: Category,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>, priority: Priority, category: Category) -> Self {
        TodoDraft {
            title: title.into(),
            description: None,
            completed: false,
            priority,
            category,
            due_date: None,
            tags: Vec::new(),
        }
    }
}

/// Partial update for a todo. `None` leaves a field untouched; the nested
/// options for `description` and `due_date` distinguish "set" from "clear".
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub tags: Option<Vec<String>>,
}

impl TodoPatch {
    /// True when the patch would set the title to an empty string.
    pub fn blanks_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| t.trim().is_empty())
    }

    /// Merge the patch into a todo. Does not touch `updated_at` — the
    /// engine stamps that alongside history recording.
    pub fn apply(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
        if let Some(category) = self.category {
            todo.category = category;
        }
        if let Some(due_date) = self.due_date {
            todo.due_date = due_date;
        }
        if let Some(tags) = self.tags {
            todo.tags = normalize_tags(tags);
        }
    }
}

/// Lower-case, trim, drop empties, and de-duplicate tags, preserving
/// first-occurrence order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
