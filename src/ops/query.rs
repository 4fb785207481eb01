use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use crate::model::category::Category;
use crate::model::filters::{Filters, SortKey, SortOrder, StatusFilter};
use crate::model::todo::{Priority, Todo};

/// Derived counts over the live collection. Never stored — recompute on
/// demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    /// Open todos with high priority
    pub high_priority: usize,
    /// Todo count per known category, zero counts included, in catalog order
    pub by_category: IndexMap<Uuid, usize>,
}

/// Apply filter criteria and sorting to a todo collection.
///
/// The pipeline order is fixed: text search, status, category, priority,
/// required tags, then a stable sort by the selected key with the
/// direction applied last — ties keep their original relative order in
/// both directions. The input is never mutated.
pub fn filter_todos<'a>(todos: &'a [Todo], filters: &Filters, now: DateTime<Utc>) -> Vec<&'a Todo> {
    let mut out: Vec<&Todo> = todos.iter().collect();

    if !filters.search.is_empty() {
        let needle = filters.search.to_lowercase();
        out.retain(|t| matches_search(t, &needle));
    }

    match filters.status {
        StatusFilter::All => {}
        StatusFilter::Active => out.retain(|t| !t.completed),
        StatusFilter::Completed => out.retain(|t| t.completed),
        StatusFilter::Overdue => out.retain(|t| t.is_overdue(now)),
    }

    if let Some(category_id) = filters.category {
        out.retain(|t| t.category.id == category_id);
    }

    if let Some(priority) = filters.priority {
        out.retain(|t| t.priority == priority);
    }

    if !filters.tags.is_empty() {
        out.retain(|t| filters.tags.iter().all(|tag| t.tags.contains(tag)));
    }

    out.sort_by(|a, b| {
        let ord = compare_by_key(a, b, filters.sort_by);
        match filters.sort_order {
            SortOrder::Asc => ord,
            // Equal stays Equal, so the sort remains stable under Desc
            SortOrder::Desc => ord.reverse(),
        }
    });

    out
}

fn matches_search(todo: &Todo, needle: &str) -> bool {
    todo.title.to_lowercase().contains(needle)
        || todo
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
        || todo.tags.iter().any(|tag| tag.contains(needle))
}

fn compare_by_key(a: &Todo, b: &Todo, key: SortKey) -> Ordering {
    match key {
        SortKey::Order => a.order.cmp(&b.order),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        // Missing due dates sort as an arbitrarily-far future date
        SortKey::DueDate => {
            let a_due = a.due_date.unwrap_or(DateTime::<Utc>::MAX_UTC);
            let b_due = b.due_date.unwrap_or(DateTime::<Utc>::MAX_UTC);
            a_due.cmp(&b_due)
        }
        SortKey::Priority => a.priority.cmp(&b.priority),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

/// Compute derived statistics in a single pass over the collection.
pub fn compute_stats(todos: &[Todo], categories: &[Category], now: DateTime<Utc>) -> Stats {
    let mut by_category: IndexMap<Uuid, usize> =
        categories.iter().map(|c| (c.id, 0)).collect();

    let mut completed = 0;
    let mut overdue = 0;
    let mut high_priority = 0;
    for todo in todos {
        if todo.completed {
            completed += 1;
        }
        if todo.is_overdue(now) {
            overdue += 1;
        }
        if !todo.completed && todo.priority == Priority::High {
            high_priority += 1;
        }
        if let Some(count) = by_category.get_mut(&todo.category.id) {
            *count += 1;
        }
    }

    Stats {
        total: todos.len(),
        completed,
        pending: todos.len() - completed,
        overdue,
        high_priority,
        by_category,
    }
}
