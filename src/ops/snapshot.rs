use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::category::Category;
use crate::model::todo::Todo;

/// Format version tag written into every export.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Error type for snapshot encode/decode
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid import data format: {0}")]
    InvalidFormat(#[from] serde_json::Error),
}

/// A full, self-contained serialization of todos and categories at one
/// instant. Dates travel as ISO-8601 text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub todos: Vec<Todo>,
    pub categories: Vec<Category>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

impl Snapshot {
    pub fn new(todos: Vec<Todo>, categories: Vec<Category>) -> Snapshot {
        Snapshot {
            todos,
            categories,
            export_date: Utc::now(),
            version: SNAPSHOT_VERSION.to_string(),
        }
    }
}

/// Serialize the current collections into interchange text.
pub fn export_snapshot(todos: &[Todo], categories: &[Category]) -> Result<String, SnapshotError> {
    let snapshot = Snapshot::new(todos.to_vec(), categories.to_vec());
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Parse interchange text. Any top-level shape other than the export
/// format is a format error; nothing is applied on failure.
pub fn parse_snapshot(data: &str) -> Result<Snapshot, SnapshotError> {
    Ok(serde_json::from_str(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::category::default_categories;
    use crate::model::todo::{Priority, TodoDraft};

    fn sample_state() -> (Vec<Todo>, Vec<Category>) {
        let cats = default_categories();
        let mut todo = Todo::from_draft(
            TodoDraft::new("Buy milk", Priority::Low, cats[0].clone()),
            0,
        );
        todo.tags = vec!["errands".into()];
        todo.due_date = Some(Utc::now());
        (vec![todo], cats)
    }

    #[test]
    fn test_export_shape() {
        let (todos, cats) = sample_state();
        let text = export_snapshot(&todos, &cats).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert!(value["todos"].is_array());
        assert!(value["categories"].is_array());
        assert!(value["exportDate"].is_string());
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["todos"][0]["title"], "Buy milk");
        // Dates are text timestamps on the wire
        assert!(value["todos"][0]["createdAt"].is_string());
        assert!(value["todos"][0]["dueDate"].is_string());
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let (todos, cats) = sample_state();
        let text = export_snapshot(&todos, &cats).unwrap();
        let snapshot = parse_snapshot(&text).unwrap();

        assert_eq!(snapshot.todos, todos);
        assert_eq!(snapshot.categories, cats);
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(parse_snapshot("not json {{{").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_top_level_shape() {
        // A bare array is not the export format
        assert!(parse_snapshot("[1, 2, 3]").is_err());
        // Missing the todos collection
        let err = parse_snapshot(r#"{"categories": [], "exportDate": "2026-01-01T00:00:00Z", "version": "1.0"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_error_message_names_the_format() {
        let err = parse_snapshot("{}").unwrap_err();
        assert!(err.to_string().starts_with("invalid import data format"));
    }
}
