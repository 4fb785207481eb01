use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::todo::Priority;

/// Completion-status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    Active,
    Completed,
    /// Open todos whose due date has passed
    Overdue,
}

/// Sort key for the query pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Manual order — the user-controlled sequence position
    Order,
    CreatedAt,
    DueDate,
    Priority,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filter and sort criteria. Transient with respect to the todo
/// collection, but persisted across sessions as its own record — fields
/// missing from an older persisted copy take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    /// Case-insensitive substring search over title, description, and tags
    pub search: String,
    #[serde(rename = "filter")]
    pub status: StatusFilter,
    /// Restrict to a single category by id
    pub category: Option<Uuid>,
    pub priority: Option<Priority>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    /// Required tags — every listed tag must be present (AND semantics)
    pub tags: Vec<String>,
}

impl Default for Filters {
    fn default() -> Self {
        Filters {
            search: String::new(),
            status: StatusFilter::All,
            category: None,
            priority: None,
            sort_by: SortKey::Order,
            sort_order: SortOrder::Asc,
            tags: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let f = Filters::default();
        assert_eq!(f.status, StatusFilter::All);
        assert_eq!(f.sort_by, SortKey::Order);
        assert_eq!(f.sort_order, SortOrder::Asc);
        assert!(f.search.is_empty());
        assert!(f.category.is_none());
        assert!(f.priority.is_none());
        assert!(f.tags.is_empty());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&Filters::default()).unwrap();
        assert!(json.contains("\"filter\":\"all\""));
        assert!(json.contains("\"sortBy\":\"order\""));
        assert!(json.contains("\"sortOrder\":\"asc\""));
    }

    #[test]
    fn test_serde_defaults_on_partial_record() {
        // An older persisted record may omit fields entirely
        let f: Filters = serde_json::from_str(r#"{"search":"milk"}"#).unwrap();
        assert_eq!(f.search, "milk");
        assert_eq!(f.status, StatusFilter::All);
        assert_eq!(f.sort_by, SortKey::Order);
    }

    #[test]
    fn test_sort_key_round_trip() {
        for key in [
            SortKey::Order,
            SortKey::CreatedAt,
            SortKey::DueDate,
            SortKey::Priority,
            SortKey::Title,
        ] {
            let json = serde_json::to_string(&key).unwrap();
            let back: SortKey = serde_json::from_str(&json).unwrap();
            assert_eq!(back, key);
        }
        assert_eq!(
            serde_json::to_string(&SortKey::CreatedAt).unwrap(),
            "\"createdAt\""
        );
    }
}
