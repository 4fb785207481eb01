use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named grouping label. Todos embed a full copy of the category they
/// are assigned to; the catalog entry is the canonical version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    /// Icon reference, interpreted by the presentation layer.
    pub icon: String,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
        }
    }

    /// Merge a partial update into this category.
    pub fn apply(&mut self, patch: &CategoryPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(icon) = &patch.icon {
            self.icon = icon.clone();
        }
    }
}

/// Partial update for a category. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// The catalog a fresh engine starts with. Also substitutes for a
/// missing or malformed persisted category record.
///
/// Ids are fixed constants, not minted per call: todos embed category
/// ids by value, so the seeded catalog must resolve to the same ids in
/// every session even when it was never persisted.
pub fn default_categories() -> Vec<Category> {
    fn seeded(id: u128, name: &str, color: &str, icon: &str) -> Category {
        Category {
            id: Uuid::from_u128(id),
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }
    vec![
        seeded(0xb1f2_4c01, "Personal", "#3b82f6", "User"),
        seeded(0xb1f2_4c02, "Work", "#ef4444", "Briefcase"),
        seeded(0xb1f2_4c03, "Shopping", "#10b981", "ShoppingCart"),
        seeded(0xb1f2_4c04, "Health", "#f59e0b", "Heart"),
        seeded(0xb1f2_4c05, "Learning", "#8b5cf6", "BookOpen"),
    ]
}
