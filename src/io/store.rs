use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::engine::TodoEngine;
use crate::model::category::{default_categories, Category};
use crate::model::filters::Filters;
use crate::model::history::HistoryEntry;
use crate::model::todo::Todo;

const TODOS_FILE: &str = "todos.json";
const CATEGORIES_FILE: &str = "categories.json";
const FILTERS_FILE: &str = "filters.json";
const HISTORY_FILE: &str = "history.json";

/// Everything the store read off disk, one field per record. Each field
/// falls back to its default independently.
#[derive(Debug, Clone, Default)]
pub struct StoreData {
    pub todos: Vec<Todo>,
    pub categories: Vec<Category>,
    pub filters: Filters,
    pub history: Vec<HistoryEntry>,
}

/// Per-record JSON persistence under one directory.
///
/// Reads are best-effort: a missing or unreadable record yields its
/// default so one corrupt file never takes the others down. Writes are
/// atomic (temp file + rename) and fail loudly.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Store {
        Store { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read all four records. Never fails; each record that is missing
    /// or malformed is replaced with its default (and malformed ones are
    /// logged).
    pub fn load(&self) -> StoreData {
        StoreData {
            todos: self.read_record(TODOS_FILE).unwrap_or_default(),
            categories: self
                .read_record(CATEGORIES_FILE)
                .unwrap_or_else(default_categories),
            filters: self.read_record(FILTERS_FILE).unwrap_or_default(),
            history: self.read_record(HISTORY_FILE).unwrap_or_default(),
        }
    }

    /// Load and rehydrate an engine in one step.
    pub fn load_engine(&self) -> TodoEngine {
        let data = self.load();
        TodoEngine::from_parts(data.todos, data.categories, data.filters, data.history)
    }

    pub fn save_todos(&self, todos: &[Todo]) -> io::Result<()> {
        self.write_record(TODOS_FILE, &todos)
    }

    pub fn save_categories(&self, categories: &[Category]) -> io::Result<()> {
        self.write_record(CATEGORIES_FILE, &categories)
    }

    pub fn save_filters(&self, filters: &Filters) -> io::Result<()> {
        self.write_record(FILTERS_FILE, filters)
    }

    pub fn save_history(&self, history: &[HistoryEntry]) -> io::Result<()> {
        self.write_record(HISTORY_FILE, &history)
    }

    /// Drain the engine's dirty-record set and persist exactly those
    /// records. Clean records are not rewritten.
    pub fn save_changes(&self, engine: &mut TodoEngine) -> io::Result<()> {
        let changes = engine.take_changes();
        if changes.todos {
            self.save_todos(engine.todos())?;
        }
        if changes.categories {
            self.save_categories(engine.categories())?;
        }
        if changes.filters {
            self.save_filters(engine.filters())?;
        }
        if changes.history {
            self.save_history(engine.history())?;
        }
        Ok(())
    }

    fn read_record<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("discarding malformed record {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write_record<T: Serialize>(&self, file: &str, value: &T) -> io::Result<()> {
        let path = self.dir.join(file);
        let content = serde_json::to_string_pretty(value)?;
        atomic_write(&path, content.as_bytes())
    }
}

/// Write via a sibling temp file and rename, so a crash mid-write never
/// leaves a truncated record behind.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
