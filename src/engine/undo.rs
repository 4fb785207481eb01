use crate::model::history::{HistoryAction, HistoryEntry};

use super::TodoEngine;

impl TodoEngine {
    /// Reverse the most recent applied mutation. Returns whether a step
    /// was taken. The ledger keeps the entry; only the cursor moves, so
    /// the step stays redoable.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.step_back().cloned() else {
            return false;
        };
        self.apply_reverse(&entry);
        self.changes.todos = true;
        true
    }

    /// Re-apply the most recently undone mutation. Returns whether a
    /// step was taken.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.step_forward().cloned() else {
            return false;
        };
        self.apply_forward(&entry);
        self.changes.todos = true;
        true
    }

    fn apply_reverse(&mut self, entry: &HistoryEntry) {
        match entry.action {
            HistoryAction::Create => {
                self.todos.retain(|t| t.id != entry.todo_id);
            }
            HistoryAction::Delete => {
                // Resurrect the removed record exactly as it was
                if let Some(previous) = &entry.previous_state {
                    self.todos.push(previous.clone());
                }
            }
            HistoryAction::Update | HistoryAction::Complete | HistoryAction::Uncomplete => {
                if let Some(previous) = &entry.previous_state {
                    if let Some(todo) = self.todo_mut(entry.todo_id) {
                        *todo = previous.clone();
                    }
                }
            }
        }
    }

    fn apply_forward(&mut self, entry: &HistoryEntry) {
        match entry.action {
            HistoryAction::Create => {
                if let Some(new) = &entry.new_state {
                    self.todos.push(new.clone());
                }
            }
            HistoryAction::Delete => {
                self.todos.retain(|t| t.id != entry.todo_id);
            }
            HistoryAction::Update | HistoryAction::Complete | HistoryAction::Uncomplete => {
                if let Some(new) = &entry.new_state {
                    if let Some(todo) = self.todo_mut(entry.todo_id) {
                        *todo = new.clone();
                    }
                }
            }
        }
    }
}
