use chrono::{Duration, Utc};
use petalstack::model::filters::{Filters, SortKey, SortOrder, StatusFilter};
use petalstack::model::todo::{Priority, TodoDraft, TodoPatch};
use petalstack::TodoEngine;
use pretty_assertions::assert_eq;

fn titles(todos: &[&petalstack::model::todo::Todo]) -> Vec<String> {
    todos.iter().map(|t| t.title.clone()).collect()
}

/// A full session: create, filter, toggle, undo/redo, stats.
#[test]
fn full_session_flow() {
    let mut engine = TodoEngine::new();
    let personal = engine.categories()[0].clone();
    let work = engine.categories()[1].clone();

    engine.create(TodoDraft::new("Buy milk", Priority::Low, personal.clone()));
    engine.create(TodoDraft::new(
        "Write report",
        Priority::High,
        work.clone(),
    ));
    let mut draft = TodoDraft::new("Call plumber", Priority::Medium, personal.clone());
    draft.due_date = Some(Utc::now() - Duration::days(1));
    engine.create(draft);

    assert_eq!(engine.todos().len(), 3);
    assert_eq!(engine.history().len(), 3);

    // Filter down to the work category
    engine.set_filters(Filters {
        category: Some(work.id),
        ..Default::default()
    });
    assert_eq!(titles(&engine.filtered_todos()), vec!["Write report"]);

    // Overdue view catches the plumber
    engine.set_filters(Filters {
        status: StatusFilter::Overdue,
        ..Default::default()
    });
    assert_eq!(titles(&engine.filtered_todos()), vec!["Call plumber"]);
    engine.reset_filters();

    // Complete one, check stats
    let milk_id = engine.todos()[0].id;
    engine.toggle_complete(milk_id);

    let stats = engine.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.high_priority, 1);
    assert_eq!(stats.by_category.get(&personal.id), Some(&2));
    assert_eq!(stats.by_category.get(&work.id), Some(&1));

    // Undo the completion, redo it
    assert!(engine.undo());
    assert!(!engine.todos()[0].completed);
    assert!(engine.redo());
    assert!(engine.todos()[0].completed);

    // Undo all the way back to empty
    while engine.undo() {}
    assert!(engine.todos().is_empty());
    assert!(engine.can_redo());

    // A fresh mutation severs the redo branch
    engine.create(TodoDraft::new("Start over", Priority::Low, personal));
    assert!(!engine.can_redo());
    assert_eq!(titles(&engine.filtered_todos()), vec!["Start over"]);
}

#[test]
fn sorting_and_search_pipeline() {
    let mut engine = TodoEngine::new();
    let personal = engine.categories()[0].clone();

    for (title, priority) in [
        ("banana errand", Priority::Low),
        ("Apple errand", Priority::High),
        ("cherry chore", Priority::Medium),
    ] {
        engine.create(TodoDraft::new(title, priority, personal.clone()));
    }

    // Case-insensitive title sort
    engine.set_filters(Filters {
        sort_by: SortKey::Title,
        ..Default::default()
    });
    assert_eq!(
        titles(&engine.filtered_todos()),
        vec!["Apple errand", "banana errand", "cherry chore"]
    );

    // Descending priority puts High first
    engine.set_filters(Filters {
        sort_by: SortKey::Priority,
        sort_order: SortOrder::Desc,
        ..Default::default()
    });
    assert_eq!(
        titles(&engine.filtered_todos()),
        vec!["Apple errand", "cherry chore", "banana errand"]
    );

    // Search narrows before sorting
    engine.set_filters(Filters {
        search: "ERRAND".into(),
        sort_by: SortKey::Title,
        ..Default::default()
    });
    assert_eq!(
        titles(&engine.filtered_todos()),
        vec!["Apple errand", "banana errand"]
    );
}

#[test]
fn reorder_is_permanent() {
    let mut engine = TodoEngine::new();
    let personal = engine.categories()[0].clone();
    for title in ["a", "b", "c"] {
        engine.create(TodoDraft::new(title, Priority::Low, personal.clone()));
    }

    engine.reorder(0, 2);
    assert_eq!(titles(&engine.filtered_todos()), vec!["b", "c", "a"]);

    // Undo reverses the last create, not the reorder
    assert!(engine.undo());
    assert_eq!(titles(&engine.filtered_todos()), vec!["b", "a"]);
}

#[test]
fn bulk_operations_and_clear() {
    let mut engine = TodoEngine::new();
    let personal = engine.categories()[0].clone();
    let health = engine.categories()[3].clone();
    for title in ["a", "b", "c", "d"] {
        engine.create(TodoDraft::new(title, Priority::Low, personal.clone()));
    }
    let ids: Vec<_> = engine.todos().iter().map(|t| t.id).collect();

    engine.bulk_update_category(&ids[..2], health.id);
    assert_eq!(engine.stats().by_category.get(&health.id), Some(&2));

    engine.bulk_complete(&ids[..3]);
    assert_eq!(engine.stats().completed, 3);

    engine.clear_completed();
    assert_eq!(titles(&engine.filtered_todos()), vec!["d"]);
}

#[test]
fn export_import_between_engines() {
    let mut source = TodoEngine::new();
    let personal = source.categories()[0].clone();
    let garden = source.add_category("Garden", "#22c55e", "Flower");
    source.create(TodoDraft::new("Buy milk", Priority::Low, personal));
    let mut draft = TodoDraft::new(
        "Water plants",
        Priority::Medium,
        source.categories().last().unwrap().clone(),
    );
    draft.tags = vec!["Outside".into(), "outside".into()];
    source.create(draft);

    let text = source.export().unwrap();

    let mut target = TodoEngine::new();
    let result = target.import(&text).unwrap();
    assert_eq!(result.todos_added, 2);
    assert_eq!(result.categories_added, 1);

    // Ids were regenerated, tags normalized, content preserved
    let watered = target
        .todos()
        .iter()
        .find(|t| t.title == "Water plants")
        .unwrap();
    assert_ne!(watered.id, source.todos()[1].id);
    assert_eq!(watered.tags, vec!["outside"]);
    assert_eq!(watered.category.id, garden);

    // Imports are not undoable
    assert!(!target.can_undo());
}

#[test]
fn update_patch_clears_optional_fields() {
    let mut engine = TodoEngine::new();
    let personal = engine.categories()[0].clone();
    let mut draft = TodoDraft::new("Buy milk", Priority::Low, personal);
    draft.description = Some("two liters".into());
    draft.due_date = Some(Utc::now() + Duration::days(1));
    engine.create(draft);
    let id = engine.todos()[0].id;

    engine.update(
        id,
        TodoPatch {
            description: Some(None),
            due_date: Some(None),
            ..Default::default()
        },
    );
    let todo = &engine.todos()[0];
    assert_eq!(todo.description, None);
    assert_eq!(todo.due_date, None);
}
