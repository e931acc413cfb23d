use chrono::NaiveDate;
use ticklist_core::{Category, Task, TaskUpdate, TaskValidationError};
use uuid::Uuid;

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let mut task = Task::new("Write report", Category::Work, None).unwrap();
    task.id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    task.due_date = NaiveDate::from_ymd_opt(2024, 1, 5);
    task.created_at = 1_700_000_000_000;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], task.id.to_string());
    assert_eq!(json["title"], "Write report");
    assert_eq!(json["category"], "Work");
    assert_eq!(json["date"], "2024-01-05");
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    assert_eq!(json["completed"], false);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn absent_due_date_serializes_as_null() {
    let task = Task::new("No deadline", Category::Other, None).unwrap();
    let json = serde_json::to_value(&task).unwrap();
    assert!(json["date"].is_null());
}

#[test]
fn collection_roundtrip_preserves_all_fields() {
    let mut first = Task::new("one", Category::Work, NaiveDate::from_ymd_opt(2024, 3, 1)).unwrap();
    first.completed = true;
    let second = Task::new("two", Category::Personal, None).unwrap();
    let collection = vec![first, second];

    let payload = serde_json::to_string(&collection).unwrap();
    let decoded: Vec<Task> = serde_json::from_str(&payload).unwrap();
    assert_eq!(decoded, collection);
}

#[test]
fn empty_collection_roundtrips() {
    let payload = serde_json::to_string(&Vec::<Task>::new()).unwrap();
    let decoded: Vec<Task> = serde_json::from_str(&payload).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn update_clears_due_date_with_explicit_none() {
    let mut task =
        Task::new("dated", Category::Work, NaiveDate::from_ymd_opt(2024, 6, 1)).unwrap();

    let keep = TaskUpdate {
        title: Some("dated still".to_string()),
        ..TaskUpdate::default()
    };
    task.apply(&keep).unwrap();
    assert!(task.due_date.is_some());

    let clear = TaskUpdate {
        due_date: Some(None),
        ..TaskUpdate::default()
    };
    task.apply(&clear).unwrap();
    assert!(task.due_date.is_none());
}

#[test]
fn empty_title_is_rejected_before_any_field_applies() {
    let err = Task::new("", Category::Work, None).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);

    let err = Task::new("   ", Category::Work, None).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);
}
