//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted by the store.
//! - Validate title content before any mutation reaches the collection.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is never empty after trimming.
//! - Collection order is insertion order; display order is computed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Fixed category set offered by the task form.
///
/// Serialized in PascalCase to match the persisted schema ("Work", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    Other,
}

impl Category {
    /// Stable display/storage name for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Other => "Other",
        }
    }

    /// Parses a category from its storage name. Case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "work" => Some(Self::Work),
            "personal" => Some(Self::Personal),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for task input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title was empty (or whitespace-only) after trimming.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// Wire field names match the persisted JSON schema used by the storage
/// key `todoTasks_v1`, so existing data loads unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID used for edit/delete/toggle addressing.
    pub id: TaskId,
    /// Non-empty trimmed title.
    pub title: String,
    pub category: Category,
    /// Optional due date.
    #[serde(rename = "date")]
    pub due_date: Option<NaiveDate>,
    /// Unix epoch milliseconds at creation. Immutable.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    pub completed: bool,
}

impl Task {
    /// Creates a new task with a generated stable ID.
    ///
    /// The title is trimmed before storage and rejected when empty.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyTitle` when `title` trims to nothing.
    pub fn new(
        title: impl AsRef<str>,
        category: Category,
        due_date: Option<NaiveDate>,
    ) -> Result<Self, TaskValidationError> {
        let title = normalize_title(title.as_ref())?;
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            category,
            due_date,
            created_at: epoch_ms_now(),
            completed: false,
        })
    }

    /// Applies a typed update to this task, field by field.
    ///
    /// `id` and `created_at` are not updatable. Title updates are trimmed
    /// and validated; a failing title leaves the task untouched.
    pub fn apply(&mut self, update: &TaskUpdate) -> Result<(), TaskValidationError> {
        let title = match &update.title {
            Some(raw) => Some(normalize_title(raw)?),
            None => None,
        };
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        Ok(())
    }
}

/// Typed update request carrying only the mutable task fields.
///
/// `due_date` is doubly optional: `None` leaves the date alone,
/// `Some(None)` clears it, `Some(Some(d))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub due_date: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
}

impl TaskUpdate {
    /// Returns true when the update carries no field changes.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
    }
}

fn normalize_title(raw: &str) -> Result<String, TaskValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

fn epoch_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
