//! Authoritative task collection with persistence synchronization.
//!
//! # Responsibility
//! - Own the in-memory task collection and all mutation entry points.
//! - Persist the full serialized collection after every mutation.
//!
//! # Invariants
//! - Validation runs before any collection mutation; invalid input never
//!   touches memory or storage.
//! - In-memory state stays authoritative when a persist fails; the store is
//!   marked dirty instead of diverging silently.
//! - Missing ids are benign no-ops, reported as `false`, never as errors.

use crate::model::task::{Category, Task, TaskId, TaskUpdate, TaskValidationError};
use crate::storage::KeyValueStorage;
use chrono::NaiveDate;
use log::{error, warn};

/// Versioned storage key for the serialized task collection.
pub const STORAGE_KEY: &str = "todoTasks_v1";

/// Task collection synchronized to a key-value backend.
pub struct TaskStore<S: KeyValueStorage> {
    storage: S,
    tasks: Vec<Task>,
    dirty: bool,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Loads the persisted collection from `storage`.
    ///
    /// Fails soft: a missing key, unreadable backend, or malformed payload
    /// all yield an empty collection. Nothing propagates to the caller.
    pub fn load(storage: S) -> Self {
        let tasks = match storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) => tasks,
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=recovered reason=malformed error={err}"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=recovered reason=read_failed error={err}"
                );
                Vec::new()
            }
        };
        Self {
            storage,
            tasks,
            dirty: false,
        }
    }

    /// Read-only view of the collection in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// True when the last persist failed and memory is ahead of storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Creates and appends a new task, then persists.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyTitle` when the title trims to nothing;
    ///   the collection is untouched and nothing is persisted.
    pub fn add(
        &mut self,
        title: &str,
        category: Category,
        due_date: Option<NaiveDate>,
    ) -> Result<TaskId, TaskValidationError> {
        let task = Task::new(title, category, due_date)?;
        let id = task.id;
        self.tasks.push(task);
        self.persist();
        Ok(id)
    }

    /// Applies a typed update to the task matching `id`, then persists.
    ///
    /// Returns `Ok(false)` when no task matches; stale ids are benign.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyTitle` when the update carries an empty
    ///   title; the task keeps all of its previous field values.
    pub fn update(&mut self, id: TaskId, update: &TaskUpdate) -> Result<bool, TaskValidationError> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(false);
        };
        task.apply(update)?;
        self.persist();
        Ok(true)
    }

    /// Removes the task matching `id`, if present, then persists.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Flips the completion flag of the task matching `id`, then persists.
    pub fn toggle_completed(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        self.persist();
        true
    }

    /// Empties the collection, then persists.
    pub fn clear_all(&mut self) {
        self.tasks.clear();
        self.persist();
    }

    /// Retries persisting the current collection.
    ///
    /// Useful after a mutation left the store dirty. Clears the dirty flag
    /// on success.
    pub fn flush(&mut self) -> bool {
        self.persist();
        !self.dirty
    }

    /// Writes the full collection to storage.
    ///
    /// Policy for write failures: retry once immediately; if the retry also
    /// fails, keep memory authoritative, log, and mark the store dirty so a
    /// later mutation or `flush` can repair storage.
    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.tasks) {
            Ok(payload) => payload,
            Err(err) => {
                error!("event=store_persist module=store status=error reason=serialize error={err}");
                self.dirty = true;
                return;
            }
        };

        for attempt in 1..=2 {
            match self.storage.set(STORAGE_KEY, &payload) {
                Ok(()) => {
                    self.dirty = false;
                    return;
                }
                Err(err) => {
                    if attempt == 1 {
                        warn!(
                            "event=store_persist module=store status=retry attempt=1 error={err}"
                        );
                    } else {
                        error!(
                            "event=store_persist module=store status=error attempt=2 error={err}"
                        );
                    }
                }
            }
        }
        self.dirty = true;
    }
}
