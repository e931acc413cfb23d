//! Application controller.
//!
//! # Responsibility
//! - Own all interaction state: store, active filter, search text, edit
//!   session, pending confirmation. No ambient globals.
//! - Translate interaction entry points into store mutations and view
//!   projections.
//!
//! # Invariants
//! - At most one edit session at a time; starting a new one replaces the
//!   old target (last-wins).
//! - Destructive operations (delete, clear-all) execute only through the
//!   request -> confirm two-step protocol.
//! - Confirming a delete whose target is the active edit session also
//!   clears the session.

use crate::model::task::{Category, Task, TaskId, TaskUpdate, TaskValidationError};
use crate::storage::KeyValueStorage;
use crate::store::task_store::TaskStore;
use crate::view::{project, CategoryFilter, ViewQuery};
use chrono::NaiveDate;
use log::debug;

/// Editable form fields, used both for submission and edit snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub category: Category,
    pub due_date: Option<NaiveDate>,
}

/// Edit-mode state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Idle,
    /// A task is being edited; `form` snapshots its fields at edit start.
    Editing { id: TaskId, form: TaskForm },
}

/// Destructive intent awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    DeleteTask(TaskId),
    ClearAll,
}

/// Result of a successful form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(TaskId),
    Updated(TaskId),
    /// The edit target no longer exists; the session was discarded.
    Stale(TaskId),
}

/// Presentation state for the task list.
#[derive(Debug, PartialEq, Eq)]
pub enum ListView<'a> {
    /// Nothing matched; render the explicit "no tasks" state.
    Empty,
    Tasks(Vec<&'a Task>),
}

/// Single controller owning the full application state.
pub struct App<S: KeyValueStorage> {
    store: TaskStore<S>,
    filter: CategoryFilter,
    search: String,
    edit: EditState,
    pending: Option<PendingAction>,
}

impl<S: KeyValueStorage> App<S> {
    /// Loads persisted tasks from `storage` and starts idle.
    pub fn new(storage: S) -> Self {
        Self {
            store: TaskStore::load(storage),
            filter: CategoryFilter::All,
            search: String::new(),
            edit: EditState::Idle,
            pending: None,
        }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn pending_action(&self) -> Option<PendingAction> {
        self.pending
    }

    /// Submits the form: updates the edit target when a session is active,
    /// otherwise creates a new task.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyTitle`: nothing is mutated and the edit
    ///   session (if any) stays active so the caller can re-prompt.
    pub fn submit(&mut self, form: TaskForm) -> Result<SubmitOutcome, TaskValidationError> {
        match &self.edit {
            EditState::Editing { id, .. } => {
                let id = *id;
                let update = TaskUpdate {
                    title: Some(form.title),
                    category: Some(form.category),
                    due_date: Some(form.due_date),
                    completed: None,
                };
                let applied = self.store.update(id, &update)?;
                self.edit = EditState::Idle;
                if applied {
                    Ok(SubmitOutcome::Updated(id))
                } else {
                    Ok(SubmitOutcome::Stale(id))
                }
            }
            EditState::Idle => {
                let id = self.store.add(&form.title, form.category, form.due_date)?;
                Ok(SubmitOutcome::Created(id))
            }
        }
    }

    /// Starts an edit session for `id`, snapshotting its current fields.
    ///
    /// Returns the snapshot for the caller to pre-populate its form inputs.
    /// Replaces any active session (last-wins). Returns `None` without
    /// state change when `id` matches no task.
    pub fn request_edit(&mut self, id: TaskId) -> Option<TaskForm> {
        let task = self.store.get(id)?;
        let form = TaskForm {
            title: task.title.clone(),
            category: task.category,
            due_date: task.due_date,
        };
        self.edit = EditState::Editing {
            id,
            form: form.clone(),
        };
        Some(form)
    }

    /// Discards the active edit session without mutation.
    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Idle;
    }

    /// Flips completion of `id`. Benign no-op on unknown ids.
    pub fn request_toggle(&mut self, id: TaskId) -> bool {
        self.store.toggle_completed(id)
    }

    /// Records a delete intent; nothing mutates until `confirm`.
    ///
    /// A newer request replaces an older pending one.
    pub fn request_delete(&mut self, id: TaskId) {
        self.pending = Some(PendingAction::DeleteTask(id));
    }

    /// Records a clear-all intent; nothing mutates until `confirm`.
    pub fn request_clear_all(&mut self) {
        self.pending = Some(PendingAction::ClearAll);
    }

    /// Executes the pending destructive action, if any.
    ///
    /// Returns `true` when an action ran (even if its target had already
    /// vanished). Deleting the active edit target clears the session, as
    /// does clearing all tasks while one is being edited.
    pub fn confirm(&mut self) -> bool {
        let Some(action) = self.pending.take() else {
            return false;
        };
        match action {
            PendingAction::DeleteTask(id) => {
                if matches!(&self.edit, EditState::Editing { id: editing, .. } if *editing == id) {
                    self.edit = EditState::Idle;
                }
                let removed = self.store.remove(id);
                debug!("event=task_delete module=app confirmed=true removed={removed}");
            }
            PendingAction::ClearAll => {
                self.edit = EditState::Idle;
                self.store.clear_all();
                debug!("event=clear_all module=app confirmed=true");
            }
        }
        true
    }

    /// Discards the pending destructive action without mutation.
    pub fn deny(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Projects the current collection through the active filter and search.
    pub fn view(&self) -> ListView<'_> {
        let query = ViewQuery {
            filter: self.filter,
            search: self.search.clone(),
        };
        let visible = project(self.store.tasks(), &query);
        if visible.is_empty() {
            ListView::Empty
        } else {
            ListView::Tasks(visible)
        }
    }
}
