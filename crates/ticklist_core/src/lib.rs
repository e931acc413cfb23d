//! Core domain logic for TickList.
//! This crate is the single source of truth for business invariants.

pub mod app;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use app::{App, EditState, ListView, PendingAction, SubmitOutcome, TaskForm};
pub use logging::{default_log_level, init_logging};
pub use model::task::{Category, Task, TaskId, TaskUpdate, TaskValidationError};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};
pub use store::task_store::{TaskStore, STORAGE_KEY};
pub use view::{project, CategoryFilter, ViewQuery};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
