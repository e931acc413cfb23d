//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Invalid titles never reach the collection or storage.

pub mod task;
