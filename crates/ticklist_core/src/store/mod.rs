//! Store layer.
//!
//! # Responsibility
//! - Keep the authoritative task collection synchronized with storage.
//!
//! # Invariants
//! - Every successful mutation triggers a full persistence write.

pub mod task_store;
