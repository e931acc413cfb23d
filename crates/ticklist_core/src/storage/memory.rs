//! In-memory key-value backend.
//!
//! # Responsibility
//! - Provide a dependency-free storage backend for tests and ephemeral use.
//! - Allow injecting write failures to exercise the store's retry policy.
//!
//! # Invariants
//! - Injected failures consume themselves; storage recovers afterwards.

use super::{KeyValueStorage, StorageError, StorageResult};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// HashMap-backed storage with optional write-failure injection.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    failing_sets: Cell<u32>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` calls to `set` fail with `Unavailable`.
    pub fn fail_next_sets(&self, count: u32) {
        self.failing_sets.set(count);
    }

    /// Seeds a raw value, bypassing the `set` failure knob.
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let remaining = self.failing_sets.get();
        if remaining > 0 {
            self.failing_sets.set(remaining - 1);
            return Err(StorageError::Unavailable(
                "injected write failure".to_string(),
            ));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
