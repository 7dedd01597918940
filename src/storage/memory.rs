//! In-memory key-value store.

use crate::domain::error::{BookfinderError, Result};
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;

/// Process-local [`KeyValueStore`].
///
/// Nothing survives the process. `failing_writes` makes every `set` fail, which
/// is how callers exercise their write-failure paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries,
            fail_writes: false,
        }
    }

    /// A store whose writes always fail.
    #[must_use]
    pub fn failing_writes() -> Self {
        Self {
            entries: HashMap::new(),
            fail_writes: true,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(BookfinderError::Storage(format!("write rejected for key {key}")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
