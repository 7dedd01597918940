//! Key-value store abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over persistence
//! backends. The session only ever needs a string value under a fixed key, so the
//! trait mirrors a browser-style scoped store rather than a generic database API.

use crate::domain::error::Result;

/// Abstraction over durable string key-value storage.
///
/// # Implementations
///
/// - [`JsonFileStore`](super::JsonFileStore): single JSON file with atomic writes (default)
/// - [`MemoryStore`](super::MemoryStore): process-local map, for ephemeral sessions
///
/// # Examples
///
/// ```no_run
/// use bookfinder::storage::{JsonFileStore, KeyValueStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonFileStore::new(PathBuf::from("/tmp/bookfinder.json"))?;
/// store.set("greeting", "hello")?;
/// assert_eq!(store.get("greeting")?.as_deref(), Some("hello"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// The value must be durable when this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. Backends may leave the previous value
    /// in place in that case, never a partial one.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
