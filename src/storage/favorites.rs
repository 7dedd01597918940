//! Favorites set and its write-through persistence.
//!
//! The set maps identity keys to [`FavoriteSnapshot`]s. It is serialized as one
//! JSON object under [`FAVORITES_KEY`]; every mutation rewrites the whole value.
//! Loading never fails: missing, unreadable, or unrecognized data all read as an
//! empty set.

use crate::domain::error::{BookfinderError, Result};
use crate::domain::BookRecord;
use crate::storage::backend::KeyValueStore;
use crate::storage::models::FavoriteSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Store key holding the serialized favorites set.
pub const FAVORITES_KEY: &str = "bf_favorites_v1";

/// Favorited books keyed by identity key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet {
    entries: BTreeMap<String, FavoriteSnapshot>,
}

impl FavoritesSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `record` if absent, removes it if present.
    ///
    /// Returns `true` if the record is a favorite afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::domain::BookRecord;
    /// use bookfinder::storage::FavoritesSet;
    ///
    /// let mut favorites = FavoritesSet::new();
    /// let dune = BookRecord::new(Some("OL1"), "Dune");
    ///
    /// assert!(favorites.toggle(&dune));
    /// assert!(favorites.is_favorite(&dune));
    /// assert!(!favorites.toggle(&dune));
    /// assert!(favorites.is_empty());
    /// ```
    pub fn toggle(&mut self, record: &BookRecord) -> bool {
        if self.entries.remove(&record.identity_key).is_some() {
            tracing::debug!(key = %record.identity_key, "favorite removed");
            false
        } else {
            self.entries
                .insert(record.identity_key.clone(), FavoriteSnapshot::from(record));
            tracing::debug!(key = %record.identity_key, "favorite added");
            true
        }
    }

    #[must_use]
    pub fn is_favorite(&self, record: &BookRecord) -> bool {
        self.contains_key(&record.identity_key)
    }

    #[must_use]
    pub fn contains_key(&self, identity_key: &str) -> bool {
        self.entries.contains_key(identity_key)
    }

    #[must_use]
    pub fn get(&self, identity_key: &str) -> Option<&FavoriteSnapshot> {
        self.entries.get(identity_key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in identity-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FavoriteSnapshot)> {
        self.entries.iter().map(|(key, snapshot)| (key.as_str(), snapshot))
    }

    /// Serializes the set to its stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`BookfinderError::Storage`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| BookfinderError::Storage(format!("failed to serialize favorites: {e}")))
    }
}

/// Reads the favorites set from `store`.
///
/// Any read or decode failure yields an empty set and is logged, never returned.
pub fn load_favorites<S: KeyValueStore + ?Sized>(store: &S) -> FavoritesSet {
    let _span = tracing::debug_span!("load_favorites").entered();

    let raw = match store.get(FAVORITES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("no stored favorites");
            return FavoritesSet::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to read favorites, starting empty");
            return FavoritesSet::new();
        }
    };

    match serde_json::from_str::<FavoritesSet>(&raw) {
        Ok(favorites) => {
            tracing::debug!(count = favorites.len(), "favorites loaded");
            favorites
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored favorites unreadable, starting empty");
            FavoritesSet::new()
        }
    }
}

/// Writes the whole favorites set to `store`.
///
/// # Errors
///
/// Returns the store's error if serialization or the write fails.
pub fn save_favorites<S: KeyValueStore + ?Sized>(store: &mut S, favorites: &FavoritesSet) -> Result<()> {
    let _span = tracing::debug_span!("save_favorites", count = favorites.len()).entered();

    let json = favorites.to_json()?;
    store.set(FAVORITES_KEY, &json)?;

    tracing::debug!("favorites persisted");
    Ok(())
}
