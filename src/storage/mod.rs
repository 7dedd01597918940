//! Storage layer for persistent favorites.
//!
//! This module provides the key-value persistence boundary and the favorites set
//! written through it. The session holds the authoritative in-memory set; the
//! store is a durable mirror, rewritten after every mutation.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait abstraction for backend implementations
//! - `json`: JSON file-based store implementation
//! - `memory`: In-memory store for ephemeral sessions
//! - `favorites`: Favorites set with load/save against a store
//! - `models`: Persisted snapshot types separate from domain models

pub mod backend;
pub mod favorites;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::KeyValueStore;
pub use favorites::{load_favorites, save_favorites, FavoritesSet, FAVORITES_KEY};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use models::FavoriteSnapshot;
