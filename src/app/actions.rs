//! Actions representing side effects to be executed by the session driver.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or worker outcomes.
//! Actions bridge pure state transformations and effectful operations: network
//! searches and writes to the key-value store.
//!
//! # Example
//!
//! ```rust
//! use bookfinder::app::Action;
//!
//! let actions = vec![Action::PersistFavorites];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::SearchJob;

/// Commands representing side effects to be executed by [`SearchSession`](super::SearchSession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Runs a search job on the background worker.
    ///
    /// The job's sequence number has already been recorded as the only one
    /// allowed to commit.
    DispatchSearch(SearchJob),

    /// Writes the complete in-memory favorites set to the store.
    PersistFavorites,
}
