//! Error types for the Bookfinder crate.
//!
//! This module defines the centralized error type [`BookfinderError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for Bookfinder operations.
///
/// The first three variants make up the search pipeline taxonomy: they are the only
/// errors that reach the user, and they do so as the message of
/// [`RequestStatus::Errored`](crate::app::RequestStatus::Errored). The remaining
/// variants describe local failures (storage, configuration, worker plumbing) that are
/// logged and degraded around rather than surfaced.
///
/// # Examples
///
/// ```
/// use bookfinder::BookfinderError;
///
/// let err = BookfinderError::Remote { status: 503 };
/// assert_eq!(err.to_string(), "API error: 503");
/// assert!(err.is_search_failure());
/// ```
#[derive(Debug, Error)]
pub enum BookfinderError {
    /// The search endpoint answered with a non-success HTTP status.
    #[error("API error: {status}")]
    Remote {
        /// HTTP status code returned by the endpoint.
        status: u16,
    },

    /// The request never produced a response (DNS, TLS, connection reset, timeout).
    #[error("Failed to fetch: {0}")]
    Transport(String),

    /// The response body was not the JSON document the endpoint promises.
    #[error("Malformed response: {0}")]
    Parse(String),

    /// Reading or writing the key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Communication with the background search worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

impl BookfinderError {
    /// Returns `true` for errors produced by the remote search pipeline.
    #[must_use]
    pub const fn is_search_failure(&self) -> bool {
        matches!(
            self,
            Self::Remote { .. } | Self::Transport(_) | Self::Parse(_)
        )
    }
}

/// A specialized `Result` type for Bookfinder operations.
pub type Result<T> = std::result::Result<T, BookfinderError>;
