//! Bookfinder: the core of a book search client backed by the Open Library search API.
//!
//! Bookfinder provides:
//! - Title search with client-side author, year and ebook filters
//! - Paged results, nine records per page, with guarded prev/next navigation
//! - Out-of-order safe request handling: only the latest request may commit
//! - A favorites set mirrored to a key-value store after every change
//! - Display-ready view models for an external renderer

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Session Driver (app/session)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Search Layer  │   │ Storage Layer │   │ Worker Layer  │
//! │ (search/)     │   │ (storage/)    │   │ (worker/)     │
//! │ - Query build │   │ - JSON I/O    │   │ - Job threads │
//! │ - HTTP client │   │ - Favorites   │   │ - Seq numbers │
//! │ - Filters     │   │ - Backend API │   │ - Trace ctx   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/) and View Models (ui/)       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based span export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Session state machine with event/action model and its driver
//! - [`domain`]: Core domain types (book records, criteria, cursor, errors)
//! - [`search`]: Query building, the HTTP search client and result filters
//! - [`storage`]: Key-value persistence and the favorites set
//! - [`worker`]: Background threads running search jobs
//! - [`ui`]: View models for rendering
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! Configuration is read from TOML. Every key is optional:
//!
//! ```toml
//! search_url = "https://openlibrary.org/search.json"
//! favorites_path = ".bookfinder/favorites.json"
//! request_timeout_secs = 15
//! trace_level = "debug"
//! trace_file = ".bookfinder/spans.jsonl"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use bookfinder::domain::{PageDirection, SearchCriteria};
//! use bookfinder::{initialize, Config};
//! use std::time::Duration;
//!
//! let mut session = initialize(&Config::default())?;
//!
//! let criteria = SearchCriteria {
//!     author_filter: "tolkien".into(),
//!     ..SearchCriteria::titled("the hobbit")
//! };
//! session.submit(criteria);
//! session.wait_settled(Duration::from_secs(10));
//!
//! if let Some(card) = session.view().cards.first() {
//!     println!("{} by {}", card.title, card.author_line);
//! }
//! session.change_page(PageDirection::Next);
//! # Ok::<(), bookfinder::BookfinderError>(())
//! ```

pub mod app;
pub mod domain;
pub mod observability;
pub mod search;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, Event, RequestStatus, SearchSession, SessionState};
pub use domain::{BookRecord, BookfinderError, PageCursor, PageDirection, Result, SearchCriteria};

use crate::domain::book::{DEFAULT_COVER_BASE_URL, DEFAULT_PLACEHOLDER_COVER_URL};
use crate::domain::CoverUrls;
use crate::search::client::DEFAULT_USER_AGENT;
use crate::search::{HttpSearchClient, QueryBuilder, DEFAULT_SEARCH_URL};
use crate::storage::JsonFileStore;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default cap of the span export file before it rolls over (10 MiB).
pub const DEFAULT_TRACE_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Client configuration.
///
/// # Example
///
/// ```rust
/// use bookfinder::Config;
///
/// let config = Config::from_toml_str("request_timeout_secs = 5").unwrap();
/// assert_eq!(config.request_timeout_secs, Some(5));
/// assert_eq!(config.search_url, "https://openlibrary.org/search.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Search endpoint. Default: `https://openlibrary.org/search.json`
    pub search_url: String,

    /// Cover image base; `{base}/{cover_id}-{S|M|L}.jpg` is appended.
    pub cover_base_url: String,

    /// Image shown for records without a cover id.
    pub placeholder_cover_url: String,

    /// JSON file holding persisted favorites.
    ///
    /// Relative paths resolve against the working directory. Default:
    /// `.bookfinder/favorites.json`
    pub favorites_path: PathBuf,

    /// Per-request timeout. Unset leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,

    pub user_agent: String,

    /// Tracing filter directive (`trace`, `debug`, `info`, ... or an `EnvFilter`
    /// expression). Default: `"info"`
    pub trace_level: Option<String>,

    /// Enables OpenTelemetry span export to this JSON-lines file.
    pub trace_file: Option<PathBuf>,

    /// Size at which the span export file rolls over.
    pub trace_max_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            cover_base_url: DEFAULT_COVER_BASE_URL.to_string(),
            placeholder_cover_url: DEFAULT_PLACEHOLDER_COVER_URL.to_string(),
            favorites_path: PathBuf::from(".bookfinder/favorites.json"),
            request_timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            trace_level: None,
            trace_file: None,
            trace_max_bytes: DEFAULT_TRACE_MAX_BYTES,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`BookfinderError::Config`] on malformed TOML, mistyped values or
    /// unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| BookfinderError::Config(e.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`BookfinderError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| BookfinderError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    #[must_use]
    pub fn cover_urls(&self) -> CoverUrls {
        CoverUrls::new(self.cover_base_url.clone(), self.placeholder_cover_url.clone())
    }

    #[must_use]
    pub fn query_builder(&self) -> QueryBuilder {
        QueryBuilder::new(self.search_url.clone())
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Builds a search session from configuration.
///
/// Installs tracing, opens the favorites file and loads the persisted set.
/// Unreadable favorites load as an empty set.
///
/// # Errors
///
/// Fails if the favorites directory cannot be created.
///
/// # Example
///
/// ```no_run
/// use bookfinder::{initialize, Config};
///
/// let session = initialize(&Config::default())?;
/// assert!(!session.state().is_loading());
/// # Ok::<(), bookfinder::BookfinderError>(())
/// ```
pub fn initialize(config: &Config) -> Result<SearchSession<HttpSearchClient, JsonFileStore>> {
    observability::init_tracing(config);
    tracing::debug!(search_url = %config.search_url, favorites = %config.favorites_path.display(), "initializing bookfinder");

    let client = HttpSearchClient::new(config.request_timeout(), &config.user_agent);
    let store = JsonFileStore::new(config.favorites_path.clone())?;

    Ok(SearchSession::new(client, store)
        .with_query_builder(config.query_builder())
        .with_cover_urls(config.cover_urls()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_toml_yields_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_toml_str(
            r#"
            search_url = "http://localhost:8080/search.json"
            cover_base_url = "http://localhost:8080/covers"
            placeholder_cover_url = "http://localhost:8080/none.png"
            favorites_path = "/tmp/favs.json"
            request_timeout_secs = 3
            user_agent = "test-agent"
            trace_level = "debug"
            trace_file = "/tmp/spans.jsonl"
            trace_max_bytes = 2048
            "#,
        )
        .unwrap();

        assert_eq!(config.search_url, "http://localhost:8080/search.json");
        assert_eq!(config.favorites_path, PathBuf::from("/tmp/favs.json"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.trace_file, Some(PathBuf::from("/tmp/spans.jsonl")));
        assert_eq!(config.trace_max_bytes, 2048);
        assert_eq!(
            config.cover_urls().url_for(Some(7), crate::domain::CoverSize::Small),
            "http://localhost:8080/covers/7-S.jpg"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("scan_depth = 4").unwrap_err();
        assert!(matches!(err, BookfinderError::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, BookfinderError::Config(_)));
    }

    #[test]
    fn initialize_loads_persisted_favorites() {
        let dir = TempDir::new().unwrap();
        let favorites_path = dir.path().join("nested").join("favorites.json");
        let config = Config {
            favorites_path: favorites_path.clone(),
            ..Config::default()
        };

        let mut session = initialize(&config).unwrap();
        let record = BookRecord::new(Some("OL42W"), "Dune");
        assert!(session.toggle_favorite(&record));
        drop(session);

        let session = initialize(&config).unwrap();
        assert!(session.is_favorite(&record));
        assert!(favorites_path.exists());
    }
}
