//! View model types representing renderable search state.
//!
//! This module defines immutable view models computed from session state. They
//! contain no business logic, only display-ready data: whatever presentation
//! layer sits on top (web page, terminal, native window) renders these as-is.
//!
//! # Architecture
//!
//! View models are created via `SessionState::compute_viewmodel()`.
//!
//! # Example
//!
//! ```rust
//! use bookfinder::app::SessionState;
//! use bookfinder::domain::CoverUrls;
//! use bookfinder::storage::FavoritesSet;
//!
//! let state = SessionState::new(FavoritesSet::new());
//! let vm = state.compute_viewmodel(&CoverUrls::default());
//! assert!(vm.cards.is_empty());
//! assert!(!vm.pagination.visible);
//! ```

/// Complete view model for the search screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsViewModel {
    /// One card per record on the current page, in result order.
    pub cards: Vec<BookCard>,

    /// Matches reported by the endpoint for the current query.
    pub total_matches: u64,

    pub pagination: PaginationControls,

    /// Whether a search is outstanding.
    pub is_loading: bool,

    /// Error message from the most recent failed search.
    pub error_banner: Option<String>,

    /// Details of the record the user opened, if any.
    pub details: Option<DetailsView>,
}

/// Display information for a single search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub identity_key: String,
    pub title: String,

    /// Up to the first two authors, comma separated.
    pub author_line: String,

    /// First-publish year, or an em dash when unknown.
    pub year_label: String,

    pub cover_url: String,
    pub is_favorite: bool,
}

/// Previous/next paging controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    /// Hidden entirely when the endpoint reported no matches.
    pub visible: bool,
    pub page: u32,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// Expanded information for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub card: BookCard,
    pub authors: Vec<String>,
    pub publishers: Vec<String>,
    pub isbns: Vec<String>,
    pub subjects: Vec<String>,
    pub large_cover_url: String,
}
