//! Session state and view model computation.
//!
//! This module defines [`SessionState`], the single source of truth for the
//! search screen: submitted criteria, the committed page and cursor, favorites,
//! request status, and the bookkeeping for the one request allowed to commit.
//!
//! # State Components
//!
//! - **Criteria**: Last submitted search; replayed on page changes
//! - **Cursor / Results**: Submit resets the cursor to 1; paging moves it when the fetch succeeds
//! - **Status**: `Idle`, `Loading`, `Success` or `Errored(message)`
//! - **In-flight request**: Sequence number of the latest dispatched request
//! - **Favorites**: Authoritative in-memory favorites set
//! - **Selected**: Record whose details are open
//!
//! Mutation goes through [`handle_event`](super::handle_event) only; the fields
//! are public for reading.

use super::actions::Action;
use crate::domain::{BookRecord, CoverSize, CoverUrls, PageCursor, PageDirection, SearchCriteria};
use crate::search::{ResultPage, SearchRequest};
use crate::storage::FavoritesSet;
use crate::ui::viewmodel::{BookCard, DetailsView, PaginationControls, ResultsViewModel};
use crate::worker::SearchJob;

/// Label shown in place of an unknown publish year.
const UNKNOWN_YEAR_LABEL: &str = "—";

/// Number of authors listed on a result card.
const CARD_AUTHOR_LIMIT: usize = 2;

/// Status of the most recent search request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// Nothing requested since start-up or the last clear.
    #[default]
    Idle,
    /// A dispatched request has not resolved yet.
    Loading,
    /// The latest request committed its page.
    Success,
    /// The latest request failed; prior results stay visible.
    Errored(String),
}

/// The request whose outcome is allowed to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight {
    pub seq: u64,
    pub page: PageCursor,
}

/// Central search session state.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Criteria of the last accepted submit.
    pub criteria: SearchCriteria,

    /// Current page. Reset to 1 by submit; a page change moves it only on success.
    pub cursor: PageCursor,

    pub results: ResultPage,

    pub status: RequestStatus,

    pub favorites: FavoritesSet,

    pub selected: Option<BookRecord>,

    /// Latest dispatched request, cleared when it resolves or the session is cleared.
    pub in_flight: Option<InFlight>,

    /// Sequence number of the latest dispatched request; `0` before the first.
    last_seq: u64,
}

impl SessionState {
    /// Creates an idle session around previously loaded favorites.
    #[must_use]
    pub fn new(favorites: FavoritesSet) -> Self {
        Self {
            criteria: SearchCriteria::default(),
            cursor: PageCursor::FIRST,
            results: ResultPage::default(),
            status: RequestStatus::Idle,
            favorites,
            selected: None,
            in_flight: None,
            last_seq: 0,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// Sequence number of the latest dispatched request.
    #[must_use]
    pub const fn last_dispatched_seq(&self) -> u64 {
        self.last_seq
    }

    /// Error message of the latest failed request.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            RequestStatus::Errored(message) => Some(message),
            _ => None,
        }
    }

    /// Whether a page change in `direction` would be accepted.
    ///
    /// `Prev` needs a cursor past page 1. `Next` needs a non-empty current page;
    /// the endpoint reports no page count, so this is optimistic.
    #[must_use]
    pub fn can_page(&self, direction: PageDirection) -> bool {
        match direction {
            PageDirection::Prev => !self.cursor.is_first(),
            PageDirection::Next => !self.results.is_empty(),
        }
    }

    #[must_use]
    pub fn is_favorite(&self, record: &BookRecord) -> bool {
        self.favorites.is_favorite(record)
    }

    /// Marks a new request as the only one allowed to commit and returns its job.
    pub(crate) fn begin_request(&mut self, request: SearchRequest) -> Action {
        self.last_seq += 1;
        self.in_flight = Some(InFlight {
            seq: self.last_seq,
            page: request.page,
        });
        self.status = RequestStatus::Loading;

        tracing::debug!(
            seq = self.last_seq,
            page = request.page.get(),
            superseded = self.last_seq > 1,
            "search request started"
        );

        Action::DispatchSearch(SearchJob::new(self.last_seq, request, self.criteria.clone()))
    }

    /// Resets everything except favorites.
    pub(crate) fn reset(&mut self) {
        self.criteria = SearchCriteria::default();
        self.cursor = PageCursor::FIRST;
        self.results = ResultPage::default();
        self.status = RequestStatus::Idle;
        self.selected = None;
        self.in_flight = None;
    }

    /// Computes the display-ready view of this state.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bookfinder::app::SessionState;
    /// use bookfinder::domain::CoverUrls;
    /// use bookfinder::storage::FavoritesSet;
    ///
    /// let state = SessionState::new(FavoritesSet::new());
    /// let vm = state.compute_viewmodel(&CoverUrls::default());
    /// assert_eq!(vm.pagination.page, 1);
    /// assert!(vm.error_banner.is_none());
    /// ```
    #[must_use]
    pub fn compute_viewmodel(&self, covers: &CoverUrls) -> ResultsViewModel {
        let cards = self
            .results
            .records
            .iter()
            .map(|record| self.compute_card(record, covers))
            .collect();

        let details = self.selected.as_ref().map(|record| DetailsView {
            card: self.compute_card(record, covers),
            authors: record.authors.clone(),
            publishers: record.publishers.clone(),
            isbns: record.isbns.clone(),
            subjects: record.subjects.clone(),
            large_cover_url: covers.url_for(record.cover_id, CoverSize::Large),
        });

        ResultsViewModel {
            cards,
            total_matches: self.results.total_matches,
            pagination: PaginationControls {
                visible: self.results.total_matches > 0,
                page: self.cursor.get(),
                prev_enabled: self.can_page(PageDirection::Prev),
                next_enabled: self.can_page(PageDirection::Next),
            },
            is_loading: self.is_loading(),
            error_banner: self.error_message().map(String::from),
            details,
        }
    }

    fn compute_card(&self, record: &BookRecord, covers: &CoverUrls) -> BookCard {
        BookCard {
            identity_key: record.identity_key.clone(),
            title: record.title.clone(),
            author_line: record
                .authors
                .iter()
                .take(CARD_AUTHOR_LIMIT)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            year_label: record
                .first_publish_year
                .map_or_else(|| UNKNOWN_YEAR_LABEL.to_string(), |year| year.to_string()),
            cover_url: covers.url_for(record.cover_id, CoverSize::Medium),
            is_favorite: self.favorites.is_favorite(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, authors: &[&str], year: Option<i32>, cover: Option<u64>) -> BookRecord {
        let mut record = BookRecord::new(None, title);
        record.authors = authors.iter().map(|a| (*a).to_string()).collect();
        record.first_publish_year = year;
        record.cover_id = cover;
        record
    }

    #[test]
    fn cards_show_two_authors_year_and_cover() {
        let mut state = SessionState::new(FavoritesSet::new());
        let good_omens = record(
            "Good Omens",
            &["Terry Pratchett", "Neil Gaiman", "Someone Else"],
            Some(1990),
            Some(12),
        );
        state.favorites.toggle(&good_omens);
        state.results = ResultPage {
            records: vec![good_omens, record("Untitled", &[], None, None)],
            total_matches: 2,
            cursor: PageCursor::FIRST,
        };

        let vm = state.compute_viewmodel(&CoverUrls::default());
        assert_eq!(vm.cards.len(), 2);
        assert_eq!(vm.cards[0].author_line, "Terry Pratchett, Neil Gaiman");
        assert_eq!(vm.cards[0].year_label, "1990");
        assert_eq!(vm.cards[0].cover_url, "https://covers.openlibrary.org/b/id/12-M.jpg");
        assert!(vm.cards[0].is_favorite);

        assert_eq!(vm.cards[1].author_line, "");
        assert_eq!(vm.cards[1].year_label, "—");
        assert_eq!(vm.cards[1].cover_url, "https://via.placeholder.com/150x220?text=No+Cover");
        assert!(!vm.cards[1].is_favorite);
    }

    #[test]
    fn pagination_hidden_without_matches_and_guarded_by_cursor() {
        let mut state = SessionState::new(FavoritesSet::new());
        let vm = state.compute_viewmodel(&CoverUrls::default());
        assert!(!vm.pagination.visible);
        assert!(!vm.pagination.prev_enabled);
        assert!(!vm.pagination.next_enabled);

        state.cursor = PageCursor::new(3).unwrap();
        state.results = ResultPage {
            records: Vec::new(),
            total_matches: 40,
            cursor: state.cursor,
        };
        let vm = state.compute_viewmodel(&CoverUrls::default());
        assert!(vm.pagination.visible);
        assert_eq!(vm.pagination.page, 3);
        assert!(vm.pagination.prev_enabled);
        assert!(!vm.pagination.next_enabled);
    }

    #[test]
    fn errored_status_surfaces_banner() {
        let mut state = SessionState::new(FavoritesSet::new());
        state.status = RequestStatus::Errored("API error: 500".into());

        let vm = state.compute_viewmodel(&CoverUrls::default());
        assert_eq!(vm.error_banner.as_deref(), Some("API error: 500"));
        assert!(!vm.is_loading);
    }

    #[test]
    fn details_use_large_cover() {
        let mut state = SessionState::new(FavoritesSet::new());
        let mut dune = record("Dune", &["Frank Herbert"], Some(1965), Some(5));
        dune.subjects = vec!["Science fiction".into()];
        state.selected = Some(dune);

        let details = state.compute_viewmodel(&CoverUrls::default()).details.unwrap();
        assert_eq!(details.large_cover_url, "https://covers.openlibrary.org/b/id/5-L.jpg");
        assert_eq!(details.subjects, vec!["Science fiction"]);
        assert_eq!(details.card.title, "Dune");
    }
}
