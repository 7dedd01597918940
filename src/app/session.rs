//! Search session driver.
//!
//! [`SearchSession`] owns the session state, the search worker and the favorites
//! store, and is the public face of the controller: every user operation becomes
//! an [`Event`], goes through [`handle_event`], and the resulting actions are
//! executed here.
//!
//! Nothing here blocks on the network. Searches run on worker threads and their
//! outcomes are folded in by [`poll`](SearchSession::poll) or
//! [`wait_settled`](SearchSession::wait_settled).

use super::handler::{handle_event, Event};
use super::state::SessionState;
use super::Action;
use crate::domain::{BookRecord, CoverUrls, PageDirection, SearchCriteria};
use crate::search::{QueryBuilder, SearchClient};
use crate::storage::{load_favorites, save_favorites, FavoritesSet, KeyValueStore};
use crate::ui::ResultsViewModel;
use crate::worker::{SearchOutcome, SearchWorker};
use std::time::{Duration, Instant};

/// A user's search session.
///
/// # Example
///
/// ```no_run
/// use bookfinder::app::SearchSession;
/// use bookfinder::domain::SearchCriteria;
/// use bookfinder::search::HttpSearchClient;
/// use bookfinder::storage::MemoryStore;
/// use std::time::Duration;
///
/// let mut session = SearchSession::new(HttpSearchClient::default(), MemoryStore::new());
/// session.submit(SearchCriteria::titled("the left hand of darkness"));
/// session.wait_settled(Duration::from_secs(10));
///
/// for card in session.view().cards {
///     println!("{} ({})", card.title, card.year_label);
/// }
/// ```
pub struct SearchSession<C: SearchClient + 'static, S: KeyValueStore> {
    state: SessionState,
    queries: QueryBuilder,
    covers: CoverUrls,
    worker: SearchWorker<C>,
    store: S,
}

impl<C: SearchClient + 'static, S: KeyValueStore> SearchSession<C, S> {
    /// Creates a session against the default endpoint, loading favorites from `store`.
    pub fn new(client: C, store: S) -> Self {
        let favorites = load_favorites(&store);
        tracing::debug!(favorites = favorites.len(), "search session created");

        Self {
            state: SessionState::new(favorites),
            queries: QueryBuilder::default(),
            covers: CoverUrls::default(),
            worker: SearchWorker::new(client),
            store,
        }
    }

    #[must_use]
    pub fn with_query_builder(mut self, queries: QueryBuilder) -> Self {
        self.queries = queries;
        self
    }

    #[must_use]
    pub fn with_cover_urls(mut self, covers: CoverUrls) -> Self {
        self.covers = covers;
        self
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoritesSet {
        &self.state.favorites
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Starts a search for `criteria` at page 1.
    ///
    /// Returns `false`, changing nothing, if the title query is blank.
    pub fn submit(&mut self, criteria: SearchCriteria) -> bool {
        self.dispatches(Event::Submit(criteria))
    }

    /// Moves one page in `direction` with the last submitted criteria.
    ///
    /// Returns `false`, changing nothing, when paging that way is disabled.
    pub fn change_page(&mut self, direction: PageDirection) -> bool {
        self.dispatches(Event::ChangePage(direction))
    }

    /// Resets criteria, results, cursor and status. Favorites are kept.
    pub fn clear(&mut self) {
        self.handle(Event::Clear);
    }

    /// Toggles `record`'s favorite membership and persists the set.
    ///
    /// Returns `true` if the record is a favorite afterwards. A failed write is
    /// logged; the in-memory set stays authoritative.
    pub fn toggle_favorite(&mut self, record: &BookRecord) -> bool {
        self.handle(Event::ToggleFavorite(record.clone()));
        self.state.is_favorite(record)
    }

    #[must_use]
    pub fn is_favorite(&self, record: &BookRecord) -> bool {
        self.state.is_favorite(record)
    }

    pub fn show_details(&mut self, record: &BookRecord) {
        self.handle(Event::ShowDetails(record.clone()));
    }

    pub fn close_details(&mut self) {
        self.handle(Event::CloseDetails);
    }

    /// Folds in every search outcome that has already arrived.
    ///
    /// Returns the number of outcomes processed, committed or discarded.
    pub fn poll(&mut self) -> usize {
        let mut processed = 0;
        while let Some(outcome) = self.worker.try_next() {
            self.complete(outcome);
            processed += 1;
        }
        processed
    }

    /// Blocks until no request is in flight or `timeout` elapses.
    ///
    /// Superseded outcomes arriving meanwhile are discarded. Returns `true` if the
    /// session settled.
    pub fn wait_settled(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;

        while self.state.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.worker.next_timeout(remaining) {
                Some(outcome) => self.complete(outcome),
                None => break,
            }
        }

        !self.state.is_loading()
    }

    /// Display-ready view of the current state.
    #[must_use]
    pub fn view(&self) -> ResultsViewModel {
        self.state.compute_viewmodel(&self.covers)
    }

    /// Runs one event through the handler and executes its actions.
    ///
    /// Returns whether visible state changed.
    pub fn handle(&mut self, event: Event) -> bool {
        let (changed, actions) = handle_event(&mut self.state, &self.queries, event);
        for action in actions {
            self.execute(action);
        }
        changed
    }

    fn dispatches(&mut self, event: Event) -> bool {
        let before = self.state.last_dispatched_seq();
        self.handle(event);
        self.state.last_dispatched_seq() != before
    }

    fn complete(&mut self, outcome: SearchOutcome) {
        self.handle(Event::SearchCompleted(outcome));
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::DispatchSearch(job) => {
                let seq = job.seq;
                if let Err(e) = self.worker.dispatch(job) {
                    tracing::warn!(seq = seq, error = %e, "search dispatch failed");
                    self.complete(SearchOutcome { seq, result: Err(e) });
                }
            }
            Action::PersistFavorites => {
                if let Err(e) = save_favorites(&mut self.store, &self.state.favorites) {
                    tracing::warn!(error = %e, "failed to persist favorites, keeping in-memory set");
                }
            }
        }
    }
}

impl<C: SearchClient + 'static, S: KeyValueStore> std::fmt::Debug for SearchSession<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("state", &self.state)
            .field("queries", &self.queries)
            .finish_non_exhaustive()
    }
}
