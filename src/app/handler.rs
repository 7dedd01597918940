//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user actions and
//! worker outcomes, translating them into state changes and action sequences.
//! It performs no I/O itself.
//!
//! # Architecture
//!
//! 1. Events arrive from the user or the search worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur on `SessionState`
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Search**: `Submit`, `ChangePage`, `Clear`
//! - **Favorites**: `ToggleFavorite`
//! - **Details**: `ShowDetails`, `CloseDetails`
//! - **Worker**: `SearchCompleted` with the outcome of a dispatched job
//!
//! # Ordering
//!
//! Every dispatched request gets the next sequence number and becomes the only
//! request allowed to commit. An outcome whose sequence number is not the
//! in-flight one was superseded (or cleared) and is dropped on arrival.

use crate::app::{Action, RequestStatus, SessionState};
use crate::domain::{BookRecord, PageCursor, PageDirection, SearchCriteria};
use crate::search::QueryBuilder;
use crate::worker::SearchOutcome;

/// Events triggered by user input or worker outcomes.
#[derive(Debug)]
pub enum Event {
    /// Starts a new search at page 1. Ignored if the title query is blank.
    Submit(SearchCriteria),
    /// Re-runs the last submitted search one page over. Ignored when disabled.
    ChangePage(PageDirection),
    /// Resets criteria, results, cursor and status; favorites are kept.
    Clear,
    /// Adds or removes a record from favorites.
    ToggleFavorite(BookRecord),
    /// Opens the details of a record.
    ShowDetails(BookRecord),
    /// Closes the details view.
    CloseDetails,
    /// A worker finished a search job.
    SearchCompleted(SearchOutcome),
}

/// Processes an event, mutates session state, and returns actions to execute.
///
/// The returned flag is `true` when visible state changed.
///
/// # Example
///
/// ```rust
/// use bookfinder::app::{handle_event, Action, Event, SessionState};
/// use bookfinder::domain::SearchCriteria;
/// use bookfinder::search::QueryBuilder;
/// use bookfinder::storage::FavoritesSet;
///
/// let mut state = SessionState::new(FavoritesSet::new());
/// let queries = QueryBuilder::default();
///
/// let (_, actions) = handle_event(&mut state, &queries, Event::Submit(SearchCriteria::titled("  ")));
/// assert!(actions.is_empty());
///
/// let (_, actions) = handle_event(&mut state, &queries, Event::Submit(SearchCriteria::titled("dune")));
/// assert!(matches!(actions.as_slice(), [Action::DispatchSearch(_)]));
/// assert!(state.is_loading());
/// ```
pub fn handle_event(state: &mut SessionState, queries: &QueryBuilder, event: Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(&event)).entered();

    match event {
        Event::Submit(criteria) => {
            let Some(request) = criteria
                .trimmed_query()
                .and_then(|title| queries.build(title, PageCursor::FIRST))
            else {
                tracing::debug!("blank title query, submit ignored");
                return (false, vec![]);
            };

            // A new query always starts over at page 1, even if it fails.
            state.criteria = criteria;
            state.cursor = PageCursor::FIRST;
            let action = state.begin_request(request);
            (true, vec![action])
        }
        Event::ChangePage(direction) => {
            if !state.can_page(direction) {
                tracing::debug!(direction = ?direction, cursor = state.cursor.get(), "page change disabled");
                return (false, vec![]);
            }

            let Some(target) = state.cursor.step(direction) else {
                return (false, vec![]);
            };

            let Some(request) = state
                .criteria
                .trimmed_query()
                .and_then(|title| queries.build(title, target))
            else {
                tracing::debug!("no submitted query to page through");
                return (false, vec![]);
            };

            let action = state.begin_request(request);
            (true, vec![action])
        }
        Event::Clear => {
            if let Some(in_flight) = &state.in_flight {
                tracing::debug!(seq = in_flight.seq, "clear abandons in-flight search");
            }
            state.reset();
            (true, vec![])
        }
        Event::ToggleFavorite(record) => {
            state.favorites.toggle(&record);
            (true, vec![Action::PersistFavorites])
        }
        Event::ShowDetails(record) => {
            state.selected = Some(record);
            (true, vec![])
        }
        Event::CloseDetails => {
            let changed = state.selected.take().is_some();
            (changed, vec![])
        }
        Event::SearchCompleted(outcome) => commit_outcome(state, outcome),
    }
}

fn commit_outcome(state: &mut SessionState, outcome: SearchOutcome) -> (bool, Vec<Action>) {
    let in_flight = match state.in_flight.take() {
        Some(in_flight) if in_flight.seq == outcome.seq => in_flight,
        current => {
            tracing::debug!(
                seq = outcome.seq,
                current_seq = ?current.as_ref().map(|f| f.seq),
                "discarding superseded search outcome"
            );
            state.in_flight = current;
            return (false, vec![]);
        }
    };

    match outcome.result {
        Ok(page) => {
            tracing::debug!(
                seq = outcome.seq,
                page = in_flight.page.get(),
                records = page.records.len(),
                total_matches = page.total_matches,
                "search results committed"
            );
            state.cursor = in_flight.page;
            state.results = page;
            state.status = RequestStatus::Success;
        }
        Err(e) => {
            tracing::debug!(
                seq = outcome.seq,
                page = in_flight.page.get(),
                error = %e,
                "search failed, keeping previous results"
            );
            state.status = RequestStatus::Errored(e.to_string());
        }
    }

    (true, vec![])
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Submit(_) => "submit",
        Event::ChangePage(_) => "change_page",
        Event::Clear => "clear",
        Event::ToggleFavorite(_) => "toggle_favorite",
        Event::ShowDetails(_) => "show_details",
        Event::CloseDetails => "close_details",
        Event::SearchCompleted(_) => "search_completed",
    }
}
