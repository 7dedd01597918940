//! Search client abstraction and the HTTP implementation.
//!
//! This module defines the [`SearchClient`] trait that abstracts over the transport
//! used to reach the search endpoint, along with the wire types of its JSON response.
//! The HTTP implementation uses `ureq` for synchronous requests; it is driven from
//! worker threads so a slow request never blocks the session.
//!
//! Failures map onto the pipeline taxonomy of [`BookfinderError`]:
//!
//! - non-success status → [`BookfinderError::Remote`]
//! - connection/DNS/TLS/timeout failure → [`BookfinderError::Transport`]
//! - body that is not the expected JSON → [`BookfinderError::Parse`]
//!
//! No retries happen at this layer.

use super::query::SearchRequest;
use crate::domain::book::identity_key_for;
use crate::domain::error::{BookfinderError, Result};
use crate::domain::BookRecord;
use serde::Deserialize;
use std::time::Duration;

/// Default `User-Agent` sent with search requests.
pub const DEFAULT_USER_AGENT: &str = concat!("bookfinder/", env!("CARGO_PKG_VERSION"));

/// One document from the endpoint's `docs` array.
///
/// Every field is optional on the wire; absent lists deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<Vec<String>>,
    #[serde(default)]
    pub cover_i: Option<u64>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub ebook_count_i: Option<u32>,
    #[serde(default)]
    pub publisher: Option<Vec<String>>,
    #[serde(default)]
    pub isbn: Option<Vec<String>>,
    #[serde(default)]
    pub subject: Option<Vec<String>>,
}

impl From<RawRecord> for BookRecord {
    fn from(raw: RawRecord) -> Self {
        let title = raw.title.unwrap_or_default();
        Self {
            identity_key: identity_key_for(raw.key.as_deref(), &title, raw.cover_i),
            title,
            authors: raw.author_name.unwrap_or_default(),
            cover_id: raw.cover_i,
            first_publish_year: raw.first_publish_year,
            ebook_count: raw.ebook_count_i,
            publishers: raw.publisher.unwrap_or_default(),
            isbns: raw.isbn.unwrap_or_default(),
            subjects: raw.subject.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    docs: Option<Vec<RawRecord>>,
    #[serde(default, rename = "numFound")]
    num_found: Option<u64>,
}

/// A successful, unfiltered search response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResponse {
    pub records: Vec<RawRecord>,
    pub total_matches: u64,
}

/// Parses a response body into a [`SearchResponse`].
///
/// A `null` or missing `docs` reads as no records, a missing `numFound` as zero.
///
/// # Errors
///
/// Returns [`BookfinderError::Parse`] if the body is not a JSON object of the
/// expected shape.
pub fn parse_response(body: &str) -> Result<SearchResponse> {
    let raw: RawSearchResponse =
        serde_json::from_str(body).map_err(|e| BookfinderError::Parse(e.to_string()))?;

    Ok(SearchResponse {
        records: raw.docs.unwrap_or_default(),
        total_matches: raw.num_found.unwrap_or(0),
    })
}

/// Executes search requests against a remote endpoint.
///
/// Implementations are shared across worker threads, hence `Send + Sync`.
pub trait SearchClient: Send + Sync {
    /// Performs exactly one request.
    ///
    /// # Errors
    ///
    /// Returns [`BookfinderError::Remote`], [`BookfinderError::Transport`] or
    /// [`BookfinderError::Parse`]; see the module documentation.
    fn execute(&self, request: &SearchRequest) -> Result<SearchResponse>;
}

impl<C: SearchClient + ?Sized> SearchClient for std::sync::Arc<C> {
    fn execute(&self, request: &SearchRequest) -> Result<SearchResponse> {
        (**self).execute(request)
    }
}

/// [`SearchClient`] backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    agent: ureq::Agent,
}

impl Default for HttpSearchClient {
    fn default() -> Self {
        Self::new(None, DEFAULT_USER_AGENT)
    }
}

impl HttpSearchClient {
    /// Creates a client.
    ///
    /// `timeout` of `None` leaves timing out to the transport; a timeout that fires
    /// surfaces as [`BookfinderError::Transport`].
    #[must_use]
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
        }
    }
}

impl SearchClient for HttpSearchClient {
    fn execute(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let _span = tracing::debug_span!("http_search",
            endpoint = %request.endpoint,
            title = %request.title,
            page = request.page.get()
        )
        .entered();

        let mut call = self.agent.get(&request.endpoint);
        for (name, value) in request.query_pairs() {
            call = call.query(name, &value);
        }

        let response = match call.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                tracing::debug!(status = status, "search endpoint returned error status");
                return Err(BookfinderError::Remote { status });
            }
            Err(ureq::Error::Transport(transport)) => {
                tracing::debug!(error = %transport, "search transport failure");
                return Err(BookfinderError::Transport(transport.to_string()));
            }
        };

        let body = response
            .into_string()
            .map_err(|e| BookfinderError::Transport(format!("read body: {e}")))?;

        let parsed = parse_response(&body)?;
        tracing::debug!(
            records = parsed.records.len(),
            total_matches = parsed.total_matches,
            "search response parsed"
        );
        Ok(parsed)
    }
}
