//! Request descriptors for the remote search endpoint.
//!
//! Building a request is pure: the same title and page always produce the same
//! [`SearchRequest`], and an empty query produces none at all.

use crate::domain::PageCursor;

/// Default search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://openlibrary.org/search.json";

/// Fields requested from the endpoint, in wire order.
pub const SEARCH_FIELDS: [&str; 8] = [
    "title",
    "author_name",
    "cover_i",
    "first_publish_year",
    "publisher",
    "isbn",
    "subject",
    "ebook_count_i",
];

/// Number of records requested per page.
pub const PAGE_SIZE: u32 = 9;

/// A fully specified search request, ready for a [`SearchClient`](super::SearchClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub endpoint: String,
    pub title: String,
    pub page: PageCursor,
    pub fields: Vec<&'static str>,
    pub limit: u32,
}

impl SearchRequest {
    /// Query parameters in the order they are sent.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("page", self.page.to_string()),
            ("fields", self.fields.join(",")),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Builds [`SearchRequest`]s against a configured endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    endpoint: String,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL)
    }
}

impl QueryBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Builds the request for `title_query` at `page`.
    ///
    /// Returns `None` when the query trims to nothing; callers must not dispatch
    /// anything in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::domain::PageCursor;
    /// use bookfinder::search::{QueryBuilder, PAGE_SIZE};
    ///
    /// let builder = QueryBuilder::default();
    /// let request = builder.build("  the hobbit ", PageCursor::FIRST).unwrap();
    /// assert_eq!(request.title, "the hobbit");
    /// assert_eq!(request.limit, PAGE_SIZE);
    ///
    /// assert!(builder.build("   ", PageCursor::FIRST).is_none());
    /// ```
    #[must_use]
    pub fn build(&self, title_query: &str, page: PageCursor) -> Option<SearchRequest> {
        let title = title_query.trim();
        if title.is_empty() {
            tracing::trace!("empty title query, no request built");
            return None;
        }

        Some(SearchRequest {
            endpoint: self.endpoint.clone(),
            title: title.to_string(),
            page,
            fields: SEARCH_FIELDS.to_vec(),
            limit: PAGE_SIZE,
        })
    }
}

/// Builds a request against [`DEFAULT_SEARCH_URL`].
#[must_use]
pub fn build_request(title_query: &str, page: PageCursor) -> Option<SearchRequest> {
    QueryBuilder::default().build(title_query, page)
}
