//! Search layer: request building, remote execution and client-side filtering.
//!
//! # Modules
//!
//! - `query`: Pure construction of [`SearchRequest`]s (fixed fields, page size 9)
//! - `client`: [`SearchClient`] trait, `ureq`-backed HTTP client, response wire types
//! - `filter`: Author / year / ebook predicates applied after fetching
//! - `pipeline`: Fetch-then-filter composition yielding a [`ResultPage`]

pub mod client;
pub mod filter;
pub mod pipeline;
pub mod query;

pub use client::{parse_response, HttpSearchClient, RawRecord, SearchClient, SearchResponse};
pub use filter::apply_filters;
pub use pipeline::{run_search, ResultPage};
pub use query::{build_request, QueryBuilder, SearchRequest, DEFAULT_SEARCH_URL, PAGE_SIZE, SEARCH_FIELDS};
