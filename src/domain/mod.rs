//! Domain layer for the Bookfinder crate.
//!
//! This module contains the core domain types, independent of the HTTP transport,
//! the storage backend, or any presentation concerns.
//!
//! # Organization
//!
//! - [`book`]: Book record model, identity keys and cover URLs
//! - [`criteria`]: Search criteria, page cursor and paging direction
//! - [`error`]: Error types and result aliases
//!
//! # Examples
//!
//! ```
//! use bookfinder::domain::{BookRecord, PageCursor, SearchCriteria};
//!
//! let criteria = SearchCriteria::titled("dune");
//! let record = BookRecord::new(Some("OL1"), "Dune");
//! assert_eq!(criteria.trimmed_query(), Some("dune"));
//! assert_eq!(record.identity_key, "OL1");
//! assert!(PageCursor::default().is_first());
//! ```

pub mod book;
pub mod criteria;
pub mod error;

pub use book::{identity_key_for, BookRecord, CoverSize, CoverUrls};
pub use criteria::{PageCursor, PageDirection, SearchCriteria};
pub use error::{BookfinderError, Result};
