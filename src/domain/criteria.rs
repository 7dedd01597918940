//! Search criteria and pagination cursor types.

use serde::{Deserialize, Serialize};

/// User-entered search parameters.
///
/// `title_query` is sent to the endpoint; the other three fields are applied
/// client-side by [`apply_filters`](crate::search::apply_filters).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub title_query: String,
    pub author_filter: String,
    /// Minimum first-publish year; `0` means unset.
    pub min_year: u32,
    pub ebook_only: bool,
}

impl SearchCriteria {
    /// Criteria with only a title query set.
    pub fn titled(title_query: impl Into<String>) -> Self {
        Self {
            title_query: title_query.into(),
            ..Self::default()
        }
    }

    /// Returns the trimmed title query, or `None` if nothing searchable remains.
    #[must_use]
    pub fn trimmed_query(&self) -> Option<&str> {
        let trimmed = self.title_query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// One-based page index.
///
/// The inner value is never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageCursor(u32);

impl Default for PageCursor {
    fn default() -> Self {
        Self::FIRST
    }
}

impl PageCursor {
    pub const FIRST: Self = Self(1);

    /// Builds a cursor, returning `None` for page `0`.
    #[must_use]
    pub const fn new(page: u32) -> Option<Self> {
        if page == 0 {
            None
        } else {
            Some(Self(page))
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_first(self) -> bool {
        self.0 == 1
    }

    /// Cursor one page further in `direction`, or `None` when stepping back from page 1.
    #[must_use]
    pub fn step(self, direction: PageDirection) -> Option<Self> {
        match direction {
            PageDirection::Prev => self.0.checked_sub(1).and_then(Self::new),
            PageDirection::Next => self.0.checked_add(1).map(Self),
        }
    }
}

impl std::fmt::Display for PageCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pagination direction requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Prev,
    Next,
}
