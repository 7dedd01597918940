//! Book record domain model.
//!
//! A [`BookRecord`] is one search hit, normalised from the endpoint's raw document
//! and immutable afterwards. Its [`identity_key`](BookRecord::identity_key) is the
//! address used by the favorites set, so its derivation must stay stable across
//! releases: changing it orphans every persisted favorite.

use serde::{Deserialize, Serialize};

/// Default base for cover image URLs.
pub const DEFAULT_COVER_BASE_URL: &str = "https://covers.openlibrary.org/b/id";

/// Default image shown for records without a cover id.
pub const DEFAULT_PLACEHOLDER_COVER_URL: &str = "https://via.placeholder.com/150x220?text=No+Cover";

/// Suffix used in fallback identity keys when a record has no cover id.
const NO_COVER_MARKER: &str = "nocover";

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub identity_key: String,
    pub title: String,
    pub authors: Vec<String>,
    pub cover_id: Option<u64>,
    pub first_publish_year: Option<i32>,
    pub ebook_count: Option<u32>,
    pub publishers: Vec<String>,
    pub isbns: Vec<String>,
    pub subjects: Vec<String>,
}

impl BookRecord {
    /// Creates a record with only a title and an optional catalog key.
    ///
    /// The identity key is derived immediately; every other field starts empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::domain::BookRecord;
    ///
    /// let dune = BookRecord::new(Some("OL1"), "Dune");
    /// assert_eq!(dune.identity_key, "OL1");
    ///
    /// let untitled = BookRecord::new(None, "Dune");
    /// assert_eq!(untitled.identity_key, "Dune-nocover");
    /// ```
    pub fn new(catalog_key: Option<&str>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            identity_key: identity_key_for(catalog_key, &title, None),
            title,
            authors: Vec::new(),
            cover_id: None,
            first_publish_year: None,
            ebook_count: None,
            publishers: Vec::new(),
            isbns: Vec::new(),
            subjects: Vec::new(),
        }
    }

    /// Returns `true` if the record lists at least one ebook edition.
    #[must_use]
    pub fn has_ebook(&self) -> bool {
        self.ebook_count.is_some_and(|count| count > 0)
    }
}

/// Derives the identity key of a record.
///
/// The catalog key wins when present and non-empty. Otherwise the key is
/// `"{title}-{cover_id}"`, with `nocover` standing in for a missing or zero cover id.
/// Two records lacking both a catalog key and a cover id, with equal titles,
/// therefore share a key.
#[must_use]
pub fn identity_key_for(catalog_key: Option<&str>, title: &str, cover_id: Option<u64>) -> String {
    if let Some(key) = catalog_key.filter(|k| !k.is_empty()) {
        return key.to_string();
    }

    match cover_id.filter(|&id| id != 0) {
        Some(id) => format!("{title}-{id}"),
        None => format!("{title}-{NO_COVER_MARKER}"),
    }
}

/// Cover image size variants served by the covers endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CoverSize {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
        }
    }
}

/// Resolves cover ids to image URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverUrls {
    base_url: String,
    placeholder_url: String,
}

impl Default for CoverUrls {
    fn default() -> Self {
        Self::new(DEFAULT_COVER_BASE_URL, DEFAULT_PLACEHOLDER_COVER_URL)
    }
}

impl CoverUrls {
    pub fn new(base_url: impl Into<String>, placeholder_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            placeholder_url: placeholder_url.into(),
        }
    }

    /// Returns the image URL for `cover_id`, or the placeholder if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::domain::{CoverSize, CoverUrls};
    ///
    /// let covers = CoverUrls::default();
    /// assert_eq!(
    ///     covers.url_for(Some(8_231_856), CoverSize::Medium),
    ///     "https://covers.openlibrary.org/b/id/8231856-M.jpg"
    /// );
    /// ```
    #[must_use]
    pub fn url_for(&self, cover_id: Option<u64>, size: CoverSize) -> String {
        match cover_id.filter(|&id| id != 0) {
            Some(id) => format!("{}/{id}-{}.jpg", self.base_url, size.suffix()),
            None => self.placeholder_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_key_takes_precedence() {
        assert_eq!(identity_key_for(Some("/works/OL45W"), "Dune", Some(7)), "/works/OL45W");
    }

    #[test]
    fn empty_catalog_key_falls_back_to_title_and_cover() {
        assert_eq!(identity_key_for(Some(""), "Dune", Some(7)), "Dune-7");
        assert_eq!(identity_key_for(None, "Dune", Some(0)), "Dune-nocover");
    }

    #[test]
    fn titleless_coverless_records_collide() {
        let a = identity_key_for(None, "", None);
        let b = identity_key_for(None, "", None);
        assert_eq!(a, b);
        assert_eq!(a, "-nocover");
    }

    #[test]
    fn cover_urls_use_size_suffix_and_placeholder() {
        let covers = CoverUrls::new("https://covers.example/b/id/", "https://img.example/none.png");
        assert_eq!(covers.url_for(Some(42), CoverSize::Large), "https://covers.example/b/id/42-L.jpg");
        assert_eq!(covers.url_for(Some(42), CoverSize::Small), "https://covers.example/b/id/42-S.jpg");
        assert_eq!(covers.url_for(None, CoverSize::Medium), "https://img.example/none.png");
    }

    #[test]
    fn ebook_presence_requires_positive_count() {
        let mut record = BookRecord::new(None, "Dune");
        assert!(!record.has_ebook());
        record.ebook_count = Some(0);
        assert!(!record.has_ebook());
        record.ebook_count = Some(2);
        assert!(record.has_ebook());
    }
}
