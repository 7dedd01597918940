//! Client-side result filtering.
//!
//! The endpoint only understands the title query; author, year and ebook
//! constraints are applied here, after the page has been fetched. Each predicate
//! is independent and they combine conjunctively, so evaluation order never
//! changes the outcome and re-filtering a filtered page is a no-op.

use crate::domain::{BookRecord, SearchCriteria};

/// Keeps the records of `records` that satisfy every active filter in `criteria`.
///
/// - author filter (non-blank): some author contains it, case-insensitively
/// - `min_year > 0`: first-publish year is known and at least `min_year`
/// - `ebook_only`: ebook count is known and positive
///
/// Relative order is preserved.
#[must_use]
pub fn apply_filters(records: Vec<BookRecord>, criteria: &SearchCriteria) -> Vec<BookRecord> {
    let author_needle = criteria.author_filter.trim().to_lowercase();
    let before = records.len();

    let kept: Vec<BookRecord> = records
        .into_iter()
        .filter(|record| {
            matches_author(record, &author_needle)
                && matches_year(record, criteria.min_year)
                && (!criteria.ebook_only || record.has_ebook())
        })
        .collect();

    tracing::debug!(before = before, after = kept.len(), "client filters applied");
    kept
}

fn matches_author(record: &BookRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record
        .authors
        .iter()
        .any(|author| author.to_lowercase().contains(needle))
}

fn matches_year(record: &BookRecord, min_year: u32) -> bool {
    if min_year == 0 {
        return true;
    }
    record
        .first_publish_year
        .is_some_and(|year| i64::from(year) >= i64::from(min_year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, authors: &[&str], year: Option<i32>, ebooks: Option<u32>) -> BookRecord {
        let mut record = BookRecord::new(None, title);
        record.authors = authors.iter().map(|a| (*a).to_string()).collect();
        record.first_publish_year = year;
        record.ebook_count = ebooks;
        record
    }

    fn sample() -> Vec<BookRecord> {
        vec![
            book("Dune", &["Frank Herbert"], Some(1965), Some(4)),
            book("Children of Dune", &["Frank Herbert"], Some(1976), Some(0)),
            book("Dune: House Atreides", &["Brian Herbert", "Kevin J. Anderson"], Some(1999), Some(2)),
            book("Anonymous Dune", &[], None, None),
            book("Sandworms of Dune", &["Brian Herbert"], Some(2007), Some(1)),
        ]
    }

    fn titles(records: &[BookRecord]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn no_active_filters_keep_everything() {
        let kept = apply_filters(sample(), &SearchCriteria::titled("dune"));
        assert_eq!(kept, sample());
    }

    #[test]
    fn year_and_ebook_filters_compose() {
        let records = vec![
            book("a", &[], Some(1999), Some(1)),
            book("b", &[], Some(2001), Some(0)),
            book("c", &[], Some(2005), Some(3)),
        ];
        let criteria = SearchCriteria {
            min_year: 2000,
            ebook_only: true,
            ..SearchCriteria::titled("x")
        };

        assert_eq!(titles(&apply_filters(records, &criteria)), vec!["c"]);
    }

    #[test]
    fn author_filter_is_case_insensitive_substring() {
        let criteria = SearchCriteria {
            author_filter: "  BRIAN ".into(),
            ..SearchCriteria::titled("dune")
        };
        assert_eq!(
            titles(&apply_filters(sample(), &criteria)),
            vec!["Dune: House Atreides", "Sandworms of Dune"]
        );
    }

    #[test]
    fn records_without_authors_fail_a_non_empty_author_filter() {
        let criteria = SearchCriteria {
            author_filter: "a".into(),
            ..SearchCriteria::titled("dune")
        };
        let kept = apply_filters(sample(), &criteria);
        assert!(!titles(&kept).contains(&"Anonymous Dune"));
    }

    #[test]
    fn unknown_year_fails_an_active_year_filter() {
        let criteria = SearchCriteria {
            min_year: 1,
            ..SearchCriteria::titled("dune")
        };
        let kept = apply_filters(sample(), &criteria);
        assert_eq!(kept.len(), 4);
        assert!(!titles(&kept).contains(&"Anonymous Dune"));
    }

    #[test]
    fn filtering_is_idempotent() {
        let criteria_set = [
            SearchCriteria::titled("dune"),
            SearchCriteria {
                author_filter: "herbert".into(),
                min_year: 1970,
                ebook_only: true,
                ..SearchCriteria::default()
            },
            SearchCriteria {
                min_year: 3000,
                ..SearchCriteria::default()
            },
        ];

        for criteria in &criteria_set {
            let once = apply_filters(sample(), criteria);
            let twice = apply_filters(once.clone(), criteria);
            assert_eq!(once, twice);
        }
    }
}
