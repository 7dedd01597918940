//! Fetch-then-filter pipeline producing a committed page of results.

use super::client::SearchClient;
use super::filter::apply_filters;
use super::query::SearchRequest;
use crate::domain::error::Result;
use crate::domain::{BookRecord, PageCursor, SearchCriteria};

/// One page of filtered results.
///
/// Always replaced as a whole; `records` may be empty when the endpoint ran out
/// of pages or the client filters removed everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPage {
    pub records: Vec<BookRecord>,
    /// Matches reported by the endpoint, before client-side filtering.
    pub total_matches: u64,
    pub cursor: PageCursor,
}

impl ResultPage {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Executes `request` through `client` and filters the response with `criteria`.
///
/// # Errors
///
/// Propagates the client's pipeline errors unchanged.
pub fn run_search<C>(client: &C, request: &SearchRequest, criteria: &SearchCriteria) -> Result<ResultPage>
where
    C: SearchClient + ?Sized,
{
    let response = client.execute(request)?;
    let records = response.records.into_iter().map(BookRecord::from).collect();

    Ok(ResultPage {
        records: apply_filters(records, criteria),
        total_matches: response.total_matches,
        cursor: request.page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookfinderError;
    use crate::search::client::{RawRecord, SearchResponse};
    use crate::search::query::build_request;

    struct Canned(std::result::Result<SearchResponse, u16>);

    impl SearchClient for Canned {
        fn execute(&self, _request: &SearchRequest) -> Result<SearchResponse> {
            self.0.clone().map_err(|status| BookfinderError::Remote { status })
        }
    }

    fn raw(title: &str, year: i32) -> RawRecord {
        RawRecord {
            title: Some(title.to_string()),
            first_publish_year: Some(year),
            ..RawRecord::default()
        }
    }

    #[test]
    fn filters_records_but_keeps_endpoint_total() {
        let client = Canned(Ok(SearchResponse {
            records: vec![raw("old", 1950), raw("new", 2010)],
            total_matches: 77,
        }));
        let request = build_request("x", PageCursor::new(2).unwrap()).unwrap();
        let criteria = SearchCriteria {
            min_year: 2000,
            ..SearchCriteria::titled("x")
        };

        let page = run_search(&client, &request, &criteria).unwrap();
        assert_eq!(page.total_matches, 77);
        assert_eq!(page.cursor.get(), 2);
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].title, "new");
    }

    #[test]
    fn client_errors_pass_through() {
        let client = Canned(Err(500));
        let request = build_request("x", PageCursor::FIRST).unwrap();

        let err = run_search(&client, &request, &SearchCriteria::titled("x")).unwrap_err();
        assert!(matches!(err, BookfinderError::Remote { status: 500 }));
    }
}
