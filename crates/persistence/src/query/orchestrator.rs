//! Search orchestration.
//!
//! Ties the filter translator, sort parser and pagination calculator together
//! and runs the resulting query against a [`RecordStore`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::filter::{FilterExpression, translate};
use super::pagination::{PageLimits, PageRequest};
use super::sort::parse_sort;
use crate::core::RecordStore;
use crate::error::{QueryResult, StorageResult};
use crate::types::{Application, CountArgs, FindManyArgs, OrderBy, WhereClause};

/// Raw search input as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchRequest {
    /// Requested 1-based page.
    pub page: Option<i64>,
    /// Requested page size.
    pub limit: Option<i64>,
    /// Serialized sort expression.
    pub sort: Option<String>,
    /// Serialized filter expression.
    pub filter: Option<String>,
}

/// A validated search, ready to run against a store.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    /// The normalized page window.
    pub page: PageRequest,
    /// Ordering handed to the store.
    pub order_by: OrderBy,
    /// Predicate handed to the store.
    pub predicate: WhereClause,
}

impl PreparedQuery {
    /// Parses and translates raw search input.
    ///
    /// Fails with a [`QueryError`](crate::error::QueryError) if either the
    /// sort or the filter parameter cannot be parsed; callers see the same
    /// message whichever one was at fault.
    pub fn prepare(request: &SearchRequest, limits: PageLimits) -> QueryResult<Self> {
        let order_by = parse_sort(request.sort.as_deref())?;
        let expression = FilterExpression::parse(request.filter.as_deref())?;
        let predicate = translate(&expression)?;
        let page = PageRequest::normalize_with(request.page, request.limit, limits);

        Ok(Self {
            page,
            order_by,
            predicate,
        })
    }

    /// Arguments for fetching the requested page.
    pub fn find_many_args(&self) -> FindManyArgs {
        FindManyArgs::new()
            .with_skip(self.page.skip())
            .with_take(self.page.take())
            .with_order_by(self.order_by.clone())
            .with_predicate(self.predicate.clone())
    }
}

/// One page of search results with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// Records on this page.
    pub applications: Vec<Application>,
    /// The normalized page number.
    pub page: u64,
    /// The normalized page size.
    pub limit: u64,
    /// Number of records matching the predicate.
    pub total: u64,
    /// `ceil(total / limit)`.
    pub total_pages: u64,
}

/// Runs a search against `store`.
///
/// The page fetch and the count are issued concurrently as two independent
/// reads. Nothing holds them to a single snapshot, so a write landing between
/// them can leave `total` out of step with `applications`.
///
/// # Errors
///
/// * `StorageError::Query` - If the sort or filter input is rejected
/// * Any error the store returns from either read
pub async fn search<S>(
    store: &S,
    request: &SearchRequest,
    limits: PageLimits,
) -> StorageResult<SearchPage>
where
    S: RecordStore + ?Sized,
{
    let query = PreparedQuery::prepare(request, limits).inspect_err(|e| {
        debug!(detail = %e.detail(), "Rejected search input");
    })?;

    let find_args = query.find_many_args();
    let count_args = find_args.count_args();

    debug!(
        backend = store.backend_name(),
        skip = query.page.skip(),
        take = query.page.take(),
        clauses = query.predicate.len(),
        "Executing search"
    );

    let (applications, total) =
        tokio::try_join!(store.find_many(&find_args), store.count(&count_args))?;

    Ok(SearchPage {
        applications,
        page: query.page.page(),
        limit: query.page.limit(),
        total,
        total_pages: query.page.total_pages(total),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::error::{BackendError, QueryError, StorageError, INVALID_QUERY_PARAMETERS};
    use crate::types::{ApplicationUpdate, NewApplication};

    /// Returns canned results and remembers the arguments it was called with.
    #[derive(Default)]
    struct RecordingStore {
        records: Vec<Application>,
        total: u64,
        fail_count: bool,
        find_calls: Mutex<Vec<FindManyArgs>>,
        count_calls: Mutex<Vec<CountArgs>>,
    }

    #[async_trait]
    impl RecordStore for RecordingStore {
        fn backend_name(&self) -> &'static str {
            "recording"
        }

        async fn create(&self, _input: NewApplication) -> StorageResult<Application> {
            unimplemented!()
        }

        async fn find_unique(&self, _id: &str) -> StorageResult<Option<Application>> {
            unimplemented!()
        }

        async fn find_many(&self, args: &FindManyArgs) -> StorageResult<Vec<Application>> {
            self.find_calls.lock().unwrap().push(args.clone());
            Ok(self.records.clone())
        }

        async fn count(&self, args: &CountArgs) -> StorageResult<u64> {
            self.count_calls.lock().unwrap().push(args.clone());
            if self.fail_count {
                return Err(StorageError::Backend(BackendError::ConnectionFailed {
                    backend_name: "recording".to_string(),
                    message: "down".to_string(),
                }));
            }
            Ok(self.total)
        }

        async fn update(&self, _id: &str, _changes: ApplicationUpdate) -> StorageResult<Application> {
            unimplemented!()
        }

        async fn delete(&self, _id: &str) -> StorageResult<()> {
            unimplemented!()
        }
    }

    fn two_records() -> Vec<Application> {
        vec![
            Application::new("1", "ada", "ada@example.com"),
            Application::new("2", "grace", "grace@example.com"),
        ]
    }

    #[tokio::test]
    async fn test_search_assembles_envelope() {
        let store = RecordingStore {
            records: two_records(),
            total: 2,
            ..Default::default()
        };
        let request = SearchRequest {
            page: Some(1),
            limit: Some(10),
            sort: None,
            filter: Some(r#"[{"key":"username","operation":"like","value":"a"}]"#.to_string()),
        };

        let page = search(&store, &request, PageLimits::default()).await.unwrap();

        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({
                "applications": [
                    {"id": "1", "username": "ada", "email": "ada@example.com"},
                    {"id": "2", "username": "grace", "email": "grace@example.com"}
                ],
                "page": 1,
                "limit": 10,
                "total": 2,
                "totalPages": 1
            })
        );
    }

    #[tokio::test]
    async fn test_fetch_and_count_share_predicate_and_ordering() {
        let store = RecordingStore {
            total: 45,
            ..Default::default()
        };
        let request = SearchRequest {
            page: Some(3),
            limit: Some(20),
            sort: Some(r#"[{"email":"DESC"}]"#.to_string()),
            filter: Some(r#"[{"key":"email","operation":"neq","value":"x"}]"#.to_string()),
        };

        let page = search(&store, &request, PageLimits::default()).await.unwrap();
        assert_eq!(page.total_pages, 3);

        let find = store.find_calls.lock().unwrap()[0].clone();
        let count = store.count_calls.lock().unwrap()[0].clone();
        assert_eq!(find.skip, Some(40));
        assert_eq!(find.take, Some(20));
        assert_eq!(find.predicate, count.predicate);
        assert_eq!(find.order_by, count.order_by);
        assert_eq!(
            serde_json::to_value(&count.predicate).unwrap(),
            json!({"email": {"not": {"equals": "x"}}})
        );
    }

    #[tokio::test]
    async fn test_defaults_when_page_and_limit_absent() {
        let store = RecordingStore::default();
        let page = search(&store, &SearchRequest::default(), PageLimits::default())
            .await
            .unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(store.find_calls.lock().unwrap()[0].predicate.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_sort_or_filter_is_uniform() {
        let bad_sort = SearchRequest {
            sort: Some("nope".to_string()),
            filter: Some("[]".to_string()),
            ..Default::default()
        };
        let bad_filter = SearchRequest {
            sort: Some("[]".to_string()),
            filter: Some("nope".to_string()),
            ..Default::default()
        };

        for request in [bad_sort, bad_filter] {
            let store = RecordingStore::default();
            let err = search(&store, &request, PageLimits::default())
                .await
                .unwrap_err();
            assert!(matches!(err, StorageError::Query(QueryError::Malformed { .. })));
            assert_eq!(err.to_string(), INVALID_QUERY_PARAMETERS);
            assert!(store.find_calls.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let store = RecordingStore {
            fail_count: true,
            ..Default::default()
        };
        let err = search(&store, &SearchRequest::default(), PageLimits::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));
    }

    #[test]
    fn test_prepare_applies_limits() {
        let request = SearchRequest {
            page: Some(0),
            limit: Some(500),
            ..Default::default()
        };
        let query = PreparedQuery::prepare(&request, PageLimits::default()).unwrap();
        assert_eq!(query.page.page(), 1);
        assert_eq!(query.page.limit(), 10);
        assert_eq!(query.find_many_args().skip, Some(0));
    }
}
