//! Search parameter extractor.
//!
//! Pulls `page`, `limit`, `sort` and `filter` out of the query string. The
//! page and limit must be integers when present; sort and filter stay raw
//! strings for the query layer to interpret.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use roster_persistence::SearchRequest;
use serde::Deserialize;
use tracing::debug;

use crate::error::RestError;

/// Axum extractor for search parameters.
///
/// # Example
///
/// ```rust,ignore
/// use roster_rest::extractors::SearchParams;
///
/// async fn search_handler(params: SearchParams) {
///     let request = params.into_request();
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    request: SearchRequest,
}

/// Raw query string shape; every value arrives as text.
#[derive(Debug, Deserialize)]
struct RawSearchQuery {
    page: Option<String>,
    limit: Option<String>,
    sort: Option<String>,
    filter: Option<String>,
}

impl SearchParams {
    /// Returns the parsed request.
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Consumes the extractor, returning the request.
    pub fn into_request(self) -> SearchRequest {
        self.request
    }
}

/// Parses an optional integer parameter; an empty value counts as absent.
fn parse_integer(name: &str, raw: Option<String>) -> Result<Option<i64>, RestError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse::<i64>().map(Some).map_err(|_| {
            debug!(parameter = name, value = text, "Non-integer search parameter");
            RestError::invalid_query()
        }),
    }
}

impl<S> FromRequestParts<S> for SearchParams
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<RawSearchQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                debug!(error = %e, "Unreadable search query string");
                RestError::invalid_query()
            })?;

        let request = SearchRequest {
            page: parse_integer("page", query.page)?,
            limit: parse_integer("limit", query.limit)?,
            sort: query.sort,
            filter: query.filter,
        };

        Ok(Self { request })
    }
}
