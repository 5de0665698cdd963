//! Search query translation.
//!
//! Search input arrives from clients as loosely-typed values: optional page
//! and limit numbers plus `sort` and `filter` parameters carrying serialized
//! JSON. This module turns that input into a bounded, store-native query.
//!
//! - [`filter`] - Parses filter clauses and translates them into a [`WhereClause`](crate::types::WhereClause)
//! - [`sort`] - Parses the sort expression into an [`OrderBy`](crate::types::OrderBy)
//! - [`pagination`] - Normalizes page and limit and derives skip, take and page counts
//! - [`orchestrator`] - Runs the whole pipeline against a [`RecordStore`](crate::core::RecordStore)
//!
//! Any rejected input surfaces as a [`QueryError`](crate::error::QueryError),
//! which always renders as "Invalid query parameters".

pub mod filter;
pub mod orchestrator;
pub mod pagination;
pub mod sort;

pub use filter::{ClauseOperation, FilterClause, FilterExpression, FilterOperation, FilterValue, translate};
pub use orchestrator::{PreparedQuery, SearchPage, SearchRequest, search};
pub use pagination::{PageLimits, PageRequest};
pub use sort::parse_sort;
