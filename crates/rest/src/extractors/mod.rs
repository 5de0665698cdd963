//! Axum extractors for request data.
//!
//! - [`SearchParams`] - Extract raw search parameters from the query string

mod search_params;

pub use search_params::SearchParams;
