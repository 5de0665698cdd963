//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates record state errors, validation errors,
//! search input errors and backend errors.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The message every rejected search input renders as.
///
/// Callers never learn which of the search parameters was at fault.
pub const INVALID_QUERY_PARAMETERS: &str = "Invalid query parameters";

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Record state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Search input errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to record state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested record was not found.
    #[error("application not found: {id}")]
    NotFound { id: String },

    /// A unique field already holds the given value.
    #[error("application with {field} '{value}' already exists")]
    AlreadyExists { field: String, value: String },
}

/// Errors raised by the store when a request does not fit its schema.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Missing required field.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    /// The field does not exist on application records.
    #[error("unknown field: {field}")]
    UnknownField { field: String },

    /// The sort direction is neither ascending nor descending.
    #[error("invalid sort direction '{direction}' for field {field}")]
    InvalidSortDirection { field: String, direction: String },
}

/// Client-supplied search input that could not be turned into a store query.
///
/// Every variant displays as [`INVALID_QUERY_PARAMETERS`]; use
/// [`QueryError::detail`] when the cause needs to be logged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// A parameter is not valid serialized data of the expected shape.
    #[error("Invalid query parameters")]
    Malformed {
        parameter: &'static str,
        detail: String,
    },

    /// A filter value has the wrong shape for its operation.
    #[error("Invalid query parameters")]
    ValueShape {
        key: String,
        operation: &'static str,
        expected: &'static str,
    },

    /// A filter clause with a recognised operation names no field.
    #[error("Invalid query parameters")]
    MissingKey { operation: &'static str },
}

impl QueryError {
    /// Returns a description of the underlying cause, for logs only.
    pub fn detail(&self) -> String {
        match self {
            QueryError::Malformed { parameter, detail } => {
                format!("{} is malformed: {}", parameter, detail)
            }
            QueryError::ValueShape {
                key,
                operation,
                expected,
            } => format!("filter '{}' with operation '{}' expects {}", key, operation, expected),
            QueryError::MissingKey { operation } => {
                format!("filter with operation '{}' has no key", operation)
            }
        }
    }
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema setup error.
    #[error("schema initialization failed: {message}")]
    SchemaError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for query translation.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::ConnectionFailed {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
        })
    }
}
