//! Error types for the REST API.
//!
//! Every error renders as a JSON body of the form
//! `{"statusCode": <u16>, "message": <string>}`.
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status |
//! |--------------|-------------|
//! | Query | 400 |
//! | Validation | 400 |
//! | NotFound | 404 |
//! | AlreadyExists | 409 |
//! | Backend | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_persistence::error::{
    BackendError, INVALID_QUERY_PARAMETERS, ResourceError, StorageError,
};
use serde_json::json;
use std::fmt;

/// Message returned when a single-record lookup misses.
pub const APPLICATION_NOT_FOUND: &str = "Application not found.";

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Record not found (HTTP 404).
    NotFound {
        /// Message shown to the client.
        message: String,
    },

    /// Bad request (HTTP 400).
    BadRequest {
        /// Message shown to the client.
        message: String,
    },

    /// Unique constraint conflict (HTTP 409).
    Conflict {
        /// Message shown to the client.
        message: String,
    },

    /// Store unavailable during a readiness probe (HTTP 503).
    ServiceUnavailable {
        /// Message shown to the client.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Message shown to the client.
        message: String,
    },
}

impl RestError {
    /// The 404 returned for a missing application.
    pub fn application_not_found() -> Self {
        RestError::NotFound {
            message: APPLICATION_NOT_FOUND.to_string(),
        }
    }

    /// The uniform 400 returned for unusable search input.
    pub fn invalid_query() -> Self {
        RestError::BadRequest {
            message: INVALID_QUERY_PARAMETERS.to_string(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the client-facing message.
    pub fn message(&self) -> &str {
        match self {
            RestError::NotFound { message }
            | RestError::BadRequest { message }
            | RestError::Conflict { message }
            | RestError::ServiceUnavailable { message }
            | RestError::InternalError { message } => message,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status_code().as_u16(), self.message())
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), message = %self.message(), "Request failed");
        }

        let body = json!({
            "statusCode": status.as_u16(),
            "message": self.message(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            // The cause stays in the logs; clients only see the uniform message.
            StorageError::Query(_) => RestError::invalid_query(),
            StorageError::Validation(e) => RestError::BadRequest {
                message: e.to_string(),
            },
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { .. } => RestError::application_not_found(),
            e @ ResourceError::AlreadyExists { .. } => RestError::Conflict {
                message: e.to_string(),
            },
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
