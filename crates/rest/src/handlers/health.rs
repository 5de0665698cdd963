//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness endpoints for monitoring and load
//! balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_persistence::RecordStore;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET /health`
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: RecordStore + Send + Sync,
{
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.storage().backend_name(),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for the liveness probe.
///
/// `GET /_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for the readiness probe.
///
/// Runs a count against the store.
///
/// # Response
///
/// - `200 OK` - The store answered
/// - `503 Service Unavailable` - The store failed
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: RecordStore + Send + Sync,
{
    debug!("Processing readiness check request");

    let backend_name = state.storage().backend_name();
    let records = state.service().count().await.map_err(|e| {
        warn!(backend = backend_name, error = %e, "Readiness check failed");
        RestError::ServiceUnavailable {
            message: format!("storage not ready: {}", e),
        }
    })?;

    let response = serde_json::json!({
        "status": "ready",
        "backend": backend_name,
        "checks": {
            "storage": "ok",
            "records": records
        }
    });

    Ok((StatusCode::OK, Json(response)).into_response())
}
