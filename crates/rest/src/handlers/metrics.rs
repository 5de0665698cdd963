//! Metrics exposition handler.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use roster_persistence::RecordStore;

use crate::state::AppState;

/// Content type of the Prometheus text format.
const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Handler for `GET /metrics`.
pub async fn metrics_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: RecordStore + Send + Sync,
{
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.metrics().render(),
    )
        .into_response()
}
