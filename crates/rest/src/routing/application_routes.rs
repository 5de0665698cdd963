//! Application route configuration.

use axum::{Router, routing::get};
use roster_persistence::RecordStore;

use crate::handlers;
use crate::state::AppState;

/// Versioned prefix for record routes.
pub const API_PREFIX: &str = "/v1/applications";

/// Creates all REST API routes.
///
/// # Routes
///
/// ## Records
/// - `GET /v1/applications` - List all
/// - `POST /v1/applications` - Create
/// - `GET /v1/applications/search` - Paginated search
/// - `GET /v1/applications/{id}` - Read
/// - `PUT /v1/applications/{id}` - Update
/// - `DELETE /v1/applications/{id}` - Delete
///
/// ## Operational
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
/// - `GET /metrics` - Prometheus counters
///
/// The static `search` segment takes precedence over `{id}`, so a record can
/// never shadow the search route.
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: RecordStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            API_PREFIX,
            get(handlers::find_all_handler::<S>).post(handlers::create_handler::<S>),
        )
        .route(
            &format!("{}/search", API_PREFIX),
            get(handlers::search_handler::<S>),
        )
        .route(
            &format!("{}/{{id}}", API_PREFIX),
            get(handlers::find_one_handler::<S>)
                .put(handlers::update_handler::<S>)
                .delete(handlers::delete_handler::<S>),
        )
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        .route("/metrics", get(handlers::metrics_handler::<S>))
        .with_state(state)
}
