//! # roster-rest - HTTP API for application records
//!
//! This crate exposes the application record store over HTTP using
//! [axum](https://docs.rs/axum). Record operations go through
//! [`ApplicationService`](roster_persistence::ApplicationService); the
//! handlers here own routing, status codes and counters.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roster_rest::{create_app, ServerConfig};
//! use roster_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("roster.db")?;
//!     backend.init_schema()?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | create | POST | `/v1/applications` |
//! | list | GET | `/v1/applications` |
//! | search | GET | `/v1/applications/search?page&limit&sort&filter` |
//! | read | GET | `/v1/applications/{id}` |
//! | update | PUT | `/v1/applications/{id}` |
//! | delete | DELETE | `/v1/applications/{id}` |
//! | health | GET | `/health`, `/_liveness`, `/_readiness` |
//! | metrics | GET | `/metrics` |
//!
//! ## Error Handling
//!
//! Errors are JSON bodies `{"statusCode": .., "message": ..}`:
//!
//! | HTTP Status | Cause |
//! |-------------|-------|
//! | 400 | Invalid search parameters, missing fields, unknown sort field |
//! | 404 | Application not found |
//! | 409 | Email already registered |
//! | 500 | Storage failure |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their HTTP rendering
//! - [`config`] - Server configuration
//! - [`state`] - Application state (service, configuration, metrics)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Axum extractors for search parameters
//! - [`metrics`] - Counters and their Prometheus rendering
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use metrics::Metrics;
pub use state::AppState;

use std::sync::Arc;

use axum::{Router, middleware};
use roster_persistence::RecordStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: RecordStore + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `storage` - The storage backend to use
/// * `config` - Server configuration
///
/// # Example
///
/// ```rust,ignore
/// use roster_rest::{create_app_with_config, ServerConfig};
/// use roster_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// backend.init_schema()?;
/// let config = ServerConfig {
///     port: 3000,
///     max_page_size: 50,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: RecordStore + Send + Sync + 'static,
{
    info!(
        backend = storage.backend_name(),
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "Creating REST API server"
    );

    let state = AppState::new(Arc::new(storage), config.clone());
    create_app_with_state(state, &config)
}

/// Creates the Axum application over an existing [`AppState`].
///
/// `config` supplies the timeout and CORS settings for the middleware stack.
pub fn create_app_with_state<S>(state: AppState<S>, config: &ServerConfig) -> Router
where
    S: RecordStore + Send + Sync + 'static,
{
    let metrics = state.metrics_arc();
    apply_middleware(routing::create_routes(state), metrics, config)
}

/// Wraps `router` in CORS, tracing, timeout and request counting.
///
/// Counting is outermost so timed-out requests are still recorded.
fn apply_middleware(router: Router, metrics: Arc<Metrics>, config: &ServerConfig) -> Router {
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(config))
    } else {
        router
    };

    router
        .layer(service_builder)
        .layer(middleware::from_fn_with_state(metrics, crate::metrics::track_requests))
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "roster={level},roster_rest={level},roster_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
