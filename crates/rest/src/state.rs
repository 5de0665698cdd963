//! Application state for the REST API.
//!
//! This module defines the shared state available to all request handlers:
//! the application service over the record store and the metrics registry.

use std::sync::Arc;

use roster_persistence::{ApplicationService, RecordStore};

use crate::config::ServerConfig;
use crate::metrics::Metrics;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`RecordStore`])
///
/// # Example
///
/// ```rust,ignore
/// use roster_rest::{AppState, ServerConfig};
/// use roster_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// backend.init_schema()?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// ```
pub struct AppState<S> {
    /// Record operations over the storage backend.
    service: ApplicationService<S>,

    /// Operational counters.
    metrics: Arc<Metrics>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<S: RecordStore> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    ///
    /// Search page limits are taken from the configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        let service = ApplicationService::with_limits(storage, config.page_limits());
        Self {
            service,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Returns the application service.
    pub fn service(&self) -> &ApplicationService<S> {
        &self.service
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        self.service.store()
    }

    /// Returns the metrics registry.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Returns a clone of the metrics Arc.
    pub fn metrics_arc(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }
}
