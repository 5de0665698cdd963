//! Request and search counters exposed at `GET /metrics`.
//!
//! Counters only. They increase monotonically and reset on process start.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Registry of operational counters.
///
/// All counters use `Relaxed` ordering; each value is exact but the set is
/// not read as one snapshot.
#[derive(Debug, Default)]
pub struct Metrics {
    requests_success: AtomicU64,
    requests_client_error: AtomicU64,
    requests_server_error: AtomicU64,
    searches_executed: AtomicU64,
    searches_rejected: AtomicU64,
    records_created: AtomicU64,
    deletes_failed: AtomicU64,
}

impl Metrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished request by its status code.
    pub fn record_response(&self, status: u16) {
        let counter = match status {
            500.. => &self.requests_server_error,
            400..=499 => &self.requests_client_error,
            _ => &self.requests_success,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment searches that returned a page
    pub fn increment_searches_executed(&self) {
        self.searches_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment searches rejected for bad input
    pub fn increment_searches_rejected(&self) {
        self.searches_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment records created
    pub fn increment_records_created(&self) {
        self.records_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment deletes that reported failure
    pub fn increment_deletes_failed(&self) {
        self.deletes_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get searches executed
    pub fn searches_executed(&self) -> u64 {
        self.searches_executed.load(Ordering::Relaxed)
    }

    /// Get searches rejected
    pub fn searches_rejected(&self) -> u64 {
        self.searches_rejected.load(Ordering::Relaxed)
    }

    /// Get records created
    pub fn records_created(&self) -> u64 {
        self.records_created.load(Ordering::Relaxed)
    }

    /// Get deletes failed
    pub fn deletes_failed(&self) -> u64 {
        self.deletes_failed.load(Ordering::Relaxed)
    }

    /// Render every counter in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "# HELP roster_http_requests_total HTTP requests by outcome.");
        let _ = writeln!(out, "# TYPE roster_http_requests_total counter");
        for (outcome, counter) in [
            ("success", &self.requests_success),
            ("client_error", &self.requests_client_error),
            ("server_error", &self.requests_server_error),
        ] {
            let _ = writeln!(
                out,
                "roster_http_requests_total{{outcome=\"{}\"}} {}",
                outcome,
                counter.load(Ordering::Relaxed)
            );
        }

        for (name, help, value) in [
            (
                "roster_searches_executed_total",
                "Searches that returned a page.",
                self.searches_executed(),
            ),
            (
                "roster_searches_rejected_total",
                "Searches rejected for invalid parameters.",
                self.searches_rejected(),
            ),
            (
                "roster_records_created_total",
                "Application records created.",
                self.records_created(),
            ),
            (
                "roster_deletes_failed_total",
                "Deletes that reported a failure.",
                self.deletes_failed(),
            ),
        ] {
            let _ = writeln!(out, "# HELP {} {}", name, help);
            let _ = writeln!(out, "# TYPE {} counter", name);
            let _ = writeln!(out, "{} {}", name, value);
        }

        out
    }
}

/// Middleware that counts every response by status class.
pub async fn track_requests(
    State(metrics): State<std::sync::Arc<Metrics>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    metrics.record_response(response.status().as_u16());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_zeroed() {
        let metrics = Metrics::new();
        assert_eq!(metrics.searches_executed(), 0);
        assert_eq!(metrics.records_created(), 0);
    }

    #[test]
    fn test_record_response_classes() {
        let metrics = Metrics::new();
        metrics.record_response(200);
        metrics.record_response(201);
        metrics.record_response(404);
        metrics.record_response(503);

        let text = metrics.render();
        assert!(text.contains("roster_http_requests_total{outcome=\"success\"} 2"));
        assert!(text.contains("roster_http_requests_total{outcome=\"client_error\"} 1"));
        assert!(text.contains("roster_http_requests_total{outcome=\"server_error\"} 1"));
    }

    #[test]
    fn test_render_counters() {
        let metrics = Metrics::new();
        metrics.increment_searches_executed();
        metrics.increment_searches_rejected();
        metrics.increment_searches_rejected();
        metrics.increment_deletes_failed();

        let text = metrics.render();
        assert!(text.contains("# TYPE roster_searches_executed_total counter"));
        assert!(text.contains("roster_searches_executed_total 1"));
        assert!(text.contains("roster_searches_rejected_total 2"));
        assert!(text.contains("roster_records_created_total 0"));
        assert!(text.contains("roster_deletes_failed_total 1"));
    }
}
