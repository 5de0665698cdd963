//! Shared test harness for REST API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use roster_persistence::backends::sqlite::SqliteBackend;
use roster_persistence::{ApplicationService, NewApplication};
use roster_rest::{AppState, ServerConfig};
use serde_json::Value;

/// Records seeded by [`create_seeded_server`].
pub const SEED: [(&str, &str); 3] = [
    ("ada", "ada@gov.bc.ca"),
    ("grace", "grace@example.com"),
    ("linus", "linus@gov.bc.ca"),
];

/// Creates a test server over an empty in-memory SQLite backend.
pub fn create_test_server() -> (TestServer, Arc<SqliteBackend>) {
    create_test_server_with_config(ServerConfig::for_testing())
}

/// Creates a test server with custom configuration.
pub fn create_test_server_with_config(config: ServerConfig) -> (TestServer, Arc<SqliteBackend>) {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    let backend = Arc::new(backend);

    let state = AppState::new(Arc::clone(&backend), config.clone());
    let app = roster_rest::create_app_with_state(state, &config);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, backend)
}

/// Creates a test server holding the [`SEED`] records.
pub async fn create_seeded_server() -> (TestServer, Arc<SqliteBackend>) {
    let (server, backend) = create_test_server();
    let service = ApplicationService::new(Arc::clone(&backend));
    for (username, email) in SEED {
        service
            .create(NewApplication::new(username, email))
            .await
            .expect("Failed to seed application");
    }
    (server, backend)
}

/// Asserts the uniform invalid-search response.
pub fn assert_invalid_query(body: &Value) {
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], "Invalid query parameters");
}
