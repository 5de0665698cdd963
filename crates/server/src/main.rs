//! Roster server
//!
//! Serves application records over HTTP.

use clap::Parser;
use roster_rest::{ServerConfig, create_app_with_config, init_logging};
use tracing::info;

#[cfg(feature = "sqlite")]
use roster_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig};

/// Record inserted by `--seed` when no application holds its email.
const SEED_USERNAME: &str = "bolaney";
const SEED_EMAIL: &str = "Brendon.O'Laney@gov.bc.ca";

/// Creates and initializes a SQLite backend from the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    let db_path = config.database_url.as_deref().unwrap_or("roster.db");
    info!(database = %db_path, "Initializing SQLite backend");

    let backend = if db_path == ":memory:" {
        SqliteBackend::in_memory()?
    } else {
        SqliteBackend::with_config(db_path, SqliteBackendConfig::default())?
    };
    backend.init_schema()?;

    Ok(backend)
}

/// Inserts the default record unless its email is already registered.
#[cfg(feature = "sqlite")]
async fn seed(backend: std::sync::Arc<SqliteBackend>) -> anyhow::Result<()> {
    use roster_persistence::{ApplicationService, NewApplication};

    let service = ApplicationService::new(backend);
    let application = service
        .ensure(NewApplication::new(SEED_USERNAME, SEED_EMAIL))
        .await?;
    info!(id = %application.id, "Seed record present");
    Ok(())
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Roster server"
    );

    start_sqlite(config).await
}

/// Starts the server with the SQLite backend.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    let backend = create_sqlite_backend(&config)?;

    if config.seed {
        seed(std::sync::Arc::new(backend.clone())).await?;
    }

    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

/// Fallback when sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p roster-server --features sqlite"
    )
}
