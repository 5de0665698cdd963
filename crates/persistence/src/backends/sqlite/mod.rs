//! SQLite backend implementation.
//!
//! Supports in-memory databases (for tests) and file-based databases.
//!
//! # Example
//!
//! ```no_run
//! use roster_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE applications (
//!     id TEXT PRIMARY KEY,
//!     username TEXT NOT NULL,
//!     email TEXT NOT NULL UNIQUE
//! );
//! ```

mod backend;
mod query_builder;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
