//! Roster Persistence Layer
//!
//! This crate owns everything between the HTTP handlers and the database:
//! the application record types, the [`RecordStore`](core::RecordStore)
//! capability, the search/query-translation core and the
//! [`ApplicationService`](service::ApplicationService) that ties them together.
//!
//! # Architecture
//!
//! - [`types`] - Application records and store-native query types
//! - [`error`] - Error types for all operations
//! - [`core`] - The record store trait
//! - [`query`] - Translation of untrusted search input into store queries
//! - [`service`] - CRUD and search operations over a record store
//! - [`backends`] - Backend implementations (SQLite)
//!
//! # Backend Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Search
//!
//! Search input arrives as loosely-typed strings. The query core parses it,
//! normalizes pagination and builds the predicate and ordering handed to the
//! store:
//!
//! ```
//! use roster_persistence::query::{PageLimits, PreparedQuery, SearchRequest};
//!
//! let request = SearchRequest {
//!     page: Some(2),
//!     limit: Some(25),
//!     sort: Some(r#"[{"username":"ASC"}]"#.to_string()),
//!     filter: Some(r#"[{"key":"email","operation":"like","value":"@gov"}]"#.to_string()),
//! };
//!
//! let query = PreparedQuery::prepare(&request, PageLimits::default()).unwrap();
//! assert_eq!(query.page.skip(), 25);
//! assert_eq!(query.page.take(), 25);
//! assert_eq!(
//!     serde_json::to_value(&query.predicate).unwrap(),
//!     serde_json::json!({"email": {"contains": "@gov"}})
//! );
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod query;
pub mod service;
pub mod types;

// Re-export commonly used types at crate root
pub use core::RecordStore;
pub use error::{StorageError, StorageResult};
pub use query::{PageLimits, SearchPage, SearchRequest};
pub use service::{ApplicationService, DeleteOutcome};
pub use types::{Application, ApplicationUpdate, NewApplication};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
