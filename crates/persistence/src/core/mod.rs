//! Core storage abstractions.
//!
//! - [`RecordStore`] - CRUD and bounded reads over application records
//!
//! The query core and the service only ever talk to a store through this
//! trait, so they can be exercised against the SQLite backend or against an
//! in-process double in tests.

mod storage;

pub use storage::RecordStore;
