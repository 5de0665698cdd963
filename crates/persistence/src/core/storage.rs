//! Core record storage trait.
//!
//! This module defines the [`RecordStore`] trait, which provides the
//! operations the application service and the search orchestrator need from
//! a persistence backend.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{
    Application, ApplicationUpdate, CountArgs, FindManyArgs, NewApplication,
};

/// Storage capability for application records.
///
/// Predicates and orderings arrive in the store-native shape produced by the
/// query core ([`WhereClause`](crate::types::WhereClause),
/// [`OrderBy`](crate::types::OrderBy)). The store is responsible for
/// rejecting fields or sort directions it does not understand.
///
/// # Example
///
/// ```ignore
/// use roster_persistence::core::RecordStore;
/// use roster_persistence::types::{FindManyArgs, NewApplication};
///
/// async fn example<S: RecordStore>(store: &S) -> Result<(), StorageError> {
///     let created = store
///         .create(NewApplication::new("ada", "ada@example.com"))
///         .await?;
///
///     let read = store.find_unique(&created.id).await?;
///     assert!(read.is_some());
///
///     let page = store.find_many(&FindManyArgs::new().with_take(10)).await?;
///     assert_eq!(page.len(), 1);
///
///     store.delete(&created.id).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Creates a record, assigning it a fresh identifier.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(AlreadyExists)` - If the email is already taken
    async fn create(&self, input: NewApplication) -> StorageResult<Application>;

    /// Reads a record by identifier.
    ///
    /// Returns `None` when no record has that identifier.
    async fn find_unique(&self, id: &str) -> StorageResult<Option<Application>>;

    /// Returns the records matching `args.predicate`, ordered by
    /// `args.order_by`, after skipping `args.skip` and keeping at most
    /// `args.take`.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation` - If a predicate or ordering names an
    ///   unknown field, or an ordering carries an unknown direction
    async fn find_many(&self, args: &FindManyArgs) -> StorageResult<Vec<Application>>;

    /// Counts the records matching `args.predicate`, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Same as [`find_many`](RecordStore::find_many).
    async fn count(&self, args: &CountArgs) -> StorageResult<u64>;

    /// Applies a partial update to a record.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If no record has that identifier
    /// * `StorageError::Resource(AlreadyExists)` - If the new email is taken
    async fn update(&self, id: &str, changes: ApplicationUpdate) -> StorageResult<Application>;

    /// Permanently removes a record.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If no record has that identifier
    async fn delete(&self, id: &str) -> StorageResult<()>;
}
