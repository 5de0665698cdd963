//! Application service.
//!
//! [`ApplicationService`] is the single entry point the HTTP layer uses for
//! application records. It owns a handle to a [`RecordStore`] and the page
//! limits applied to searches.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::RecordStore;
use crate::error::StorageResult;
use crate::query::{self, PageLimits, SearchPage, SearchRequest};
use crate::types::{
    Application, ApplicationUpdate, FieldFilter, FindManyArgs, NewApplication, Scalar, WhereClause,
};

/// Result of a delete request.
///
/// Store failures during delete are reported here rather than as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// Whether the record was removed.
    pub deleted: bool,
    /// The store's error text when nothing was removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeleteOutcome {
    /// A successful delete.
    pub fn deleted() -> Self {
        Self {
            deleted: true,
            message: None,
        }
    }

    /// A failed delete carrying the error text.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            deleted: false,
            message: Some(message.into()),
        }
    }
}

/// CRUD and search operations over application records.
pub struct ApplicationService<S: ?Sized> {
    store: Arc<S>,
    limits: PageLimits,
}

impl<S: ?Sized> Clone for ApplicationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            limits: self.limits,
        }
    }
}

impl<S> ApplicationService<S>
where
    S: RecordStore + ?Sized,
{
    /// Creates a service with the default page limits.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_limits(store, PageLimits::default())
    }

    /// Creates a service with custom page limits.
    pub fn with_limits(store: Arc<S>, limits: PageLimits) -> Self {
        Self { store, limits }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the page limits applied to searches.
    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    /// Creates a record.
    pub async fn create(&self, input: NewApplication) -> StorageResult<Application> {
        input.validate()?;
        let created = self.store.create(input).await?;
        debug!(id = %created.id, "Created application");
        Ok(created)
    }

    /// Returns every record.
    pub async fn find_all(&self) -> StorageResult<Vec<Application>> {
        self.store.find_many(&FindManyArgs::new()).await
    }

    /// Returns the record with the given identifier, if any.
    pub async fn find_one(&self, id: &str) -> StorageResult<Option<Application>> {
        self.store.find_unique(id).await
    }

    /// Applies a partial update.
    pub async fn update(&self, id: &str, changes: ApplicationUpdate) -> StorageResult<Application> {
        changes.validate()?;
        self.store.update(id, changes).await
    }

    /// Deletes a record, reporting store failures in the outcome.
    pub async fn remove(&self, id: &str) -> DeleteOutcome {
        match self.store.delete(id).await {
            Ok(()) => {
                debug!(id = %id, "Deleted application");
                DeleteOutcome::deleted()
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Delete failed");
                DeleteOutcome::failed(e.to_string())
            }
        }
    }

    /// Runs a paginated search.
    ///
    /// See [`query::search`] for the consistency caveat.
    pub async fn search(&self, request: &SearchRequest) -> StorageResult<SearchPage> {
        query::search(self.store.as_ref(), request, self.limits).await
    }

    /// Counts every record.
    pub async fn count(&self) -> StorageResult<u64> {
        self.store.count(&Default::default()).await
    }

    /// Creates the record unless one with the same email already exists.
    ///
    /// Returns the existing or newly created record.
    pub async fn ensure(&self, input: NewApplication) -> StorageResult<Application> {
        input.validate()?;

        let mut predicate = WhereClause::new();
        predicate.insert(
            "email",
            FieldFilter::Equals(Some(Scalar::from(input.email.as_str()))),
        );
        let args = FindManyArgs::new().with_take(1).with_predicate(predicate);

        if let Some(existing) = self.store.find_many(&args).await?.into_iter().next() {
            debug!(id = %existing.id, "Application already present");
            return Ok(existing);
        }

        let created = self.store.create(input).await?;
        info!(id = %created.id, email = %created.email, "Seeded application");
        Ok(created)
    }
}
