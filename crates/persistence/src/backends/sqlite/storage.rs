//! RecordStore implementation for SQLite.

use async_trait::async_trait;
use rusqlite::{ErrorCode, ToSql, params, params_from_iter};
use tracing::debug;

use crate::core::RecordStore;
use crate::error::{BackendError, ResourceError, StorageError, StorageResult};
use crate::types::{Application, ApplicationUpdate, CountArgs, FindManyArgs, NewApplication};

use super::SqliteBackend;
use super::query_builder::{self, SqlParam};

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

fn bind(params: &[SqlParam]) -> Vec<Box<dyn ToSql>> {
    params
        .iter()
        .map(|p| -> Box<dyn ToSql> {
            match p {
                SqlParam::String(s) => Box::new(s.clone()),
                SqlParam::Integer(i) => Box::new(*i),
                SqlParam::Float(f) => Box::new(*f),
            }
        })
        .collect()
}

fn row_to_application(row: &rusqlite::Row<'_>) -> rusqlite::Result<Application> {
    Ok(Application {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
    })
}

#[async_trait]
impl RecordStore for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create(&self, input: NewApplication) -> StorageResult<Application> {
        let conn = self.get_connection()?;
        let id = uuid::Uuid::new_v4().to_string();

        conn.execute(
            "INSERT INTO applications (id, username, email) VALUES (?1, ?2, ?3)",
            params![id, input.username, input.email],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                StorageError::Resource(ResourceError::AlreadyExists {
                    field: "email".to_string(),
                    value: input.email.clone(),
                })
            } else {
                internal_error(format!("Failed to insert application: {}", e))
            }
        })?;

        debug!(id = %id, "Inserted application row");

        Ok(Application {
            id,
            username: input.username,
            email: input.email,
        })
    }

    async fn find_unique(&self, id: &str) -> StorageResult<Option<Application>> {
        let conn = self.get_connection()?;

        let result = conn.query_row(
            "SELECT id, username, email FROM applications WHERE id = ?1",
            params![id],
            row_to_application,
        );

        match result {
            Ok(application) => Ok(Some(application)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(internal_error(format!("Failed to read application: {}", e))),
        }
    }

    async fn find_many(&self, args: &FindManyArgs) -> StorageResult<Vec<Application>> {
        let query = query_builder::build_find_many(args)?;
        let conn = self.get_connection()?;

        let mut stmt = conn
            .prepare(&query.sql)
            .map_err(|e| internal_error(format!("Failed to prepare query: {}", e)))?;

        let bound = bind(&query.params);
        let rows = stmt
            .query_map(params_from_iter(bound.iter()), row_to_application)
            .map_err(|e| internal_error(format!("Failed to query applications: {}", e)))?;

        let applications = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| internal_error(format!("Failed to read row: {}", e)))?;

        debug!(sql = %query.sql, rows = applications.len(), "find_many");
        Ok(applications)
    }

    async fn count(&self, args: &CountArgs) -> StorageResult<u64> {
        let query = query_builder::build_count(&args.predicate, &args.order_by)?;
        let conn = self.get_connection()?;

        let bound = bind(&query.params);
        let total: i64 = conn
            .query_row(&query.sql, params_from_iter(bound.iter()), |row| row.get(0))
            .map_err(|e| internal_error(format!("Failed to count applications: {}", e)))?;

        Ok(total.max(0) as u64)
    }

    async fn update(&self, id: &str, changes: ApplicationUpdate) -> StorageResult<Application> {
        if changes.is_empty() {
            return self.find_unique(id).await?.ok_or_else(|| {
                StorageError::Resource(ResourceError::NotFound { id: id.to_string() })
            });
        }

        let conn = self.get_connection()?;

        let rows = conn
            .execute(
                "UPDATE applications
                 SET username = COALESCE(?1, username), email = COALESCE(?2, email)
                 WHERE id = ?3",
                params![changes.username, changes.email, id],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StorageError::Resource(ResourceError::AlreadyExists {
                        field: "email".to_string(),
                        value: changes.email.clone().unwrap_or_default(),
                    })
                } else {
                    internal_error(format!("Failed to update application: {}", e))
                }
            })?;

        if rows == 0 {
            return Err(StorageError::Resource(ResourceError::NotFound {
                id: id.to_string(),
            }));
        }

        conn.query_row(
            "SELECT id, username, email FROM applications WHERE id = ?1",
            params![id],
            row_to_application,
        )
        .map_err(|e| internal_error(format!("Failed to read updated application: {}", e)))
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        let conn = self.get_connection()?;

        let rows = conn
            .execute("DELETE FROM applications WHERE id = ?1", params![id])
            .map_err(|e| internal_error(format!("Failed to delete application: {}", e)))?;

        if rows == 0 {
            return Err(StorageError::Resource(ResourceError::NotFound {
                id: id.to_string(),
            }));
        }

        Ok(())
    }
}
