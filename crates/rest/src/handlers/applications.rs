//! Application record handlers.
//!
//! Thin adapters between HTTP and [`ApplicationService`]: they own status
//! codes and counters, never query semantics.
//!
//! [`ApplicationService`]: roster_persistence::ApplicationService

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_persistence::{
    ApplicationUpdate, NewApplication, RecordStore, StorageError,
};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::SearchParams;
use crate::state::AppState;

/// Unwraps a JSON body, turning rejections into a 400.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> RestResult<T> {
    body.map(|Json(value)| value).map_err(|e| {
        debug!(error = %e, "Rejected request body");
        RestError::BadRequest {
            message: e.body_text(),
        }
    })
}

/// Handler for creating an application.
///
/// # HTTP Request
///
/// `POST /v1/applications`
///
/// # Response
///
/// - `201 Created` - Returns the created record
/// - `400 Bad Request` - `username` or `email` is missing or blank
/// - `409 Conflict` - The email is already registered
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    body: Result<Json<NewApplication>, JsonRejection>,
) -> RestResult<Response>
where
    S: RecordStore + Send + Sync,
{
    let input = json_body(body)?;
    debug!(username = %input.username, "Processing create request");

    let created = state.service().create(input).await?;
    state.metrics().increment_records_created();

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// Handler for listing every application.
///
/// `GET /v1/applications`
pub async fn find_all_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: RecordStore + Send + Sync,
{
    debug!("Processing list request");

    let applications = state.service().find_all().await?;
    Ok((StatusCode::OK, Json(applications)).into_response())
}

/// Handler for the paginated search.
///
/// # HTTP Request
///
/// `GET /v1/applications/search?page=&limit=&sort=&filter=`
///
/// `sort` and `filter` are URL-encoded JSON.
///
/// # Response
///
/// - `200 OK` - `{applications, page, limit, total, totalPages}`
/// - `400 Bad Request` - `{"statusCode": 400, "message": "Invalid query parameters"}`
///
/// # Example
///
/// ```http
/// GET /v1/applications/search?page=1&limit=10&filter=[{"key":"email","operation":"like","value":"gov"}] HTTP/1.1
/// ```
pub async fn search_handler<S>(
    State(state): State<AppState<S>>,
    params: Result<SearchParams, RestError>,
) -> RestResult<Response>
where
    S: RecordStore + Send + Sync,
{
    let params = params.inspect_err(|_| state.metrics().increment_searches_rejected())?;
    let request = params.into_request();

    debug!(
        page = ?request.page,
        limit = ?request.limit,
        sort = ?request.sort,
        filter = ?request.filter,
        "Processing search request"
    );

    match state.service().search(&request).await {
        Ok(page) => {
            state.metrics().increment_searches_executed();
            Ok((StatusCode::OK, Json(page)).into_response())
        }
        Err(e) => {
            if matches!(e, StorageError::Query(_) | StorageError::Validation(_)) {
                state.metrics().increment_searches_rejected();
            }
            Err(e.into())
        }
    }
}

/// Handler for reading one application.
///
/// # Response
///
/// - `200 OK` - The record
/// - `404 Not Found` - `{"statusCode": 404, "message": "Application not found."}`
pub async fn find_one_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: RecordStore + Send + Sync,
{
    debug!(id = %id, "Processing read request");

    match state.service().find_one(&id).await? {
        Some(application) => Ok((StatusCode::OK, Json(application)).into_response()),
        None => Err(RestError::application_not_found()),
    }
}

/// Handler for a partial update.
///
/// `PUT /v1/applications/{id}`; absent fields keep their values.
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Result<Json<ApplicationUpdate>, JsonRejection>,
) -> RestResult<Response>
where
    S: RecordStore + Send + Sync,
{
    let changes = json_body(body)?;
    debug!(id = %id, "Processing update request");

    let updated = state.service().update(&id, changes).await?;
    Ok((StatusCode::OK, Json(updated)).into_response())
}

/// Handler for deleting an application.
///
/// Always answers `200 OK`; the body reports whether the delete happened:
/// `{"deleted": true}` or `{"deleted": false, "message": "..."}`.
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: RecordStore + Send + Sync,
{
    debug!(id = %id, "Processing delete request");

    let outcome = state.service().remove(&id).await;
    if !outcome.deleted {
        state.metrics().increment_deletes_failed();
    }

    (StatusCode::OK, Json(outcome)).into_response()
}
