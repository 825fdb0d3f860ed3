//! Response helpers shared by entity handlers.
//!
//! Successful writes carry an alert header naming the event
//! (`publicationsApp.rubric.created`) and a params header with the entity id,
//! so clients can show notifications without parsing the body.

use axum::{
    Json,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

pub const ALERT_HEADER: HeaderName = HeaderName::from_static("x-publications-alert");
pub const PARAMS_HEADER: HeaderName = HeaderName::from_static("x-publications-params");
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

const APP_NAME: &str = "publicationsApp";

/// Lifecycle event reported in the alert header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityEvent {
    Created,
    Updated,
    Deleted,
}

impl EntityEvent {
    fn as_str(&self) -> &'static str {
        match self {
            EntityEvent::Created => "created",
            EntityEvent::Updated => "updated",
            EntityEvent::Deleted => "deleted",
        }
    }
}

/// Builds the alert headers for an entity event.
pub fn alert_headers(entity_name: &str, event: EntityEvent, id: i64) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Ok(alert) = HeaderValue::try_from(format!("{APP_NAME}.{entity_name}.{}", event.as_str()))
    {
        headers.insert(ALERT_HEADER, alert);
    }
    headers.insert(PARAMS_HEADER, HeaderValue::from(id));

    headers
}

/// Unwraps the id of an entity that was just persisted.
pub fn persisted_id(entity_name: &str, id: Option<i64>) -> Result<i64, AppError> {
    id.ok_or_else(|| {
        AppError::internal(
            "Persisted entity has no id",
            json!({ "entity": entity_name }),
        )
    })
}

/// `201 Created` with `Location`, alert headers and the entity as body.
pub fn created<T: Serialize>(
    entity_name: &str,
    collection_path: &str,
    id: i64,
    body: T,
) -> Response {
    let mut headers = alert_headers(entity_name, EntityEvent::Created, id);
    if let Ok(location) = HeaderValue::try_from(format!("{collection_path}/{id}")) {
        headers.insert(LOCATION, location);
    }

    (StatusCode::CREATED, headers, Json(body)).into_response()
}

/// `200 OK` with update alert headers and the entity as body.
pub fn updated<T: Serialize>(entity_name: &str, id: i64, body: T) -> Response {
    (
        StatusCode::OK,
        alert_headers(entity_name, EntityEvent::Updated, id),
        Json(body),
    )
        .into_response()
}

/// `200 OK` with deletion alert headers and an empty body.
pub fn deleted(entity_name: &str, id: i64) -> Response {
    (
        StatusCode::OK,
        alert_headers(entity_name, EntityEvent::Deleted, id),
    )
        .into_response()
}

/// `200 OK` with the page items as a JSON array and the total in `X-Total-Count`.
pub fn page<T: Serialize>(items: Vec<T>, total: i64) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));

    (StatusCode::OK, headers, Json(items)).into_response()
}

/// Drops a cache entry, logging instead of failing the request.
pub async fn invalidate(cache: &dyn CacheService, key: &str) {
    if let Err(e) = cache.invalidate(key).await {
        tracing::warn!(error = ?e, key, "Failed to invalidate cache");
    }
}
