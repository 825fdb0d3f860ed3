//! Handlers for rubric endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use validator::Validate;

use crate::api::dto::json::ApiJson;
use crate::api::dto::pagination::PageParams;
use crate::api::response;
use crate::application::services::Saved;
use crate::domain::entities::Rubric;
use crate::domain::page::RubricSort;
use crate::error::AppError;
use crate::infrastructure::cache::{get_json, publication_key, rubric_key, set_json};
use crate::state::AppState;

const ENTITY_NAME: &str = "rubric";
const COLLECTION_PATH: &str = "/api/rubrics";

/// Creates a new rubric.
///
/// # Endpoint
///
/// `POST /api/rubrics`
///
/// # Errors
///
/// Returns 400 if the body carries an `id` or `name` is shorter than 2 characters.
pub async fn create_rubric_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Rubric>,
) -> Result<Response, AppError> {
    tracing::debug!(name = %payload.name, "REST request to save Rubric");
    payload.validate()?;

    let created = state.rubric_service.create(payload).await?;
    let id = response::persisted_id(ENTITY_NAME, created.id)?;

    Ok(response::created(ENTITY_NAME, COLLECTION_PATH, id, created))
}

/// Updates an existing rubric.
///
/// # Endpoint
///
/// `PUT /api/rubrics`
///
/// A body without `id` is handled as a creation and answered with 201.
///
/// # Cache
///
/// Publications embed their rubrics, so every cached publication filed under
/// this rubric is invalidated along with the rubric itself. Invalidation
/// failures are logged and never fail a committed update.
pub async fn update_rubric_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Rubric>,
) -> Result<Response, AppError> {
    tracing::debug!(id = ?payload.id, "REST request to update Rubric");
    payload.validate()?;

    match state.rubric_service.update(payload).await? {
        Saved::Created(created) => {
            let id = response::persisted_id(ENTITY_NAME, created.id)?;
            Ok(response::created(ENTITY_NAME, COLLECTION_PATH, id, created))
        }
        Saved::Updated(updated) => {
            let id = response::persisted_id(ENTITY_NAME, updated.id)?;

            response::invalidate(state.cache.as_ref(), &rubric_key(id)).await;
            match state.publication_service.ids_with_rubric(id).await {
                Ok(publication_ids) => {
                    for publication_id in publication_ids {
                        response::invalidate(state.cache.as_ref(), &publication_key(publication_id))
                            .await;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, rubric_id = id, "Failed to look up publications to invalidate");
                }
            }

            Ok(response::updated(ENTITY_NAME, id, updated))
        }
    }
}

/// Lists rubrics page by page.
///
/// # Endpoint
///
/// `GET /api/rubrics`
///
/// # Query Parameters
///
/// - `page` (optional): Zero-based page number (default: 0)
/// - `size` (optional): Items per page (default: `DEFAULT_PAGE_SIZE`, max: 2000)
/// - `sort` (optional): `id` or `name`, with `,asc` / `,desc`
pub async fn list_rubrics_handler(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    tracing::debug!("REST request to get a page of Rubrics");

    let request = params.to_page_request::<RubricSort>(state.default_page_size)?;
    let page = state.rubric_service.list(request).await?;

    Ok(response::page(page.items, page.total))
}

/// Retrieves one rubric.
///
/// # Endpoint
///
/// `GET /api/rubrics/{id}`
///
/// # Errors
///
/// Returns 404 if the rubric does not exist.
pub async fn get_rubric_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Rubric>, AppError> {
    tracing::debug!(id, "REST request to get Rubric");

    let key = rubric_key(id);
    if let Some(cached) = get_json::<Rubric>(state.cache.as_ref(), &key).await {
        return Ok(Json(cached));
    }

    let rubric = state.rubric_service.get(id).await?;
    set_json(state.cache.as_ref(), &key, &rubric).await;

    Ok(Json(rubric))
}

/// Deletes a rubric.
///
/// # Endpoint
///
/// `DELETE /api/rubrics/{id}`
///
/// # Errors
///
/// Returns 404 if the rubric does not exist.
/// Returns 409 if publications are still filed under it.
pub async fn delete_rubric_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    tracing::debug!(id, "REST request to delete Rubric");

    state.rubric_service.delete(id).await?;
    response::invalidate(state.cache.as_ref(), &rubric_key(id)).await;

    Ok(response::deleted(ENTITY_NAME, id))
}
