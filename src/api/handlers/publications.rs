//! Handlers for publication endpoints.

use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use validator::Validate;

use crate::api::dto::json::ApiJson;
use crate::api::dto::pagination::PublicationQueryParams;
use crate::api::response;
use crate::application::services::Saved;
use crate::domain::entities::Publication;
use crate::domain::page::PublicationSort;
use crate::domain::repositories::PublicationFilter;
use crate::error::AppError;
use crate::infrastructure::cache::{get_json, publication_key, set_json};
use crate::state::AppState;

const ENTITY_NAME: &str = "publication";
const COLLECTION_PATH: &str = "/api/publications";

/// Creates a new publication.
///
/// # Endpoint
///
/// `POST /api/publications`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Hello",
///   "text": "World",
///   "publicationDate": "2026-01-01T00:00:00Z",  // optional, defaults to now
///   "author": { "id": 1 },
///   "rubrics": [{ "id": 2 }]                    // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if the body carries an `id` (`idexists`), a required field is
/// missing or too short, or the author / a rubric does not exist.
pub async fn create_publication_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Publication>,
) -> Result<Response, AppError> {
    tracing::debug!(title = %payload.title, "REST request to save Publication");
    payload.validate()?;

    let created = state.publication_service.create(payload).await?;
    let id = response::persisted_id(ENTITY_NAME, created.id)?;

    Ok(response::created(ENTITY_NAME, COLLECTION_PATH, id, created))
}

/// Updates an existing publication.
///
/// # Endpoint
///
/// `PUT /api/publications`
///
/// A body without `id` is handled as a creation and answered with 201.
/// The rubric set is replaced by the one in the body.
///
/// # Errors
///
/// Returns 400 if validation fails.
/// Returns 404 if no publication has the given id.
pub async fn update_publication_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Publication>,
) -> Result<Response, AppError> {
    tracing::debug!(id = ?payload.id, "REST request to update Publication");
    payload.validate()?;

    match state.publication_service.update(payload).await? {
        Saved::Created(created) => {
            let id = response::persisted_id(ENTITY_NAME, created.id)?;
            Ok(response::created(ENTITY_NAME, COLLECTION_PATH, id, created))
        }
        Saved::Updated(updated) => {
            let id = response::persisted_id(ENTITY_NAME, updated.id)?;
            response::invalidate(state.cache.as_ref(), &publication_key(id)).await;
            Ok(response::updated(ENTITY_NAME, id, updated))
        }
    }
}

/// Lists publications page by page.
///
/// # Endpoint
///
/// `GET /api/publications`
///
/// # Query Parameters
///
/// - `page` (optional): Zero-based page number (default: 0)
/// - `size` (optional): Items per page (default: `DEFAULT_PAGE_SIZE`, max: 2000)
/// - `sort` (optional): `id`, `title` or `publicationDate`, with `,asc` / `,desc`
/// - `author` (optional): Only publications by this author login
///
/// # Response
///
/// JSON array of publications; the total count is in `X-Total-Count`.
pub async fn list_publications_handler(
    State(state): State<AppState>,
    Query(params): Query<PublicationQueryParams>,
) -> Result<Response, AppError> {
    tracing::debug!("REST request to get a page of Publications");

    let request = params
        .pagination
        .to_page_request::<PublicationSort>(state.default_page_size)?;
    let filter = PublicationFilter {
        author_login: params.author,
    };

    let page = state.publication_service.list(request, filter).await?;

    Ok(response::page(page.items, page.total))
}

/// Retrieves one publication with its author and rubrics.
///
/// # Endpoint
///
/// `GET /api/publications/{id}`
///
/// # Errors
///
/// Returns 404 if the publication does not exist.
pub async fn get_publication_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<axum::Json<Publication>, AppError> {
    tracing::debug!(id, "REST request to get Publication");

    let key = publication_key(id);
    if let Some(cached) = get_json::<Publication>(state.cache.as_ref(), &key).await {
        return Ok(axum::Json(cached));
    }

    let publication = state.publication_service.get(id).await?;
    set_json(state.cache.as_ref(), &key, &publication).await;

    Ok(axum::Json(publication))
}

/// Deletes a publication.
///
/// # Endpoint
///
/// `DELETE /api/publications/{id}`
///
/// # Errors
///
/// Returns 404 if the publication does not exist.
pub async fn delete_publication_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    tracing::debug!(id, "REST request to delete Publication");

    state.publication_service.delete(id).await?;
    response::invalidate(state.cache.as_ref(), &publication_key(id)).await;

    Ok(response::deleted(ENTITY_NAME, id))
}
