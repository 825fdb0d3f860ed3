//! API route configuration.

use crate::api::handlers::{
    create_publication_handler, create_rubric_handler, delete_publication_handler,
    delete_rubric_handler, get_publication_handler, get_rubric_handler,
    list_publications_handler, list_rubrics_handler, update_publication_handler,
    update_rubric_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All entity routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /publications`       - Create a publication
/// - `PUT    /publications`       - Update a publication (creates when no id)
/// - `GET    /publications`       - List publications (paginated)
/// - `GET    /publications/{id}`  - Get a publication with author and rubrics
/// - `DELETE /publications/{id}`  - Delete a publication
/// - `POST   /rubrics`            - Create a rubric
/// - `PUT    /rubrics`            - Update a rubric (creates when no id)
/// - `GET    /rubrics`            - List rubrics (paginated)
/// - `GET    /rubrics/{id}`       - Get a rubric
/// - `DELETE /rubrics/{id}`       - Delete a rubric
pub fn entity_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/publications",
            post(create_publication_handler)
                .put(update_publication_handler)
                .get(list_publications_handler),
        )
        .route(
            "/publications/{id}",
            get(get_publication_handler).delete(delete_publication_handler),
        )
        .route(
            "/rubrics",
            post(create_rubric_handler)
                .put(update_rubric_handler)
                .get(list_rubrics_handler),
        )
        .route(
            "/rubrics/{id}",
            get(get_rubric_handler).delete(delete_rubric_handler),
        )
}
