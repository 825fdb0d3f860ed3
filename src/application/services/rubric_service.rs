//! Rubric management service.

use crate::application::services::Saved;
use crate::domain::entities::Rubric;
use crate::domain::page::{Page, PageRequest, RubricSort};
use crate::domain::repositories::RubricRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

const ENTITY_NAME: &str = "rubric";

/// Service for managing rubrics.
pub struct RubricService<R: RubricRepository> {
    repository: Arc<R>,
}

impl<R: RubricRepository> RubricService<R> {
    /// Creates a new rubric service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Stores a new rubric.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequestAlert`] if the rubric already carries an id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(&self, rubric: Rubric) -> Result<Rubric, AppError> {
        if !rubric.is_new() {
            return Err(AppError::id_exists(ENTITY_NAME));
        }

        self.repository.insert(rubric).await
    }

    /// Updates a rubric, or creates it when it has no id yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id does not exist.
    pub async fn update(&self, rubric: Rubric) -> Result<Saved<Rubric>, AppError> {
        let Some(id) = rubric.id else {
            return self.create(rubric).await.map(Saved::Created);
        };

        self.repository
            .update(rubric)
            .await?
            .map(Saved::Updated)
            .ok_or_else(|| AppError::not_found("Rubric not found", json!({ "id": id })))
    }

    /// Retrieves a rubric by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the rubric does not exist.
    pub async fn get(&self, id: i64) -> Result<Rubric, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Rubric not found", json!({ "id": id })))
    }

    pub async fn list(&self, request: PageRequest<RubricSort>) -> Result<Page<Rubric>, AppError> {
        self.repository.find_page(request).await
    }

    /// Deletes a rubric.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the rubric does not exist.
    /// Returns [`AppError::Conflict`] if publications still reference it.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found(
                "Rubric not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
