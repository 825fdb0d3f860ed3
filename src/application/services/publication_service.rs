//! Publication management service.

use crate::application::services::Saved;
use crate::domain::entities::Publication;
use crate::domain::page::{Page, PageRequest, PublicationSort};
use crate::domain::repositories::{AuthorRepository, PublicationFilter, PublicationRepository};
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

const ENTITY_NAME: &str = "publication";

/// Service for managing publications.
///
/// Before any write it checks that:
/// - the author exists
/// - every attached rubric is a reference to a stored rubric (carries an id)
pub struct PublicationService<P: PublicationRepository, A: AuthorRepository> {
    publications: Arc<P>,
    authors: Arc<A>,
}

impl<P: PublicationRepository, A: AuthorRepository> PublicationService<P, A> {
    /// Creates a new publication service.
    pub fn new(publications: Arc<P>, authors: Arc<A>) -> Self {
        Self {
            publications,
            authors,
        }
    }

    /// Stores a new publication.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequestAlert`] if the publication already carries an id.
    /// Returns [`AppError::Validation`] if the author or a rubric reference is invalid.
    pub async fn create(&self, publication: Publication) -> Result<Publication, AppError> {
        if !publication.is_new() {
            return Err(AppError::id_exists(ENTITY_NAME));
        }

        self.check_references(&publication).await?;

        self.publications.insert(publication).await
    }

    /// Updates a publication, or creates it when it has no id yet.
    ///
    /// The rubric set is replaced by the one in `publication`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id does not exist.
    /// Returns [`AppError::Validation`] if the author or a rubric reference is invalid.
    pub async fn update(&self, publication: Publication) -> Result<Saved<Publication>, AppError> {
        let Some(id) = publication.id else {
            return self.create(publication).await.map(Saved::Created);
        };

        self.check_references(&publication).await?;

        self.publications
            .update(publication)
            .await?
            .map(Saved::Updated)
            .ok_or_else(|| AppError::not_found("Publication not found", json!({ "id": id })))
    }

    /// Retrieves a publication with its author and rubrics.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the publication does not exist.
    pub async fn get(&self, id: i64) -> Result<Publication, AppError> {
        self.publications
            .find_by_id_with_rubrics(id)
            .await?
            .ok_or_else(|| AppError::not_found("Publication not found", json!({ "id": id })))
    }

    pub async fn list(
        &self,
        request: PageRequest<PublicationSort>,
        filter: PublicationFilter,
    ) -> Result<Page<Publication>, AppError> {
        self.publications.find_page(request, filter).await
    }

    /// Every publication, eagerly loaded. Intended for small exports.
    pub async fn list_all_with_rubrics(&self) -> Result<Vec<Publication>, AppError> {
        self.publications.find_all_with_rubrics().await
    }

    /// Ids of publications filed under `rubric_id`.
    pub async fn ids_with_rubric(&self, rubric_id: i64) -> Result<Vec<i64>, AppError> {
        self.publications.find_ids_by_rubric(rubric_id).await
    }

    /// Deletes a publication and its rubric links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the publication does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.publications.delete(id).await? {
            return Err(AppError::not_found(
                "Publication not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.publications.count().await
    }

    async fn check_references(&self, publication: &Publication) -> Result<(), AppError> {
        if publication.rubrics.iter().any(|r| r.is_new()) {
            return Err(AppError::bad_request(
                "Rubrics must reference stored rubrics by id",
                json!({ "field": "rubrics" }),
            ));
        }

        let author_id = publication.author.id;
        if self.authors.find_by_id(author_id).await?.is_none() {
            return Err(AppError::bad_request(
                "Author not found",
                json!({ "author_id": author_id }),
            ));
        }

        Ok(())
    }
}
