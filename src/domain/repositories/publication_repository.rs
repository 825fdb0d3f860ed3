//! Repository trait for publications.

use crate::domain::entities::Publication;
use crate::domain::page::{Page, PageRequest, PublicationSort};
use crate::error::AppError;
use async_trait::async_trait;

/// Optional restrictions applied to publication listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationFilter {
    /// Only publications written by the author with this login.
    pub author_login: Option<String>,
}

impl PublicationFilter {
    pub fn by_author(login: impl Into<String>) -> Self {
        Self {
            author_login: Some(login.into()),
        }
    }
}

/// Repository interface for publications.
///
/// Every returned [`Publication`] carries its author and its rubrics. How the
/// rubrics are loaded differs: [`find_by_id_with_rubrics`] joins them in the
/// same query, [`find_page`] loads them for the whole page in one follow-up
/// query.
///
/// [`find_by_id_with_rubrics`]: PublicationRepository::find_by_id_with_rubrics
/// [`find_page`]: PublicationRepository::find_page
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPublicationRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicationRepository: Send + Sync {
    /// Stores a new publication together with its rubric links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the author or a rubric does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, publication: Publication) -> Result<Publication, AppError>;

    /// Overwrites an existing publication and replaces its rubric links.
    ///
    /// Returns `Ok(None)` when no publication has the given id.
    async fn update(&self, publication: Publication) -> Result<Option<Publication>, AppError>;

    /// Loads one publication with author and rubrics in a single query.
    async fn find_by_id_with_rubrics(&self, id: i64) -> Result<Option<Publication>, AppError>;

    /// Returns one page of publications matching `filter`.
    async fn find_page(
        &self,
        request: PageRequest<PublicationSort>,
        filter: PublicationFilter,
    ) -> Result<Page<Publication>, AppError>;

    /// Loads every publication with author and rubrics in a single query.
    async fn find_all_with_rubrics(&self) -> Result<Vec<Publication>, AppError>;

    /// Ids of the publications filed under a rubric.
    async fn find_ids_by_rubric(&self, rubric_id: i64) -> Result<Vec<i64>, AppError>;

    /// Deletes a publication and its rubric links. Returns `false` when nothing was deleted.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
