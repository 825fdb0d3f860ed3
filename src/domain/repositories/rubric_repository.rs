//! Repository trait for rubrics.

use crate::domain::entities::Rubric;
use crate::domain::page::{Page, PageRequest, RubricSort};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for rubric persistence.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRubricRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RubricRepository: Send + Sync {
    /// Stores a new rubric and returns it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, rubric: Rubric) -> Result<Rubric, AppError>;

    /// Overwrites an existing rubric.
    ///
    /// Returns `Ok(None)` when no rubric has the given id.
    async fn update(&self, rubric: Rubric) -> Result<Option<Rubric>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Rubric>, AppError>;

    /// Returns one page of rubrics in the requested order.
    async fn find_page(&self, request: PageRequest<RubricSort>) -> Result<Page<Rubric>, AppError>;

    /// Deletes a rubric. Returns `false` when nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if publications still reference the rubric.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
