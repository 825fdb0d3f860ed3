//! Repository trait for authors.

use crate::domain::entities::{Author, AuthorSummary, NewAuthor};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for authors.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAuthorRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Registers a new author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the login is taken.
    async fn create(&self, new_author: NewAuthor) -> Result<Author, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError>;

    async fn find_by_login(&self, login: &str) -> Result<Option<Author>, AppError>;

    /// Lists all authors with their publication counts, ordered by login.
    async fn list(&self) -> Result<Vec<AuthorSummary>, AppError>;
}
