//! Author registration and lookup.

use crate::domain::entities::{Author, AuthorSummary, NewAuthor};
use crate::domain::repositories::AuthorRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// Service for managing authors.
pub struct AuthorService<A: AuthorRepository> {
    repository: Arc<A>,
}

impl<A: AuthorRepository> AuthorService<A> {
    pub fn new(repository: Arc<A>) -> Self {
        Self { repository }
    }

    /// Registers a new author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the login is empty, too long, or
    /// contains whitespace.
    /// Returns [`AppError::Conflict`] if the login is taken.
    pub async fn create(&self, new_author: NewAuthor) -> Result<Author, AppError> {
        new_author.validate()?;

        if new_author.login.chars().any(char::is_whitespace) {
            return Err(AppError::bad_request(
                "Login must not contain whitespace",
                json!({ "login": new_author.login }),
            ));
        }

        if self
            .repository
            .find_by_login(&new_author.login)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "Login already taken",
                json!({ "login": new_author.login }),
            ));
        }

        self.repository.create(new_author).await
    }

    /// Retrieves an author by login.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no author has this login.
    pub async fn get(&self, login: &str) -> Result<Author, AppError> {
        self.repository
            .find_by_login(login)
            .await?
            .ok_or_else(|| AppError::not_found("Author not found", json!({ "login": login })))
    }

    pub async fn list(&self) -> Result<Vec<AuthorSummary>, AppError> {
        self.repository.list().await
    }
}
