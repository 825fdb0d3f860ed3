//! Business logic services for the application layer.

pub mod author_service;
pub mod publication_service;
pub mod rubric_service;

pub use author_service::AuthorService;
pub use publication_service::PublicationService;
pub use rubric_service::RubricService;

/// Outcome of a save that may either create or update.
///
/// An update request without an identifier is treated as a creation, and the
/// caller needs to know which one happened to answer 201 or 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved<T> {
    Created(T),
    Updated(T),
}

impl<T> Saved<T> {
    pub fn into_inner(self) -> T {
        match self {
            Saved::Created(value) | Saved::Updated(value) => value,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Saved::Created(_))
    }
}
