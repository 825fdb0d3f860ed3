//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; PostgreSQL implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! with `mockall` for unit tests.
//!
//! - [`PublicationRepository`] - Publications with their author and rubrics
//! - [`RubricRepository`] - Rubric CRUD
//! - [`AuthorRepository`] - Author lookup and registration
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod author_repository;
pub mod publication_repository;
pub mod rubric_repository;

pub use author_repository::AuthorRepository;
pub use publication_repository::{PublicationFilter, PublicationRepository};
pub use rubric_repository::RubricRepository;

#[cfg(test)]
pub use author_repository::MockAuthorRepository;
#[cfg(test)]
pub use publication_repository::MockPublicationRepository;
#[cfg(test)]
pub use rubric_repository::MockRubricRepository;
