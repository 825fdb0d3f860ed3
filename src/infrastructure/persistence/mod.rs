//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx
//! runtime queries mapped through `FromRow` row structs.
//!
//! - [`PgPublicationRepository`] - Publications with eager and batched rubric loading
//! - [`PgRubricRepository`] - Rubric storage
//! - [`PgAuthorRepository`] - Author storage

pub mod pg_author_repository;
pub mod pg_publication_repository;
pub mod pg_rubric_repository;

pub use pg_author_repository::PgAuthorRepository;
pub use pg_publication_repository::PgPublicationRepository;
pub use pg_rubric_repository::PgRubricRepository;
