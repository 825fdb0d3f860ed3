//! Application layer services implementing business rules.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI one place for the create/update disambiguation and reference checks.
//!
//! - [`services::publication_service::PublicationService`] - Publication lifecycle
//! - [`services::rubric_service::RubricService`] - Rubric lifecycle
//! - [`services::author_service::AuthorService`] - Author registration and lookup

pub mod services;
