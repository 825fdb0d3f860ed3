//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependency on HTTP or PostgreSQL. Repository traits
//! defined here are implemented by [`crate::infrastructure::persistence`].
//!
//! - [`entities`] - Publication, rubric and author records
//! - [`page`] - Paging and sorting primitives shared by listing queries
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod page;
pub mod repositories;
