//! Infrastructure layer for external integrations.
//!
//! - [`cache`] - Entity cache (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod persistence;
