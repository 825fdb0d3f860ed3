//! Data Transfer Objects for API requests and responses.
//!
//! Entity payloads are the domain entities themselves (see
//! [`crate::domain::entities`]); this module holds the request plumbing
//! around them.

pub mod health;
pub mod json;
pub mod pagination;
