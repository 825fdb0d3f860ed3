//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Request extractors and response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting, metrics, and tracing middleware
//! - [`response`] - Alert and pagination headers for entity responses
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
