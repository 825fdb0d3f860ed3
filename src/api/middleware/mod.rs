//! HTTP middleware for request processing and protection.
//!
//! Provides rate limiting, request metrics, and tracing middleware.

pub mod metrics;
pub mod rate_limit;
pub mod tracing;
