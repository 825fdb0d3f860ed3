//! Entity cache for single-entity reads.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for testing/disabled caching
//!
//! Entries hold the JSON rendering of an entity and are invalidated whenever
//! the entity (or a rubric it embeds) changes.

mod keys;
mod null_cache;
mod redis_cache;
mod service;

pub use keys::{publication_key, rubric_key};
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService, get_json, set_json};
