//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: DB and cache (public)
//! - `/api/*`            - Publication and rubric REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Metrics** - Per-route request counter and latency histogram
//! - **Rate limiting** - Per-IP token bucket on the API
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateLimit};
use crate::api::middleware::{metrics, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limits for `/api/*`; `None` disables limiting
pub fn app_router(state: AppState, rate_limit: Option<RateLimit>) -> NormalizePath<Router> {
    let mut api_router =
        api::routes::entity_routes().route_layer(middleware::from_fn(metrics::track));

    if let Some(limit) = rate_limit {
        api_router = api_router.layer(rate_limit::layer(limit));
    }

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
