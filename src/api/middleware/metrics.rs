//! Request timing middleware.
//!
//! Records one counter and one latency histogram per matched route through the
//! [`metrics`] facade. Nothing is exported unless the binary installs a
//! recorder, in which case every REST operation is timed.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION: &str = "http_request_duration_seconds";

/// Times the request and records it under its route template.
///
/// Must be installed with `route_layer` so [`MatchedPath`] is available.
///
/// # Example
///
/// ```rust,ignore
/// let api = Router::new()
///     .route("/rubrics", get(list_rubrics_handler))
///     .route_layer(axum::middleware::from_fn(metrics::track));
/// ```
pub async fn track(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let method = req.method().to_string();

    let response = next.run(req).await;

    let elapsed = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    tracing::trace!(%method, %path, %status, elapsed, "Request timed");

    metrics::counter!(
        REQUESTS_TOTAL,
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!(REQUEST_DURATION, "method" => method, "path" => path).record(elapsed);

    response
}
