//! JSON body extractor with API-style rejections.

use axum::extract::FromRequest;

use crate::error::AppError;

/// Like [`axum::Json`], but malformed bodies and missing required fields are
/// reported as `400` [`AppError::Validation`] instead of axum's plain-text 4xx.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
