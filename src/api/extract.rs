//! Request extractors whose rejections use the crate's JSON error body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::ApiError;

/// JSON request body. Malformed or incomplete bodies become 400 `validation`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
