//! Request extractors that reject with `ApiError`
//!
//! Thin wrappers over axum's `Json`, `Path` and `Query` so malformed bodies,
//! path segments and query strings answer with the same `{code, message}`
//! body as every other error.

use axum::extract::{FromRequest, FromRequestParts};
use crate::handlers::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
