use crate::server::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// `axum::Json` whose rejection renders as [`ApiError::Validation`].
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Query` whose rejection renders as [`ApiError::Validation`].
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);
