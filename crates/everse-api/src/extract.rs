//! Request-body extractor whose rejection is an [`ApiError`].

use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json`, except an unreadable body answers with the API error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
