//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body carries `error` (a message) and, where a pipeline stage
//! failed, `stage` (`validation`, `normalization` or `persistence`).

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use everse_core::store::{StoreError, StoreErrorKind};
use everse_jsonld::ValidationErrors;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unreadable body: {0}")]
  MalformedBody(#[from] JsonRejection),

  #[error("{0}")]
  Validation(ValidationErrors),

  #[error("malformed document: {0}")]
  Normalization(String),

  #[error("store error: {source}")]
  Store {
    kind:       StoreErrorKind,
    constraint: Option<&'static str>,
    #[source]
    source:     Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  pub fn store<E: StoreError>(e: E) -> Self {
    Self::Store {
      kind:       e.kind(),
      constraint: e.constraint(),
      source:     Box::new(e),
    }
  }
}

impl From<everse_jsonld::Error> for ApiError {
  fn from(e: everse_jsonld::Error) -> Self {
    match e {
      everse_jsonld::Error::Validation(errors) => Self::Validation(errors),
      everse_jsonld::Error::MalformedDocument(m) => Self::Normalization(m),
      everse_jsonld::Error::Json(e) => Self::BadRequest(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let message = self.to_string();
    let (status, body) = match self {
      ApiError::NotFound(_) => {
        (StatusCode::NOT_FOUND, json!({ "error": message }))
      }
      ApiError::BadRequest(_) => {
        (StatusCode::BAD_REQUEST, json!({ "error": message }))
      }
      ApiError::MalformedBody(rejection) => (
        rejection.status(),
        json!({ "error": message, "stage": "validation" }),
      ),
      ApiError::Validation(errors) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({
          "error": message,
          "stage": "validation",
          "fields": errors.fields,
        }),
      ),
      ApiError::Normalization(_) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": message, "stage": "normalization" }),
      ),
      ApiError::Store { kind, constraint, .. } => {
        let status = match kind {
          StoreErrorKind::Constraint => StatusCode::CONFLICT,
          StoreErrorKind::Connectivity => StatusCode::SERVICE_UNAVAILABLE,
          StoreErrorKind::NotFound => StatusCode::NOT_FOUND,
          StoreErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let mut body = json!({ "error": message, "stage": "persistence" });
        if let Some(constraint) = constraint {
          body["constraint"] = constraint.into();
        }
        (status, body)
      }
    };
    (status, Json(body)).into_response()
  }
}
