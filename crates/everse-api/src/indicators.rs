//! Handlers for `/indicators` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/indicators` | |
//! | `POST`   | `/indicators` | Body: indicator document |
//! | `GET`    | `/indicators/{id}` | 404 if not found |
//! | `POST`   | `/indicators/{id}/deprecate` | One-way status change |
//! | `DELETE` | `/indicators/{id}` | 409 while referenced |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use everse_core::{indicator::Indicator, store::EverseStore, vocab::Status};
use everse_jsonld::validate_indicator;
use serde_json::Value;

use crate::{error::ApiError, extract::JsonBody};

/// `GET /indicators`
pub async fn list<S: EverseStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Indicator>>, ApiError> {
  Ok(Json(store.list_indicators().await.map_err(ApiError::store)?))
}

/// `POST /indicators`
pub async fn create<S: EverseStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, ApiError> {
  let input = validate_indicator(&body)?;
  let indicator = store.add_indicator(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(indicator)))
}

/// `GET /indicators/{id}`
pub async fn get_one<S: EverseStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Indicator>, ApiError> {
  let indicator = store
    .get_indicator(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("indicator {id} not found")))?;
  Ok(Json(indicator))
}

/// `POST /indicators/{id}/deprecate`
pub async fn deprecate<S: EverseStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Indicator>, ApiError> {
  let indicator = store
    .set_indicator_status(id, Status::Deprecated)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(indicator))
}

/// `DELETE /indicators/{id}`
pub async fn delete<S: EverseStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if store.delete_indicator(id).await.map_err(ApiError::store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("indicator {id} not found")))
  }
}
