//! Handlers for `/dimensions`, `/software` and `/content-relations`.
//!
//! Dimensions and software are validated like any other inbound document.
//! Content relations are plain id triples; the store rejects ids that do not
//! exist.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use everse_core::{
  dimension::Dimension,
  relation::{ContentRelation, NewContentRelation},
  software::Software,
  store::EverseStore,
};
use everse_jsonld::{validate_dimension, validate_software};
use serde_json::Value;

use crate::{error::ApiError, extract::JsonBody};

fn deleted(found: bool, what: &str, id: i64) -> Result<StatusCode, ApiError> {
  if found {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("{what} {id} not found")))
  }
}

// ─── Dimensions ───────────────────────────────────────────────────────────────

/// `GET /dimensions`
pub async fn list_dimensions<S: EverseStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Dimension>>, ApiError> {
  Ok(Json(store.list_dimensions().await.map_err(ApiError::store)?))
}

/// `POST /dimensions`
pub async fn create_dimension<S: EverseStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, ApiError> {
  let input = validate_dimension(&body)?;
  let dimension = store.add_dimension(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(dimension)))
}

/// `DELETE /dimensions/{id}`
pub async fn delete_dimension<S: EverseStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  let found = store.delete_dimension(id).await.map_err(ApiError::store)?;
  deleted(found, "dimension", id)
}

// ─── Software ─────────────────────────────────────────────────────────────────

/// `GET /software`
pub async fn list_software<S: EverseStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Software>>, ApiError> {
  Ok(Json(store.list_software().await.map_err(ApiError::store)?))
}

/// `POST /software`
pub async fn create_software<S: EverseStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, ApiError> {
  let input = validate_software(&body)?;
  let software = store.add_software(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(software)))
}

/// `DELETE /software/{id}`
pub async fn delete_software<S: EverseStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  let found = store.delete_software(id).await.map_err(ApiError::store)?;
  deleted(found, "software", id)
}

// ─── Content relations ────────────────────────────────────────────────────────

/// `GET /content-relations`
pub async fn list_relations<S: EverseStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ContentRelation>>, ApiError> {
  Ok(Json(
    store
      .list_content_relations()
      .await
      .map_err(ApiError::store)?,
  ))
}

/// `POST /content-relations` — body:
/// `{"indicator_id":1,"dimension_id":1,"software_id":1}`
pub async fn create_relation<S: EverseStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewContentRelation>,
) -> Result<impl IntoResponse, ApiError> {
  let relation = store
    .add_content_relation(body)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(relation)))
}

/// `DELETE /content-relations/{id}`
pub async fn delete_relation<S: EverseStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  let found = store
    .delete_content_relation(id)
    .await
    .map_err(ApiError::store)?;
  deleted(found, "content relation", id)
}
