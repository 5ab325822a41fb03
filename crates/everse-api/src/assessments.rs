//! Handlers for `/assessments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/assessments` | Summaries, ordered by id |
//! | `POST`   | `/assessments` | Body: JSON-LD document; 201 + summary |
//! | `GET`    | `/assessments/{id}` | JSON-LD re-export |
//! | `GET`    | `/assessments/{id}/summary` | |
//! | `DELETE` | `/assessments/{id}` | Cascades to owned rows |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use everse_core::{assessment::AssessmentSummary, store::EverseStore};
use everse_jsonld::{
  AssessmentDocument, denormalize, normalize, summarize, validate_assessment,
};
use serde_json::Value;
use tracing::warn;

use crate::{error::ApiError, extract::JsonBody};

fn not_found(id: i64) -> ApiError {
  ApiError::NotFound(format!("assessment {id} not found"))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /assessments`
pub async fn list<S: EverseStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<AssessmentSummary>>, ApiError> {
  let stored = store.list_assessments().await.map_err(ApiError::store)?;
  Ok(Json(stored.iter().map(summarize).collect()))
}

// ─── Ingest ───────────────────────────────────────────────────────────────────

/// `POST /assessments` — validate, normalize and persist in one unit of work.
pub async fn create<S: EverseStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, ApiError> {
  let doc = validate_assessment(&body).inspect_err(|e| {
    warn!(error = %e, "assessment rejected");
  })?;
  let stored = store
    .insert_assessment(normalize(&doc))
    .await
    .inspect_err(|e| warn!(error = %e, "assessment not persisted"))
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(summarize(&stored))))
}

// ─── Read ─────────────────────────────────────────────────────────────────────

/// `GET /assessments/{id}` — the stored rows as a JSON-LD document.
pub async fn export<S: EverseStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<AssessmentDocument>, ApiError> {
  let stored = store
    .get_assessment(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(denormalize(&stored)?))
}

/// `GET /assessments/{id}/summary`
pub async fn summary<S: EverseStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<AssessmentSummary>, ApiError> {
  let stored = store
    .get_assessment(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(summarize(&stored)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /assessments/{id}`
pub async fn delete<S: EverseStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if store.delete_assessment(id).await.map_err(ApiError::store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(not_found(id))
  }
}
