//! Router tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use everse_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store))
}

async fn send(
  app: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app
    .clone()
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

fn document() -> Value {
  json!({
    "@context": "https://w3id.org/everse/rsqa/0.0.1/",
    "@type": "SoftwareQualityAssessment",
    "name": "Quality Assessment #1",
    "description": "Automated checks.",
    "creator": { "name": "Ada Lovelace" },
    "dateCreated": "2024-05-01T12:00:00Z",
    "license": { "@id": "https://creativecommons.org/publicdomain/zero/1.0/" },
    "assessedSoftware": {
      "name": "analytical-engine",
      "schema:identifier": { "@id": "https://doi.org/10.1234/abcde" },
    },
    "checks": {
      "assessesIndicator": {
        "@id": "https://w3id.org/everse/i/indicators/license",
      },
      "checkingSoftware": { "name": "howfairis" },
      "status": { "@id": "schema:CompletedActionStatus" },
    },
  })
}

fn indicator(identifier: &str) -> Value {
  json!({
    "identifier": identifier,
    "name": "Software has a license",
    "description": "The repository declares a license.",
    "keywords": "keyword1",
    "status": "active",
    "version": "1.0",
    "doi": "10.1234/abcde",
  })
}

// ─── Assessments ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn ingest_returns_summary() {
  let app = app().await;
  let (status, summary) =
    send(&app, "POST", "/assessments", Some(document())).await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(summary["id"], 1);
  assert_eq!(summary["creatorNames"], "Ada Lovelace");
  assert_eq!(summary["checkCount"], 1);
  assert_eq!(summary["softwareName"], "analytical-engine");

  let (status, list) = send(&app, "GET", "/assessments", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list.as_array().unwrap().len(), 1);

  let (status, one) = send(&app, "GET", "/assessments/1/summary", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(one, summary);
}

#[tokio::test]
async fn check_list_with_bare_status() {
  let app = app().await;
  let mut doc = document();
  doc["checks"] = json!([{
    "assessesIndicator": "https://w3id.org/everse/i/indicators/license",
    "checkingSoftware": { "name": "howfairis" },
    "status": "CompletedActionStatus",
    "output": "true",
  }]);

  let (status, summary) = send(&app, "POST", "/assessments", Some(doc)).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(summary["creatorNames"], "Ada Lovelace");
  assert_eq!(summary["checkCount"], 1);
}

#[tokio::test]
async fn export_reproduces_the_document() {
  let app = app().await;
  send(&app, "POST", "/assessments", Some(document())).await;

  let (status, doc) = send(&app, "GET", "/assessments/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(doc["@context"], "https://w3id.org/everse/rsqa/0.0.1/");
  assert_eq!(doc["creator"][0]["name"], "Ada Lovelace");
  assert_eq!(
    doc["checks"][0]["assessesIndicator"]["@id"],
    "https://w3id.org/everse/i/indicators/license"
  );

  // The export is itself a valid inbound document.
  let (status, _) = send(&app, "POST", "/assessments", Some(doc)).await;
  assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn invalid_document_is_rejected_with_every_field() {
  let app = app().await;
  let mut doc = document();
  let obj = doc.as_object_mut().unwrap();
  obj.remove("dateCreated");
  obj.insert("license".into(), json!("not a uri"));

  let (status, body) = send(&app, "POST", "/assessments", Some(doc)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(body["stage"], "validation");
  let paths: Vec<_> = body["fields"]
    .as_array()
    .unwrap()
    .iter()
    .map(|f| f["path"].as_str().unwrap().to_owned())
    .collect();
  assert_eq!(paths, ["dateCreated", "license"]);
  assert_eq!(body["fields"][0]["problem"]["kind"], "missing");

  let (_, list) = send(&app, "GET", "/assessments", None).await;
  assert_eq!(list, json!([]));
}

#[tokio::test]
async fn unreadable_body_uses_the_error_shape() {
  let app = app().await;

  let req = Request::builder()
    .method("POST")
    .uri("/assessments")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{ not json"))
    .unwrap();
  let resp = app.clone().oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(body["stage"], "validation");
  assert!(body["error"].as_str().unwrap().starts_with("unreadable body"));

  // No content type at all.
  let (status, body) = send(&app, "POST", "/indicators", None).await;
  assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
  assert_eq!(body["stage"], "validation");

  let (_, list) = send(&app, "GET", "/assessments", None).await;
  assert_eq!(list, json!([]));
}

#[tokio::test]
async fn delete_assessment_then_404() {
  let app = app().await;
  send(&app, "POST", "/assessments", Some(document())).await;

  let (status, _) = send(&app, "DELETE", "/assessments/1", None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (status, body) = send(&app, "GET", "/assessments/1", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].as_str().unwrap().contains("assessment 1"));

  let (status, _) = send(&app, "DELETE", "/assessments/1", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_indicator_is_a_conflict() {
  let app = app().await;
  let (status, created) =
    send(&app, "POST", "/indicators", Some(indicator("IND-001"))).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["keywords"], json!(["keyword1"]));

  let (status, body) =
    send(&app, "POST", "/indicators", Some(indicator("IND-001"))).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["stage"], "persistence");
  assert_eq!(body["constraint"], "unique");
}

#[tokio::test]
async fn deprecate_is_one_way() {
  let app = app().await;
  send(&app, "POST", "/indicators", Some(indicator("IND-001"))).await;

  let (status, body) =
    send(&app, "POST", "/indicators/1/deprecate", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "deprecated");

  let (status, _) = send(&app, "POST", "/indicators/9/deprecate", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn referenced_indicator_cannot_be_deleted() {
  let app = app().await;
  send(&app, "POST", "/indicators", Some(indicator("IND-001"))).await;
  send(
    &app,
    "POST",
    "/dimensions",
    Some(json!({
      "identifier": "DIM-001",
      "name": "Openness",
      "description": "How open the software is.",
    })),
  )
  .await;
  send(
    &app,
    "POST",
    "/software",
    Some(json!({
      "identifier": "SW-001",
      "name": "howfairis",
      "description": "Checks the fair-software recommendations.",
      "url": "https://github.com/fair-software/howfairis",
      "isAccessibleForFree": true,
      "howToUse": "cmdline",
      "license": "Apache-2.0",
    })),
  )
  .await;
  let (status, relation) = send(
    &app,
    "POST",
    "/content-relations",
    Some(json!({ "indicator_id": 1, "dimension_id": 1, "software_id": 1 })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(relation["id"], 1);

  let (status, body) = send(&app, "DELETE", "/indicators/1", None).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["constraint"], "foreign_key");

  let (status, _) = send(&app, "GET", "/indicators/1", None).await;
  assert_eq!(status, StatusCode::OK);

  let (status, _) = send(&app, "DELETE", "/content-relations/1", None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = send(&app, "DELETE", "/indicators/1", None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn invalid_software_lists_fields() {
  let app = app().await;
  let (status, body) = send(
    &app,
    "POST",
    "/software",
    Some(json!({ "identifier": "SW-001", "howToUse": "gui" })),
  )
  .await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(body["fields"].as_array().unwrap().len() >= 5);
}
