//! The `EverseStore` trait — the persistence boundary.
//!
//! The trait is implemented by storage backends (e.g. `everse-store-sqlite`).
//! Higher layers (`everse-api`, `everse-cli`) depend on this abstraction, not
//! on any concrete backend.
//!
//! What every backend must guarantee:
//!
//! - schema creation is idempotent;
//! - an assessment and all of its owned rows commit atomically;
//! - deleting an assessment cascades to its creators, software and checks;
//! - content relations restrict deletion of the rows they reference;
//! - `identifier` columns and the assessment-software owner are unique.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  assessment::{NewAssessment, StoredAssessment},
  dimension::{Dimension, NewDimension},
  indicator::{Indicator, NewIndicator},
  relation::{ContentRelation, NewContentRelation},
  software::{NewSoftware, Software},
  vocab::Status,
};

// ─── Error classification ────────────────────────────────────────────────────

/// Backend-independent classification of a store failure, so callers can
/// report which stage failed without knowing the backend's error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
  /// A uniqueness, foreign-key, restrict or trigger rule rejected the write.
  Constraint,
  /// The engine is unreachable or the schema is absent.
  Connectivity,
  /// The referenced row does not exist.
  NotFound,
  /// Anything else (decoding failures, engine bugs).
  Internal,
}

pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> StoreErrorKind;

  /// Name of the violated rule (`unique`, `foreign_key`, ...) when
  /// [`kind`](Self::kind) is [`StoreErrorKind::Constraint`].
  fn constraint(&self) -> Option<&'static str> { None }
}

// ─── Introspection ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
  pub name:     String,
  /// Declared column type as reported by the engine.
  pub sql_type: String,
  pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
  pub name:    String,
  pub columns: Vec<ColumnInfo>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an EVERSE store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait EverseStore: Send + Sync {
  type Error: StoreError;

  // ── Schema ────────────────────────────────────────────────────────────

  /// Create the schema and all tables if they do not exist yet. Calling it
  /// again is a no-op.
  fn ensure_schema(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Tables of the schema with their columns, sorted by table name.
  fn describe_tables(
    &self,
  ) -> impl Future<Output = Result<Vec<TableInfo>, Self::Error>> + Send + '_;

  /// Remove every row from every table and restart identity counters.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Indicators ────────────────────────────────────────────────────────

  fn add_indicator(
    &self,
    input: NewIndicator,
  ) -> impl Future<Output = Result<Indicator, Self::Error>> + Send + '_;

  /// Insert a batch of indicators in one transaction; all or none.
  fn insert_indicators(
    &self,
    inputs: Vec<NewIndicator>,
  ) -> impl Future<Output = Result<Vec<Indicator>, Self::Error>> + Send + '_;

  fn get_indicator(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Indicator>, Self::Error>> + Send + '_;

  fn list_indicators(
    &self,
  ) -> impl Future<Output = Result<Vec<Indicator>, Self::Error>> + Send + '_;

  /// Replace every column of an indicator.
  ///
  /// Fails with a constraint error if the indicator is referenced by a
  /// content relation and anything other than `status` changes, or if the
  /// status would move from `deprecated` back to `active`.
  fn update_indicator(
    &self,
    id: i64,
    input: NewIndicator,
  ) -> impl Future<Output = Result<Indicator, Self::Error>> + Send + '_;

  /// Move an indicator to `status`. Only `active → deprecated` (or a no-op)
  /// is accepted.
  fn set_indicator_status(
    &self,
    id: i64,
    status: Status,
  ) -> impl Future<Output = Result<Indicator, Self::Error>> + Send + '_;

  /// Returns `false` if no such indicator exists. Fails with a constraint
  /// error while a content relation references it.
  fn delete_indicator(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Dimensions ────────────────────────────────────────────────────────

  fn add_dimension(
    &self,
    input: NewDimension,
  ) -> impl Future<Output = Result<Dimension, Self::Error>> + Send + '_;

  /// Insert a batch of dimensions in one transaction; all or none.
  fn insert_dimensions(
    &self,
    inputs: Vec<NewDimension>,
  ) -> impl Future<Output = Result<Vec<Dimension>, Self::Error>> + Send + '_;

  fn get_dimension(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Dimension>, Self::Error>> + Send + '_;

  fn list_dimensions(
    &self,
  ) -> impl Future<Output = Result<Vec<Dimension>, Self::Error>> + Send + '_;

  fn delete_dimension(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Software ──────────────────────────────────────────────────────────

  fn add_software(
    &self,
    input: NewSoftware,
  ) -> impl Future<Output = Result<Software, Self::Error>> + Send + '_;

  /// Insert a batch of software in one transaction; all or none.
  fn insert_software(
    &self,
    inputs: Vec<NewSoftware>,
  ) -> impl Future<Output = Result<Vec<Software>, Self::Error>> + Send + '_;

  fn get_software(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Software>, Self::Error>> + Send + '_;

  fn list_software(
    &self,
  ) -> impl Future<Output = Result<Vec<Software>, Self::Error>> + Send + '_;

  fn delete_software(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Content relations ─────────────────────────────────────────────────

  fn add_content_relation(
    &self,
    input: NewContentRelation,
  ) -> impl Future<Output = Result<ContentRelation, Self::Error>> + Send + '_;

  /// Insert a batch of content relations in one transaction; all or none.
  fn insert_content_relations(
    &self,
    inputs: Vec<NewContentRelation>,
  ) -> impl Future<Output = Result<Vec<ContentRelation>, Self::Error>> + Send + '_;

  fn list_content_relations(
    &self,
  ) -> impl Future<Output = Result<Vec<ContentRelation>, Self::Error>> + Send + '_;

  fn delete_content_relation(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Assessments ───────────────────────────────────────────────────────

  /// Persist an assessment and all of its owned rows in one transaction.
  /// Either every row is written or none is.
  fn insert_assessment(
    &self,
    input: NewAssessment,
  ) -> impl Future<Output = Result<StoredAssessment, Self::Error>> + Send + '_;

  fn get_assessment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<StoredAssessment>, Self::Error>> + Send + '_;

  /// All assessments with their owned rows, ordered by id.
  fn list_assessments(
    &self,
  ) -> impl Future<Output = Result<Vec<StoredAssessment>, Self::Error>> + Send + '_;

  /// Delete an assessment; its owned rows go with it. Returns `false` if no
  /// such assessment exists.
  fn delete_assessment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
