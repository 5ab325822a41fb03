//! Indicator — a named software-quality criterion that assessments check
//! against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vocab::{Keyword, QualityDimension, Status};

/// Input to [`crate::store::EverseStore::add_indicator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIndicator {
  /// Externally assigned code; unique within the `indicators` table.
  pub identifier:         String,
  pub name:               String,
  pub description:        String,
  pub keywords:           Vec<Keyword>,
  pub status:             Status,
  pub quality_dimensions: Vec<QualityDimension>,
  pub release_date:       Option<DateTime<Utc>>,
  pub version:            String,
  pub doi:                String,
}

/// A persisted indicator row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
  pub id:   i64,
  #[serde(flatten)]
  pub data: NewIndicator,
}
