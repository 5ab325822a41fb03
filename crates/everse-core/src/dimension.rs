//! Dimension — a grouping category under which indicators and software are
//! related.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDimension {
  pub identifier:  String,
  pub name:        String,
  pub description: String,
  /// Ordered; duplicates are kept.
  pub source:      Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
  pub id:   i64,
  #[serde(flatten)]
  pub data: NewDimension,
}
