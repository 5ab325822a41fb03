//! Software — a catalogued tool or service that can be evaluated against
//! indicators.

use serde::{Deserialize, Serialize};

use crate::vocab::{HowToUse, QualityDimension};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSoftware {
  pub identifier:              String,
  pub name:                    String,
  pub description:             String,
  pub url:                     String,
  pub is_accessible_for_free:  bool,
  pub quality_dimensions:      Vec<QualityDimension>,
  pub how_to_use:              Vec<HowToUse>,
  pub license:                 String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Software {
  pub id:   i64,
  #[serde(flatten)]
  pub data: NewSoftware,
}
