//! ContentRelation — a pure join row: "this software was evaluated against
//! this indicator within this dimension".
//!
//! All three references are mandatory and restrict deletion of the rows they
//! point at.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContentRelation {
  pub indicator_id: i64,
  pub dimension_id: i64,
  pub software_id:  i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRelation {
  pub id:   i64,
  #[serde(flatten)]
  pub data: NewContentRelation,
}
