//! Assessment aggregate — one evaluation run of a piece of software.
//!
//! An assessment owns its creators, at most one assessed-software record and
//! its check results by composition: the child rows never outlive the parent.
//! Inputs (`New*`) carry no ids; persisted rows carry the store-assigned `id`
//! and the owning `assessment_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Scalar record ───────────────────────────────────────────────────────────

/// The scalar columns of the `assessments` table.
///
/// `context` and `type` are the JSON-LD `@context` / `@type` of the source
/// document, preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
  pub context:      String,
  pub r#type:       String,
  pub name:         String,
  pub description:  String,
  pub date_created: DateTime<Utc>,
  pub license_uri:  String,
}

// ─── Owned children (input) ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCreator {
  pub r#type: Option<String>,
  pub name:   String,
  pub email:  Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssessedSoftware {
  pub r#type:         Option<String>,
  pub name:           String,
  pub version:        Option<String>,
  pub url:            Option<String>,
  pub identifier_uri: Option<String>,
}

/// One check result with its nested `checkingSoftware` flattened into
/// scalar columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCheck {
  pub r#type:                    Option<String>,
  /// Soft by-URI reference to an indicator; not a foreign key.
  pub indicator_uri:             String,
  pub checking_software_type:    Option<String>,
  pub checking_software_name:    String,
  pub checking_software_uri:     Option<String>,
  pub checking_software_version: Option<String>,
  pub process:                   Option<String>,
  pub status_uri:                String,
  pub output:                    Option<String>,
  pub evidence:                  Option<String>,
}

/// The full relational shape of one assessment, ready to be persisted as a
/// single atomic unit by [`crate::store::EverseStore::insert_assessment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssessment {
  #[serde(flatten)]
  pub record:   AssessmentRecord,
  pub creators: Vec<NewCreator>,
  pub software: Option<NewAssessedSoftware>,
  /// Insertion order is kept but carries no meaning.
  pub checks:   Vec<NewCheck>,
}

// ─── Persisted rows ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
  pub id:         i64,
  #[serde(flatten)]
  pub data:       AssessmentRecord,
  /// Store-assigned.
  pub created_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentCreator {
  pub id:            i64,
  pub assessment_id: i64,
  #[serde(flatten)]
  pub data:          NewCreator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSoftware {
  pub id:            i64,
  /// Unique: one assessed-software record per assessment.
  pub assessment_id: i64,
  #[serde(flatten)]
  pub data:          NewAssessedSoftware,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentCheck {
  pub id:            i64,
  pub assessment_id: i64,
  #[serde(flatten)]
  pub data:          NewCheck,
}

/// An assessment read back together with all of its owned rows, children in
/// stored (id) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAssessment {
  pub assessment: Assessment,
  pub creators:   Vec<AssessmentCreator>,
  pub software:   Option<AssessmentSoftware>,
  pub checks:     Vec<AssessmentCheck>,
}

impl StoredAssessment {
  /// Strip ids and bookkeeping timestamps, giving back the relational input
  /// shape.
  pub fn to_new(&self) -> NewAssessment {
    NewAssessment {
      record:   self.assessment.data.clone(),
      creators: self.creators.iter().map(|c| c.data.clone()).collect(),
      software: self.software.as_ref().map(|s| s.data.clone()),
      checks:   self.checks.iter().map(|c| c.data.clone()).collect(),
    }
  }
}

// ─── Reporting view ──────────────────────────────────────────────────────────

/// Lossy per-assessment reporting view; never stored, always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
  pub id:            i64,
  pub name:          String,
  pub check_count:   usize,
  /// Creator names joined with `", "` in stored order.
  pub creator_names: String,
  /// `None` when the assessment owns no assessed-software record.
  pub software_name: Option<String>,
}
