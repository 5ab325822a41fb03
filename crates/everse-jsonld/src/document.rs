//! Strongly-typed JSON-LD assessment document.
//!
//! Produced only by validation; nothing downstream of the validation
//! boundary touches `serde_json::Value`. Serializing an
//! [`AssessmentDocument`] yields the EVERSE JSON-LD shape again.

use std::fmt;

use chrono::{DateTime, Utc};
use everse_core::{
  dimension::NewDimension, indicator::NewIndicator, software::NewSoftware,
};
use serde::Serialize;
use strum::{Display, EnumString};

// ─── Uri ─────────────────────────────────────────────────────────────────────

/// A syntactically valid absolute URI, kept exactly as written in the source
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
  /// Accept `s` if it parses as an absolute URI and carries no surrounding
  /// whitespace. The returned error is a human-readable reason.
  pub fn parse(s: &str) -> Result<Self, String> {
    if s.trim() != s {
      return Err("surrounding whitespace".to_owned());
    }
    url::Url::parse(s).map_err(|e| e.to_string())?;
    Ok(Self(s.to_owned()))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_string(self) -> String { self.0 }
}

impl fmt::Display for Uri {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A JSON-LD node reference, `{"@id": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference<T> {
  #[serde(rename = "@id")]
  pub id: T,
}

// ─── Assessment document ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Creator {
  #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
  pub r#type: Option<String>,
  pub name:   String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:  Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessedSoftware {
  #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
  pub r#type:           Option<String>,
  pub name:             String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub software_version: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub url:              Option<Uri>,
  #[serde(rename = "schema:identifier", skip_serializing_if = "Option::is_none")]
  pub identifier:       Option<Reference<Uri>>,
}

/// The tool that produced a check result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckingSoftware {
  #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
  pub r#type:           Option<String>,
  pub name:             String,
  #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
  pub id:               Option<Uri>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub software_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
  #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
  pub r#type:             Option<String>,
  pub assesses_indicator: Reference<Uri>,
  pub checking_software:  CheckingSoftware,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub process:            Option<String>,
  /// A status term such as `schema:CompletedActionStatus`; not required to
  /// be an absolute URI.
  pub status:             Reference<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub output:             Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub evidence:           Option<String>,
}

/// Top-level JSON-LD document describing an EVERSE assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDocument {
  #[serde(rename = "@context")]
  pub context:           Uri,
  #[serde(rename = "@type")]
  pub r#type:            String,
  pub name:              String,
  pub description:       String,
  /// Always a list internally, even when the source held a single object.
  #[serde(rename = "creator")]
  pub creators:          Vec<Creator>,
  pub date_created:      DateTime<Utc>,
  pub license:           Reference<Uri>,
  pub assessed_software: AssessedSoftware,
  pub checks:            Vec<CheckResult>,
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

/// Which entity an inbound document claims to represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DocumentKind {
  #[default]
  Assessment,
  Indicator,
  Dimension,
  Software,
}

/// The closed result of validating any inbound document.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedDocument {
  Assessment(AssessmentDocument),
  Indicator(NewIndicator),
  Dimension(NewDimension),
  Software(NewSoftware),
}

impl ValidatedDocument {
  pub fn kind(&self) -> DocumentKind {
    match self {
      Self::Assessment(_) => DocumentKind::Assessment,
      Self::Indicator(_) => DocumentKind::Indicator,
      Self::Dimension(_) => DocumentKind::Dimension,
      Self::Software(_) => DocumentKind::Software,
    }
  }
}
