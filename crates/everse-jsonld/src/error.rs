//! Error types for the everse-jsonld codec.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The inbound document failed structural, type, enum or URI checks.
  #[error("{0}")]
  Validation(ValidationErrors),

  /// Normalization was handed something that never passed validation.
  #[error("malformed document: {0}")]
  MalformedDocument(String),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Field-level rejections ──────────────────────────────────────────────────

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Problem {
  #[error("required field is missing")]
  Missing,

  #[error("expected at least one item")]
  Empty,

  #[error("expected {expected}")]
  WrongType { expected: &'static str },

  #[error("invalid URI {value:?}: {reason}")]
  InvalidUri { value: String, reason: String },

  #[error("invalid timestamp {value:?}")]
  InvalidTimestamp { value: String },

  #[error("unknown {vocabulary} literal {value:?} (allowed: {})", .allowed.join(", "))]
  UnknownLiteral {
    vocabulary: &'static str,
    value:      String,
    allowed:    Vec<&'static str>,
  },
}

/// One offending field, addressed by a dotted path such as
/// `checks[1].assessesIndicator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub path:    String,
  pub problem: Problem,
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let path = if self.path.is_empty() { "<document>" } else { &self.path };
    write!(f, "{path}: {}", self.problem)
  }
}

/// Every violation found in one document. Never empty when returned inside
/// [`Error::Validation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
  pub fields: Vec<FieldError>,
}

impl ValidationErrors {
  /// Whether some violation was reported at exactly `path`.
  pub fn has(&self, path: &str) -> bool {
    self.fields.iter().any(|f| f.path == path)
  }

  pub fn paths(&self) -> Vec<&str> {
    self.fields.iter().map(|f| f.path.as_str()).collect()
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "document failed validation ({} field(s))", self.fields.len())?;
    for field in &self.fields {
      write!(f, "; {field}")?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}
