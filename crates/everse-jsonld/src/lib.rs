//! JSON-LD codec for EVERSE assessment data.
//!
//! Validates inbound documents into strongly-typed values and maps assessment
//! documents to and from the relational shape in [`everse_core`]. Pure
//! synchronous; no HTTP or database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use everse_jsonld::{normalize, validate_assessment};
//!
//! let raw: serde_json::Value = serde_json::from_str("{}").unwrap();
//! match validate_assessment(&raw) {
//!   Ok(doc) => println!("{} checks", normalize(&doc).checks.len()),
//!   Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod document;
pub mod error;
mod normalize;
mod validate;

pub use document::{AssessmentDocument, DocumentKind, Uri, ValidatedDocument};
pub use error::{Error, FieldError, Problem, Result, ValidationErrors};
use everse_core::{
  dimension::NewDimension, indicator::NewIndicator, software::NewSoftware,
};
pub use normalize::{denormalize, normalize, normalize_value, summarize};
use serde_json::Value;

// ─── Validation ──────────────────────────────────────────────────────────────

/// Validate `doc` as a document of the given kind.
///
/// On rejection the error lists every offending field, not only the first.
pub fn validate(kind: DocumentKind, doc: &Value) -> Result<ValidatedDocument> {
  Ok(match kind {
    DocumentKind::Assessment => {
      ValidatedDocument::Assessment(validate::assessment(doc)?)
    }
    DocumentKind::Indicator => {
      ValidatedDocument::Indicator(validate::indicator(doc)?)
    }
    DocumentKind::Dimension => {
      ValidatedDocument::Dimension(validate::dimension(doc)?)
    }
    DocumentKind::Software => {
      ValidatedDocument::Software(validate::software(doc)?)
    }
  })
}

pub fn validate_assessment(doc: &Value) -> Result<AssessmentDocument> {
  validate::assessment(doc)
}

pub fn validate_indicator(doc: &Value) -> Result<NewIndicator> {
  validate::indicator(doc)
}

pub fn validate_dimension(doc: &Value) -> Result<NewDimension> {
  validate::dimension(doc)
}

pub fn validate_software(doc: &Value) -> Result<NewSoftware> {
  validate::software(doc)
}

/// Parse `input` as JSON and validate it. Syntax errors surface as
/// [`Error::Json`].
pub fn parse(kind: DocumentKind, input: &str) -> Result<ValidatedDocument> {
  let value: Value = serde_json::from_str(input)?;
  validate(kind, &value)
}

/// Serialize `doc` as pretty-printed JSON-LD.
pub fn to_json(doc: &AssessmentDocument) -> Result<String> {
  Ok(serde_json::to_string_pretty(doc)?)
}

// ─── Round-trip test ─────────────────────────────────────────────────────────


// ─── Shared test helpers ──────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod test_helpers {
  use serde_json::{Value, json};

  /// A complete assessment document with one creator and one check.
  pub(crate) fn sample_assessment() -> Value {
    json!({
      "@context": "https://w3id.org/everse/rsqa/0.0.1/",
      "@type": "SoftwareQualityAssessment",
      "name": "Quality Assessment #1",
      "description": "Automated checks against the RSQA indicators.",
      "creator": {
        "@type": "schema:Person",
        "name": "Ada Lovelace",
        "email": "ada@example.org",
      },
      "dateCreated": "2024-05-01T12:00:00Z",
      "license": { "@id": "https://creativecommons.org/publicdomain/zero/1.0/" },
      "assessedSoftware": {
        "@type": "schema:SoftwareApplication",
        "name": "analytical-engine",
        "softwareVersion": "1.2.0",
        "url": "https://github.com/example/analytical-engine",
        "schema:identifier": { "@id": "https://doi.org/10.1234/abcde" },
      },
      "checks": [{
        "@type": "CheckResult",
        "assessesIndicator": {
          "@id": "https://w3id.org/everse/i/indicators/license",
        },
        "checkingSoftware": {
          "@type": "schema:SoftwareApplication",
          "name": "howfairis",
          "@id": "https://w3id.org/everse/tools/howfairis",
          "softwareVersion": "0.14.2",
        },
        "process": "Searches for a LICENSE file in the repository root.",
        "status": { "@id": "schema:CompletedActionStatus" },
        "output": "true",
        "evidence": "Found LICENSE at repository root.",
      }],
    })
  }
}
