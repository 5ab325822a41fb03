//! Mapping between the document shape and the relational shape.
//!
//! Forward: one assessment row, one row per creator, exactly one
//! assessed-software row and one row per check, with `checkingSoftware`
//! flattened onto the check. Reverse: the summary view and a full JSON-LD
//! re-export.

use everse_core::assessment::{
  AssessmentRecord, AssessmentSummary, NewAssessedSoftware, NewAssessment,
  NewCheck, NewCreator, StoredAssessment,
};
use serde_json::Value;

use crate::{
  document::{
    AssessedSoftware, AssessmentDocument, CheckResult, CheckingSoftware,
    Creator, Reference, Uri,
  },
  error::{Error, Result},
  validate,
};

// ─── Forward ─────────────────────────────────────────────────────────────────

pub fn normalize(doc: &AssessmentDocument) -> NewAssessment {
  NewAssessment {
    record:   AssessmentRecord {
      context:      doc.context.to_string(),
      r#type:       doc.r#type.clone(),
      name:         doc.name.clone(),
      description:  doc.description.clone(),
      date_created: doc.date_created,
      license_uri:  doc.license.id.to_string(),
    },
    creators: doc.creators.iter().map(creator_row).collect(),
    software: Some(software_row(&doc.assessed_software)),
    checks:   doc.checks.iter().map(check_row).collect(),
  }
}

/// Normalize a document that has not been through validation. Anything
/// validation would reject is reported as [`Error::MalformedDocument`];
/// nothing is defaulted.
pub fn normalize_value(doc: &Value) -> Result<NewAssessment> {
  match validate::assessment(doc) {
    Ok(doc) => Ok(normalize(&doc)),
    Err(Error::Validation(errors)) => {
      let parts: Vec<String> =
        errors.fields.iter().map(ToString::to_string).collect();
      Err(Error::MalformedDocument(parts.join("; ")))
    }
    Err(e) => Err(e),
  }
}

fn creator_row(c: &Creator) -> NewCreator {
  NewCreator {
    r#type: c.r#type.clone(),
    name:   c.name.clone(),
    email:  c.email.clone(),
  }
}

fn software_row(s: &AssessedSoftware) -> NewAssessedSoftware {
  NewAssessedSoftware {
    r#type:         s.r#type.clone(),
    name:           s.name.clone(),
    version:        s.software_version.clone(),
    url:            s.url.as_ref().map(Uri::to_string),
    identifier_uri: s.identifier.as_ref().map(|r| r.id.to_string()),
  }
}

fn check_row(c: &CheckResult) -> NewCheck {
  let tool = &c.checking_software;
  NewCheck {
    r#type:                    c.r#type.clone(),
    indicator_uri:             c.assesses_indicator.id.to_string(),
    checking_software_type:    tool.r#type.clone(),
    checking_software_name:    tool.name.clone(),
    checking_software_uri:     tool.id.as_ref().map(Uri::to_string),
    checking_software_version: tool.software_version.clone(),
    process:                   c.process.clone(),
    status_uri:                c.status.id.clone(),
    output:                    c.output.clone(),
    evidence:                  c.evidence.clone(),
  }
}

// ─── Reverse ─────────────────────────────────────────────────────────────────

pub fn summarize(stored: &StoredAssessment) -> AssessmentSummary {
  let names: Vec<&str> =
    stored.creators.iter().map(|c| c.data.name.as_str()).collect();
  AssessmentSummary {
    id:            stored.assessment.id,
    name:          stored.assessment.data.name.clone(),
    check_count:   stored.checks.len(),
    creator_names: names.join(", "),
    software_name: stored.software.as_ref().map(|s| s.data.name.clone()),
  }
}

fn stored_uri(what: &str, value: &str) -> Result<Uri> {
  Uri::parse(value).map_err(|reason| {
    Error::MalformedDocument(format!("stored {what} {value:?}: {reason}"))
  })
}

fn stored_opt_uri(what: &str, value: Option<&str>) -> Result<Option<Uri>> {
  value.map(|v| stored_uri(what, v)).transpose()
}

/// Rebuild the JSON-LD document from stored rows.
///
/// Fails if the assessment owns no assessed-software record or a stored URI
/// no longer parses.
pub fn denormalize(stored: &StoredAssessment) -> Result<AssessmentDocument> {
  let record = &stored.assessment.data;
  let software = stored.software.as_ref().ok_or_else(|| {
    Error::MalformedDocument(format!(
      "assessment {} has no assessed software",
      stored.assessment.id
    ))
  })?;

  let checks = stored
    .checks
    .iter()
    .map(|row| {
      let c = &row.data;
      Ok(CheckResult {
        r#type:             c.r#type.clone(),
        assesses_indicator: Reference {
          id: stored_uri("indicator URI", &c.indicator_uri)?,
        },
        checking_software:  CheckingSoftware {
          r#type:           c.checking_software_type.clone(),
          name:             c.checking_software_name.clone(),
          id:               stored_opt_uri(
            "checking software URI",
            c.checking_software_uri.as_deref(),
          )?,
          software_version: c.checking_software_version.clone(),
        },
        process:            c.process.clone(),
        status:             Reference { id: c.status_uri.clone() },
        output:             c.output.clone(),
        evidence:           c.evidence.clone(),
      })
    })
    .collect::<Result<Vec<_>>>()?;

  let s = &software.data;
  Ok(AssessmentDocument {
    context: stored_uri("context", &record.context)?,
    r#type: record.r#type.clone(),
    name: record.name.clone(),
    description: record.description.clone(),
    creators: stored
      .creators
      .iter()
      .map(|c| Creator {
        r#type: c.data.r#type.clone(),
        name:   c.data.name.clone(),
        email:  c.data.email.clone(),
      })
      .collect(),
    date_created: record.date_created,
    license: Reference { id: stored_uri("license", &record.license_uri)? },
    assessed_software: AssessedSoftware {
      r#type:           s.r#type.clone(),
      name:             s.name.clone(),
      software_version: s.version.clone(),
      url:              stored_opt_uri("software URL", s.url.as_deref())?,
      identifier:       stored_opt_uri(
        "software identifier",
        s.identifier_uri.as_deref(),
      )?
      .map(|id| Reference { id }),
    },
    checks,
  })
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use everse_core::assessment::{
    Assessment, AssessmentCheck, AssessmentCreator, AssessmentSoftware,
  };
  use serde_json::json;

  use super::*;
  use crate::test_helpers::sample_assessment;

  /// Attach fake ids the way a store would.
  fn stored(new: NewAssessment) -> StoredAssessment {
    StoredAssessment {
      assessment: Assessment {
        id:         7,
        data:       new.record,
        created_at: Utc::now(),
        updated_at: None,
      },
      creators:   new
        .creators
        .into_iter()
        .zip(1..)
        .map(|(data, id)| AssessmentCreator { id, assessment_id: 7, data })
        .collect(),
      software:   new.software.map(|data| AssessmentSoftware {
        id: 1,
        assessment_id: 7,
        data,
      }),
      checks:     new
        .checks
        .into_iter()
        .zip(1..)
        .map(|(data, id)| AssessmentCheck { id, assessment_id: 7, data })
        .collect(),
    }
  }

  #[test]
  fn check_software_is_flattened() {
    let new = normalize_value(&sample_assessment()).unwrap();
    assert_eq!(new.checks.len(), 1);
    let check = &new.checks[0];
    assert_eq!(
      check.indicator_uri,
      "https://w3id.org/everse/i/indicators/license"
    );
    assert_eq!(check.checking_software_name, "howfairis");
    assert_eq!(
      check.checking_software_uri.as_deref(),
      Some("https://w3id.org/everse/tools/howfairis")
    );
    assert_eq!(check.checking_software_version.as_deref(), Some("0.14.2"));
    assert_eq!(check.status_uri, "schema:CompletedActionStatus");
  }

  #[test]
  fn one_row_per_creator_and_exactly_one_software() {
    let mut raw = sample_assessment();
    raw["creator"] = json!([{ "name": "Ada" }, { "name": "Charles" }]);
    let new = normalize_value(&raw).unwrap();
    assert_eq!(new.creators.len(), 2);
    let software = new.software.unwrap();
    assert_eq!(software.name, "analytical-engine");
    assert_eq!(
      software.identifier_uri.as_deref(),
      Some("https://doi.org/10.1234/abcde")
    );
  }

  #[test]
  fn unvalidated_document_is_malformed() {
    let mut raw = sample_assessment();
    raw.as_object_mut().unwrap().remove("assessedSoftware");
    let err = normalize_value(&raw).unwrap_err();
    match err {
      Error::MalformedDocument(msg) => assert!(msg.contains("assessedSoftware")),
      other => panic!("expected MalformedDocument, got {other:?}"),
    }
  }

  #[test]
  fn summary_joins_creators_in_order() {
    let mut raw = sample_assessment();
    raw["creator"] = json!([{ "name": "Ada Lovelace" }, { "name": "Charles Babbage" }]);
    let summary = summarize(&stored(normalize_value(&raw).unwrap()));
    assert_eq!(summary.id, 7);
    assert_eq!(summary.creator_names, "Ada Lovelace, Charles Babbage");
    assert_eq!(summary.check_count, 1);
    assert_eq!(summary.software_name.as_deref(), Some("analytical-engine"));
  }

  #[test]
  fn summary_marks_missing_software() {
    let mut rows = stored(normalize_value(&sample_assessment()).unwrap());
    rows.software = None;
    assert_eq!(summarize(&rows).software_name, None);
  }

  #[test]
  fn denormalize_then_normalize_preserves_rows() {
    let new = normalize_value(&sample_assessment()).unwrap();
    let rows = stored(new.clone());
    let doc = denormalize(&rows).unwrap();
    assert_eq!(normalize(&doc), new);
  }

  #[test]
  fn denormalize_requires_software() {
    let mut rows = stored(normalize_value(&sample_assessment()).unwrap());
    rows.software = None;
    assert!(matches!(
      denormalize(&rows),
      Err(Error::MalformedDocument(msg)) if msg.contains("no assessed software")
    ));
  }
}
