//! Structural validation of inbound documents.
//!
//! Pipeline:
//!   serde_json::Value
//!     └─ Walker::object()        → &Map, or a rejection at that path
//!          └─ field helpers      → typed values; every problem is recorded
//!               └─ Walker::finish() → typed document, or all rejections
//!
//! Validation never stops at the first problem: each helper records what is
//! wrong at its path and returns `None`, and the caller only assembles the
//! typed value once every field has been looked at.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use everse_core::{
  dimension::NewDimension,
  indicator::NewIndicator,
  software::NewSoftware,
  vocab::{
    HowToUse, Keyword, Literal, QualityDimension, Status,
    dedup_preserving_order,
  },
};
use serde_json::{Map, Value};

use crate::{
  document::{
    AssessedSoftware, AssessmentDocument, CheckResult, CheckingSoftware,
    Creator, Reference, Uri,
  },
  error::{Error, FieldError, Problem, Result, ValidationErrors},
};

type Object = Map<String, Value>;

// ─── Paths ───────────────────────────────────────────────────────────────────

fn child(prefix: &str, key: &str) -> String {
  if prefix.is_empty() {
    key.to_owned()
  } else {
    format!("{prefix}.{key}")
  }
}

fn item(prefix: &str, index: usize) -> String { format!("{prefix}[{index}]") }

/// A list field accepts a single item or an array of items.
fn one_or_many<'v>(value: &'v Value, path: &str) -> Vec<(&'v Value, String)> {
  match value {
    Value::Array(items) => items
      .iter()
      .enumerate()
      .map(|(i, v)| (v, item(path, i)))
      .collect(),
    single => vec![(single, path.to_owned())],
  }
}

/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (taken as UTC) and bare
/// `YYYY-MM-DD` (midnight UTC).
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }
  for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
      return Some(naive.and_utc());
    }
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
}

// ─── Walker ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Walker {
  errors: Vec<FieldError>,
}

impl Walker {
  fn reject(&mut self, path: impl Into<String>, problem: Problem) {
    self.errors.push(FieldError { path: path.into(), problem });
  }

  fn into_error(self) -> Error {
    Error::Validation(ValidationErrors { fields: self.errors })
  }

  fn finish<T>(self, value: T) -> Result<T> {
    if self.errors.is_empty() {
      Ok(value)
    } else {
      Err(self.into_error())
    }
  }

  // ── Structure ─────────────────────────────────────────────────────────

  fn object<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Object> {
    match value {
      Value::Object(map) => Some(map),
      _ => {
        self.reject(path, Problem::WrongType { expected: "object" });
        None
      }
    }
  }

  /// Look up `key`; an explicit `null` counts as absent.
  fn field<'v>(
    &mut self,
    obj: &'v Object,
    prefix: &str,
    key: &str,
    required: bool,
  ) -> Option<&'v Value> {
    match obj.get(key) {
      None | Some(Value::Null) => {
        if required {
          self.reject(child(prefix, key), Problem::Missing);
        }
        None
      }
      Some(value) => Some(value),
    }
  }

  /// A list-valued field. Absent optional lists are empty; required lists
  /// must hold at least one item. Failing items are reported and skipped.
  fn list<T>(
    &mut self,
    obj: &Object,
    prefix: &str,
    key: &str,
    required: bool,
    mut each: impl FnMut(&mut Self, &Value, &str) -> Option<T>,
  ) -> Option<Vec<T>> {
    let path = child(prefix, key);
    let Some(value) = self.field(obj, prefix, key, required) else {
      return if required { None } else { Some(Vec::new()) };
    };
    let items = one_or_many(value, &path);
    if required && items.is_empty() {
      self.reject(path, Problem::Empty);
      return None;
    }
    Some(
      items
        .into_iter()
        .filter_map(|(v, p)| each(self, v, &p))
        .collect(),
    )
  }

  // ── Scalars ───────────────────────────────────────────────────────────

  fn string<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v str> {
    match value {
      Value::String(s) => Some(s),
      _ => {
        self.reject(path, Problem::WrongType { expected: "string" });
        None
      }
    }
  }

  /// Free text; numbers and booleans are rendered as text.
  fn text(&mut self, value: &Value, path: &str) -> Option<String> {
    match value {
      Value::String(s) => Some(s.clone()),
      Value::Number(n) => Some(n.to_string()),
      Value::Bool(b) => Some(b.to_string()),
      _ => {
        self.reject(path, Problem::WrongType { expected: "string" });
        None
      }
    }
  }

  fn required_text(
    &mut self,
    obj: &Object,
    prefix: &str,
    key: &str,
  ) -> Option<String> {
    let value = self.field(obj, prefix, key, true)?;
    self.text(value, &child(prefix, key))
  }

  fn optional_text(
    &mut self,
    obj: &Object,
    prefix: &str,
    key: &str,
  ) -> Option<String> {
    let value = self.field(obj, prefix, key, false)?;
    self.text(value, &child(prefix, key))
  }

  fn identifier(&mut self, obj: &Object) -> Option<String> {
    let value = self.required_text(obj, "", "identifier")?;
    if value.trim().is_empty() {
      self.reject("identifier", Problem::WrongType {
        expected: "non-empty string",
      });
      return None;
    }
    Some(value)
  }

  fn boolean(&mut self, value: &Value, path: &str) -> Option<bool> {
    let parsed = match value {
      Value::Bool(b) => Some(*b),
      Value::Number(n) => match n.as_u64() {
        Some(1) => Some(true),
        Some(0) => Some(false),
        _ => None,
      },
      Value::String(s) => match s.as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
      },
      _ => None,
    };
    if parsed.is_none() {
      self.reject(path, Problem::WrongType { expected: "boolean" });
    }
    parsed
  }

  fn timestamp(&mut self, value: &Value, path: &str) -> Option<DateTime<Utc>> {
    let s = self.string(value, path)?;
    let parsed = parse_timestamp(s);
    if parsed.is_none() {
      self.reject(path, Problem::InvalidTimestamp { value: s.to_owned() });
    }
    parsed
  }

  // ── URIs and references ───────────────────────────────────────────────

  fn uri(&mut self, value: &Value, path: &str) -> Option<Uri> {
    let s = self.string(value, path)?;
    match Uri::parse(s) {
      Ok(uri) => Some(uri),
      Err(reason) => {
        self.reject(path, Problem::InvalidUri { value: s.to_owned(), reason });
        None
      }
    }
  }

  fn optional_uri(&mut self, obj: &Object, prefix: &str, key: &str) -> Option<Uri> {
    let value = self.field(obj, prefix, key, false)?;
    self.uri(value, &child(prefix, key))
  }

  /// A JSON-LD reference is either `{"@id": ...}` or the bare id. Returns the
  /// id value and the path it lives at.
  fn reference<'v>(
    &mut self,
    value: &'v Value,
    path: &str,
  ) -> Option<(&'v Value, String)> {
    match value {
      Value::Object(map) => self
        .field(map, path, "@id", true)
        .map(|id| (id, child(path, "@id"))),
      other => Some((other, path.to_owned())),
    }
  }

  fn uri_reference(&mut self, value: &Value, path: &str) -> Option<Uri> {
    let (id, id_path) = self.reference(value, path)?;
    self.uri(id, &id_path)
  }

  /// A reference to a vocabulary term; any non-empty string is accepted.
  fn term_reference(&mut self, value: &Value, path: &str) -> Option<String> {
    let (id, id_path) = self.reference(value, path)?;
    let s = self.string(id, &id_path)?;
    if s.trim().is_empty() {
      self.reject(id_path, Problem::WrongType {
        expected: "non-empty string",
      });
      return None;
    }
    Some(s.to_owned())
  }

  // ── Vocabularies ──────────────────────────────────────────────────────

  fn literal<L: Literal>(&mut self, value: &Value, path: &str) -> Option<L> {
    let s = self.string(value, path)?;
    match L::parse_literal(s) {
      Ok(literal) => Some(literal),
      Err(_) => {
        self.reject(path, Problem::UnknownLiteral {
          vocabulary: L::VOCABULARY,
          value:      s.to_owned(),
          allowed:    L::allowed(),
        });
        None
      }
    }
  }

  /// A set-valued enum field: scalar or list, de-duplicated.
  fn literals<L: Literal + PartialEq>(
    &mut self,
    obj: &Object,
    prefix: &str,
    key: &str,
  ) -> Vec<L> {
    let items = self
      .list(obj, prefix, key, false, |w, v, p| w.literal::<L>(v, p))
      .unwrap_or_default();
    dedup_preserving_order(items)
  }

  // ── Assessment parts ──────────────────────────────────────────────────

  fn creator(&mut self, value: &Value, path: &str) -> Option<Creator> {
    let obj = self.object(value, path)?;
    let r#type = self.optional_text(obj, path, "@type");
    let name = self.required_text(obj, path, "name");
    let email = self.optional_text(obj, path, "email");
    Some(Creator { r#type, name: name?, email })
  }

  fn assessed_software(
    &mut self,
    value: &Value,
    path: &str,
  ) -> Option<AssessedSoftware> {
    let obj = self.object(value, path)?;
    let r#type = self.optional_text(obj, path, "@type");
    let name = self.required_text(obj, path, "name");
    let software_version = self.optional_text(obj, path, "softwareVersion");
    let url = self.optional_uri(obj, path, "url");

    let id_key = if obj.contains_key("schema:identifier") {
      "schema:identifier"
    } else {
      "identifier"
    };
    let identifier = self
      .field(obj, path, id_key, false)
      .and_then(|v| self.uri_reference(v, &child(path, id_key)))
      .map(|id| Reference { id });

    Some(AssessedSoftware {
      r#type,
      name: name?,
      software_version,
      url,
      identifier,
    })
  }

  fn checking_software(
    &mut self,
    value: &Value,
    path: &str,
  ) -> Option<CheckingSoftware> {
    let obj = self.object(value, path)?;
    let r#type = self.optional_text(obj, path, "@type");
    let name = self.required_text(obj, path, "name");
    let id = self.optional_uri(obj, path, "@id");
    let software_version = self.optional_text(obj, path, "softwareVersion");
    Some(CheckingSoftware { r#type, name: name?, id, software_version })
  }

  fn check(&mut self, value: &Value, path: &str) -> Option<CheckResult> {
    let obj = self.object(value, path)?;
    let r#type = self.optional_text(obj, path, "@type");
    let indicator = self
      .field(obj, path, "assessesIndicator", true)
      .and_then(|v| self.uri_reference(v, &child(path, "assessesIndicator")));
    let checking_software = self
      .field(obj, path, "checkingSoftware", true)
      .and_then(|v| self.checking_software(v, &child(path, "checkingSoftware")));
    let process = self.optional_text(obj, path, "process");
    let status = self
      .field(obj, path, "status", true)
      .and_then(|v| self.term_reference(v, &child(path, "status")));
    let output = self.optional_text(obj, path, "output");
    let evidence = self.optional_text(obj, path, "evidence");

    Some(CheckResult {
      r#type,
      assesses_indicator: Reference { id: indicator? },
      checking_software: checking_software?,
      process,
      status: Reference { id: status? },
      output,
      evidence,
    })
  }
}

// ─── Entry points ────────────────────────────────────────────────────────────

pub(crate) fn assessment(doc: &Value) -> Result<AssessmentDocument> {
  let mut w = Walker::default();
  let Some(obj) = w.object(doc, "") else {
    return Err(w.into_error());
  };

  let context = w
    .field(obj, "", "@context", true)
    .and_then(|v| w.uri(v, "@context"));
  let r#type = w.required_text(obj, "", "@type");
  let name = w.required_text(obj, "", "name");
  let description = w.required_text(obj, "", "description");
  let creators = w.list(obj, "", "creator", true, Walker::creator);
  let date_created = w
    .field(obj, "", "dateCreated", true)
    .and_then(|v| w.timestamp(v, "dateCreated"));
  let license = w
    .field(obj, "", "license", true)
    .and_then(|v| w.uri_reference(v, "license"));
  let assessed_software = w
    .field(obj, "", "assessedSoftware", true)
    .and_then(|v| w.assessed_software(v, "assessedSoftware"));

  // An absent or null check list is an empty one.
  let checks_key = match obj.get("checks") {
    None | Some(Value::Null) if obj.contains_key("CheckResult") => "CheckResult",
    _ => "checks",
  };
  let checks = w.list(obj, "", checks_key, false, Walker::check);

  let (
    Some(context),
    Some(r#type),
    Some(name),
    Some(description),
    Some(creators),
    Some(date_created),
    Some(license),
    Some(assessed_software),
    Some(checks),
  ) = (
    context,
    r#type,
    name,
    description,
    creators,
    date_created,
    license,
    assessed_software,
    checks,
  )
  else {
    return Err(w.into_error());
  };

  w.finish(AssessmentDocument {
    context,
    r#type,
    name,
    description,
    creators,
    date_created,
    license: Reference { id: license },
    assessed_software,
    checks,
  })
}

pub(crate) fn indicator(doc: &Value) -> Result<NewIndicator> {
  let mut w = Walker::default();
  let Some(obj) = w.object(doc, "") else {
    return Err(w.into_error());
  };

  let identifier = w.identifier(obj);
  let name = w.required_text(obj, "", "name");
  let description = w.required_text(obj, "", "description");
  let keywords = w.literals::<Keyword>(obj, "", "keywords");
  let status = w
    .field(obj, "", "status", true)
    .and_then(|v| w.literal::<Status>(v, "status"));
  let quality_dimensions =
    w.literals::<QualityDimension>(obj, "", "qualityDimensions");
  let release_date = w
    .field(obj, "", "releaseDate", false)
    .and_then(|v| w.timestamp(v, "releaseDate"));
  let version = w.required_text(obj, "", "version");
  let doi = w.required_text(obj, "", "doi");

  let (
    Some(identifier),
    Some(name),
    Some(description),
    Some(status),
    Some(version),
    Some(doi),
  ) = (identifier, name, description, status, version, doi)
  else {
    return Err(w.into_error());
  };

  w.finish(NewIndicator {
    identifier,
    name,
    description,
    keywords,
    status,
    quality_dimensions,
    release_date,
    version,
    doi,
  })
}

pub(crate) fn dimension(doc: &Value) -> Result<NewDimension> {
  let mut w = Walker::default();
  let Some(obj) = w.object(doc, "") else {
    return Err(w.into_error());
  };

  let identifier = w.identifier(obj);
  let name = w.required_text(obj, "", "name");
  let description = w.required_text(obj, "", "description");
  let source = w
    .list(obj, "", "source", false, Walker::text)
    .unwrap_or_default();

  let (Some(identifier), Some(name), Some(description)) =
    (identifier, name, description)
  else {
    return Err(w.into_error());
  };

  w.finish(NewDimension { identifier, name, description, source })
}

pub(crate) fn software(doc: &Value) -> Result<NewSoftware> {
  let mut w = Walker::default();
  let Some(obj) = w.object(doc, "") else {
    return Err(w.into_error());
  };

  let identifier = w.identifier(obj);
  let name = w.required_text(obj, "", "name");
  let description = w.required_text(obj, "", "description");
  let url = w.required_text(obj, "", "url");
  let is_accessible_for_free = w
    .field(obj, "", "isAccessibleForFree", true)
    .and_then(|v| w.boolean(v, "isAccessibleForFree"));
  let quality_dimensions =
    w.literals::<QualityDimension>(obj, "", "qualityDimensions");
  let how_to_use = w.literals::<HowToUse>(obj, "", "howToUse");
  let license = w.required_text(obj, "", "license");

  let (
    Some(identifier),
    Some(name),
    Some(description),
    Some(url),
    Some(is_accessible_for_free),
    Some(license),
  ) = (identifier, name, description, url, is_accessible_for_free, license)
  else {
    return Err(w.into_error());
  };

  w.finish(NewSoftware {
    identifier,
    name,
    description,
    url,
    is_accessible_for_free,
    quality_dimensions,
    how_to_use,
    license,
  })
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use serde_json::json;

  use super::*;
  use crate::test_helpers::sample_assessment;

  fn rejection(result: Result<impl std::fmt::Debug>) -> ValidationErrors {
    match result {
      Err(Error::Validation(errors)) => errors,
      other => panic!("expected a validation error, got {other:?}"),
    }
  }

  // ── Assessments ───────────────────────────────────────────────────────

  #[test]
  fn valid_document_passes() {
    let doc = assessment(&sample_assessment()).unwrap();
    assert_eq!(doc.context.as_str(), "https://w3id.org/everse/rsqa/0.0.1/");
    assert_eq!(doc.r#type, "SoftwareQualityAssessment");
    assert_eq!(doc.creators.len(), 1);
    assert_eq!(doc.creators[0].name, "Ada Lovelace");
    assert_eq!(
      doc.date_created,
      Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    );
    assert_eq!(doc.checks.len(), 1);
    assert_eq!(
      doc.checks[0].assesses_indicator.id.as_str(),
      "https://w3id.org/everse/i/indicators/license"
    );
    assert_eq!(
      doc.assessed_software.identifier.as_ref().map(|r| r.id.as_str()),
      Some("https://doi.org/10.1234/abcde")
    );
  }

  #[test]
  fn missing_date_created_is_named() {
    let mut raw = sample_assessment();
    raw.as_object_mut().unwrap().remove("dateCreated");
    let errors = rejection(assessment(&raw));
    assert_eq!(errors.paths(), ["dateCreated"]);
    assert_eq!(errors.fields[0].problem, Problem::Missing);
  }

  #[test]
  fn every_violation_is_reported() {
    let mut raw = sample_assessment();
    let obj = raw.as_object_mut().unwrap();
    obj.remove("name");
    obj.insert("license".into(), json!({ "@id": "not a uri" }));
    obj.insert("dateCreated".into(), json!("yesterday"));
    obj["checks"][0]["checkingSoftware"]["@id"] = json!("tools/howfairis");
    obj["checks"][0].as_object_mut().unwrap().remove("status");

    let errors = rejection(assessment(&raw));
    assert!(errors.has("name"));
    assert!(errors.has("license.@id"));
    assert!(errors.has("dateCreated"));
    assert!(errors.has("checks[0].checkingSoftware.@id"));
    assert!(errors.has("checks[0].status"));
    assert_eq!(errors.fields.len(), 5);
  }

  #[test]
  fn absent_or_null_checks_default_to_empty() {
    let mut raw = sample_assessment();
    raw.as_object_mut().unwrap().remove("checks");
    assert!(assessment(&raw).unwrap().checks.is_empty());

    raw["checks"] = Value::Null;
    assert!(assessment(&raw).unwrap().checks.is_empty());
  }

  #[test]
  fn single_check_object_equals_one_element_list() {
    let listed = sample_assessment();
    let mut single = listed.clone();
    single["checks"] = listed["checks"][0].clone();

    assert_eq!(assessment(&single).unwrap(), assessment(&listed).unwrap());
  }

  #[test]
  fn check_result_key_is_accepted() {
    let mut raw = sample_assessment();
    let checks = raw.as_object_mut().unwrap().remove("checks").unwrap();
    raw["CheckResult"] = checks;
    assert_eq!(assessment(&raw).unwrap().checks.len(), 1);
  }

  #[test]
  fn creator_list_keeps_order() {
    let mut raw = sample_assessment();
    raw["creator"] = json!([
      { "name": "Ada Lovelace" },
      { "@type": "schema:Person", "name": "Charles Babbage" },
    ]);
    let doc = assessment(&raw).unwrap();
    let names: Vec<_> = doc.creators.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Ada Lovelace", "Charles Babbage"]);
  }

  #[test]
  fn empty_creator_list_is_rejected() {
    let mut raw = sample_assessment();
    raw["creator"] = json!([]);
    let errors = rejection(assessment(&raw));
    assert_eq!(errors.fields[0].path, "creator");
    assert_eq!(errors.fields[0].problem, Problem::Empty);
  }

  #[test]
  fn bad_items_are_addressed_by_index() {
    let mut raw = sample_assessment();
    raw["creator"] = json!([{ "name": "Ada" }, { "email": "x@example.org" }]);
    let errors = rejection(assessment(&raw));
    assert_eq!(errors.paths(), ["creator[1].name"]);
  }

  #[test]
  fn bare_string_references_are_accepted() {
    let mut raw = sample_assessment();
    raw["license"] = json!("https://spdx.org/licenses/MIT");
    raw["checks"][0]["status"] = json!("CompletedActionStatus");
    raw["checks"][0]["assessesIndicator"] =
      json!("https://w3id.org/everse/i/indicators/readme");
    let doc = assessment(&raw).unwrap();
    assert_eq!(doc.license.id.as_str(), "https://spdx.org/licenses/MIT");
    assert_eq!(doc.checks[0].status.id, "CompletedActionStatus");
  }

  #[test]
  fn relative_indicator_reference_is_rejected() {
    let mut raw = sample_assessment();
    raw["checks"][0]["assessesIndicator"] = json!({ "@id": "indicators/license" });
    let errors = rejection(assessment(&raw));
    assert!(matches!(
      &errors.fields[0].problem,
      Problem::InvalidUri { value, .. } if value == "indicators/license"
    ));
    assert_eq!(errors.fields[0].path, "checks[0].assessesIndicator.@id");
  }

  #[test]
  fn context_is_preserved_verbatim() {
    let mut raw = sample_assessment();
    raw["@context"] = json!("https://w3id.org/everse/rsqa/0.0.1");
    let doc = assessment(&raw).unwrap();
    assert_eq!(doc.context.as_str(), "https://w3id.org/everse/rsqa/0.0.1");
  }

  #[test]
  fn numeric_versions_are_coerced_to_text() {
    let mut raw = sample_assessment();
    raw["assessedSoftware"]["softwareVersion"] = json!(2);
    raw["checks"][0]["output"] = json!(true);
    let doc = assessment(&raw).unwrap();
    assert_eq!(doc.assessed_software.software_version.as_deref(), Some("2"));
    assert_eq!(doc.checks[0].output.as_deref(), Some("true"));
  }

  #[test]
  fn non_object_root_is_rejected() {
    let errors = rejection(assessment(&json!([1, 2, 3])));
    assert_eq!(errors.fields, [FieldError {
      path:    String::new(),
      problem: Problem::WrongType { expected: "object" },
    }]);
  }

  #[test]
  fn timestamp_forms() {
    let midnight = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    assert_eq!(parse_timestamp("2024-05-01"), Some(midnight));
    assert_eq!(parse_timestamp("2024-05-01T00:00:00"), Some(midnight));
    assert_eq!(parse_timestamp("2024-05-01T02:00:00+02:00"), Some(midnight));
    assert_eq!(parse_timestamp("01/05/2024"), None);
  }

  // ── Catalog entities ──────────────────────────────────────────────────

  fn sample_indicator() -> Value {
    json!({
      "identifier": "IND-001",
      "name": "Software has a license",
      "description": "The repository declares an OSI-approved license.",
      "keywords": ["keyword1", "keyword3", "keyword1"],
      "status": "active",
      "qualityDimensions": "FAIRness",
      "releaseDate": "2024-01-15T00:00:00Z",
      "version": "1.0",
      "doi": "10.1234/abcde",
    })
  }

  #[test]
  fn indicator_sets_are_normalized() {
    let ind = indicator(&sample_indicator()).unwrap();
    assert_eq!(ind.keywords, [Keyword::Keyword1, Keyword::Keyword3]);
    assert_eq!(ind.quality_dimensions, [QualityDimension::Fairness]);
    assert_eq!(ind.status, Status::Active);
  }

  #[test]
  fn indicator_unknown_literals_are_rejected() {
    let mut raw = sample_indicator();
    raw["keywords"] = json!(["keyword1", "Keyword2"]);
    raw["status"] = json!("retired");
    let errors = rejection(indicator(&raw));
    assert_eq!(errors.paths(), ["keywords[1]", "status"]);
    assert!(matches!(
      &errors.fields[1].problem,
      Problem::UnknownLiteral { vocabulary: "status", allowed, .. }
        if allowed == &["active", "deprecated"]
    ));
  }

  #[test]
  fn indicator_version_may_be_numeric() {
    let mut raw = sample_indicator();
    raw["version"] = json!(1.5);
    assert_eq!(indicator(&raw).unwrap().version, "1.5");
  }

  #[test]
  fn blank_identifier_is_rejected() {
    let mut raw = sample_indicator();
    raw["identifier"] = json!("  ");
    assert_eq!(rejection(indicator(&raw)).paths(), ["identifier"]);
  }

  #[test]
  fn dimension_source_accepts_scalar() {
    let dim = dimension(&json!({
      "identifier": "DIM-001",
      "name": "Openness",
      "description": "How open the software is.",
      "source": "EVERSE",
    }))
    .unwrap();
    assert_eq!(dim.source, ["EVERSE"]);
  }

  #[test]
  fn software_coerces_booleans_and_how_to_use() {
    let sw = software(&json!({
      "identifier": "SW-001",
      "name": "howfairis",
      "description": "Checks compliance with the fair-software recommendations.",
      "url": "https://github.com/fair-software/howfairis",
      "isAccessibleForFree": "yes",
      "qualityDimensions": ["FAIRness"],
      "howToUse": ["cicd", "command-line"],
      "license": "Apache-2.0",
    }))
    .unwrap();
    assert!(sw.is_accessible_for_free);
    assert_eq!(sw.how_to_use, [HowToUse::Cicd, HowToUse::Cmdline]);
  }

  #[test]
  fn software_rejects_unparseable_boolean() {
    let errors = rejection(software(&json!({
      "identifier": "SW-001",
      "name": "howfairis",
      "description": "",
      "url": "https://github.com/fair-software/howfairis",
      "isAccessibleForFree": "maybe",
      "license": "Apache-2.0",
    })));
    assert_eq!(errors.paths(), ["isAccessibleForFree"]);
  }
}
