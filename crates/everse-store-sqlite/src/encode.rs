//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Set- and list-valued fields
//! are stored as compact JSON arrays of their literals. Booleans are 0/1.

use chrono::{DateTime, Utc};
use everse_core::{
  assessment::{
    Assessment, AssessmentCheck, AssessmentCreator, AssessmentRecord,
    AssessmentSoftware, NewAssessedSoftware, NewCheck, NewCreator,
    StoredAssessment,
  },
  dimension::{Dimension, NewDimension},
  indicator::{Indicator, NewIndicator},
  relation::{ContentRelation, NewContentRelation},
  software::{NewSoftware, Software},
  vocab::{Literal as _, Status},
};
use rusqlite::Row;
use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

fn decode_opt_dt(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
  s.as_deref().map(decode_dt).transpose()
}

// ─── Lists ───────────────────────────────────────────────────────────────────

pub fn encode_list<T: Serialize>(items: &[T]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode_list<T: DeserializeOwned>(s: &str) -> Result<Vec<T>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Column lists ────────────────────────────────────────────────────────────

pub const INDICATOR_COLUMNS: &str = "id, identifier, name, description, \
   keywords, status, quality_dimensions, release_date, version, doi";

pub const DIMENSION_COLUMNS: &str = "id, identifier, name, description, source";

pub const SOFTWARE_COLUMNS: &str = "id, identifier, name, description, url, \
   is_accessible_for_free, quality_dimensions, how_to_use, license";

pub const RELATION_COLUMNS: &str =
  "id, indicator_id, dimension_id, software_id";

pub const ASSESSMENT_COLUMNS: &str = "id, context, type, name, description, \
   date_created, license_uri, created_at, updated_at";

pub const CREATOR_COLUMNS: &str = "id, assessment_id, type, name, email";

pub const ASSESSED_SOFTWARE_COLUMNS: &str =
  "id, assessment_id, type, name, version, url, identifier_uri";

pub const CHECK_COLUMNS: &str = "id, assessment_id, type, indicator_uri, \
   checking_software_type, checking_software_name, checking_software_uri, \
   checking_software_version, process, status_uri, output, evidence";

// ─── Insert rows ─────────────────────────────────────────────────────────────

/// An indicator with its non-scalar columns already encoded.
pub struct IndicatorRow {
  pub data:               NewIndicator,
  pub keywords:           String,
  pub quality_dimensions: String,
  pub release_date:       Option<String>,
}

impl IndicatorRow {
  pub fn encode(data: NewIndicator) -> Result<Self> {
    Ok(Self {
      keywords: encode_list(&data.keywords)?,
      quality_dimensions: encode_list(&data.quality_dimensions)?,
      release_date: data.release_date.map(encode_dt),
      data,
    })
  }
}

pub struct DimensionRow {
  pub data:   NewDimension,
  pub source: String,
}

impl DimensionRow {
  pub fn encode(data: NewDimension) -> Result<Self> {
    Ok(Self { source: encode_list(&data.source)?, data })
  }
}

pub struct SoftwareRow {
  pub data:               NewSoftware,
  pub quality_dimensions: String,
  pub how_to_use:         String,
}

impl SoftwareRow {
  pub fn encode(data: NewSoftware) -> Result<Self> {
    Ok(Self {
      quality_dimensions: encode_list(&data.quality_dimensions)?,
      how_to_use: encode_list(&data.how_to_use)?,
      data,
    })
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `indicators` row.
pub struct RawIndicator {
  pub id:                 i64,
  pub identifier:         String,
  pub name:               String,
  pub description:        String,
  pub keywords:           String,
  pub status:             String,
  pub quality_dimensions: String,
  pub release_date:       Option<String>,
  pub version:            String,
  pub doi:                String,
}

impl RawIndicator {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                 row.get(0)?,
      identifier:         row.get(1)?,
      name:               row.get(2)?,
      description:        row.get(3)?,
      keywords:           row.get(4)?,
      status:             row.get(5)?,
      quality_dimensions: row.get(6)?,
      release_date:       row.get(7)?,
      version:            row.get(8)?,
      doi:                row.get(9)?,
    })
  }

  pub fn into_indicator(self) -> Result<Indicator> {
    Ok(Indicator {
      id:   self.id,
      data: NewIndicator {
        identifier:         self.identifier,
        name:               self.name,
        description:        self.description,
        keywords:           decode_list(&self.keywords)?,
        status:             Status::parse_literal(&self.status)?,
        quality_dimensions: decode_list(&self.quality_dimensions)?,
        release_date:       decode_opt_dt(self.release_date)?,
        version:            self.version,
        doi:                self.doi,
      },
    })
  }
}

pub struct RawDimension {
  pub id:          i64,
  pub identifier:  String,
  pub name:        String,
  pub description: String,
  pub source:      String,
}

impl RawDimension {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      identifier:  row.get(1)?,
      name:        row.get(2)?,
      description: row.get(3)?,
      source:      row.get(4)?,
    })
  }

  pub fn into_dimension(self) -> Result<Dimension> {
    Ok(Dimension {
      id:   self.id,
      data: NewDimension {
        identifier:  self.identifier,
        name:        self.name,
        description: self.description,
        source:      decode_list(&self.source)?,
      },
    })
  }
}

pub struct RawSoftware {
  pub id:                     i64,
  pub identifier:             String,
  pub name:                   String,
  pub description:            String,
  pub url:                    String,
  pub is_accessible_for_free: bool,
  pub quality_dimensions:     String,
  pub how_to_use:             String,
  pub license:                String,
}

impl RawSoftware {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                     row.get(0)?,
      identifier:             row.get(1)?,
      name:                   row.get(2)?,
      description:            row.get(3)?,
      url:                    row.get(4)?,
      is_accessible_for_free: row.get(5)?,
      quality_dimensions:     row.get(6)?,
      how_to_use:             row.get(7)?,
      license:                row.get(8)?,
    })
  }

  pub fn into_software(self) -> Result<Software> {
    Ok(Software {
      id:   self.id,
      data: NewSoftware {
        identifier:             self.identifier,
        name:                   self.name,
        description:            self.description,
        url:                    self.url,
        is_accessible_for_free: self.is_accessible_for_free,
        quality_dimensions:     decode_list(&self.quality_dimensions)?,
        how_to_use:             decode_list(&self.how_to_use)?,
        license:                self.license,
      },
    })
  }
}

pub fn relation_from_row(row: &Row<'_>) -> rusqlite::Result<ContentRelation> {
  Ok(ContentRelation {
    id:   row.get(0)?,
    data: NewContentRelation {
      indicator_id: row.get(1)?,
      dimension_id: row.get(2)?,
      software_id:  row.get(3)?,
    },
  })
}

// ─── Assessment rows ─────────────────────────────────────────────────────────

pub struct RawAssessment {
  pub id:           i64,
  pub context:      String,
  pub r#type:       String,
  pub name:         String,
  pub description:  String,
  pub date_created: String,
  pub license_uri:  String,
  pub created_at:   String,
  pub updated_at:   Option<String>,
}

impl RawAssessment {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      context:      row.get(1)?,
      r#type:       row.get(2)?,
      name:         row.get(3)?,
      description:  row.get(4)?,
      date_created: row.get(5)?,
      license_uri:  row.get(6)?,
      created_at:   row.get(7)?,
      updated_at:   row.get(8)?,
    })
  }

  fn into_assessment(self) -> Result<Assessment> {
    Ok(Assessment {
      id:         self.id,
      data:       AssessmentRecord {
        context:      self.context,
        r#type:       self.r#type,
        name:         self.name,
        description:  self.description,
        date_created: decode_dt(&self.date_created)?,
        license_uri:  self.license_uri,
      },
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_opt_dt(self.updated_at)?,
    })
  }
}

/// An assessment row with its children, read in one call. Only the parent
/// carries columns that need fallible decoding.
pub struct RawStoredAssessment {
  pub assessment: RawAssessment,
  pub creators:   Vec<AssessmentCreator>,
  pub software:   Option<AssessmentSoftware>,
  pub checks:     Vec<AssessmentCheck>,
}

impl RawStoredAssessment {
  pub fn into_stored(self) -> Result<StoredAssessment> {
    Ok(StoredAssessment {
      assessment: self.assessment.into_assessment()?,
      creators:   self.creators,
      software:   self.software,
      checks:     self.checks,
    })
  }
}

pub fn creator_from_row(row: &Row<'_>) -> rusqlite::Result<AssessmentCreator> {
  Ok(AssessmentCreator {
    id:            row.get(0)?,
    assessment_id: row.get(1)?,
    data:          NewCreator {
      r#type: row.get(2)?,
      name:   row.get(3)?,
      email:  row.get(4)?,
    },
  })
}

pub fn assessed_software_from_row(
  row: &Row<'_>,
) -> rusqlite::Result<AssessmentSoftware> {
  Ok(AssessmentSoftware {
    id:            row.get(0)?,
    assessment_id: row.get(1)?,
    data:          NewAssessedSoftware {
      r#type:         row.get(2)?,
      name:           row.get(3)?,
      version:        row.get(4)?,
      url:            row.get(5)?,
      identifier_uri: row.get(6)?,
    },
  })
}

pub fn check_from_row(row: &Row<'_>) -> rusqlite::Result<AssessmentCheck> {
  Ok(AssessmentCheck {
    id:            row.get(0)?,
    assessment_id: row.get(1)?,
    data:          NewCheck {
      r#type:                    row.get(2)?,
      indicator_uri:             row.get(3)?,
      checking_software_type:    row.get(4)?,
      checking_software_name:    row.get(5)?,
      checking_software_uri:     row.get(6)?,
      checking_software_version: row.get(7)?,
      process:                   row.get(8)?,
      status_uri:                row.get(9)?,
      output:                    row.get(10)?,
      evidence:                  row.get(11)?,
    },
  })
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use everse_core::vocab::{HowToUse, Keyword};

  use super::*;

  #[test]
  fn timestamps_round_trip_through_text() {
    let dt = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    assert_eq!(decode_dt(&encode_dt(dt)).unwrap(), dt);
    // Column default format.
    assert_eq!(
      decode_dt("2024-05-01T12:00:00.000Z").unwrap(),
      dt
    );
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }

  #[test]
  fn lists_are_stored_as_literals() {
    assert_eq!(
      encode_list(&[Keyword::Keyword1, Keyword::Keyword3]).unwrap(),
      r#"["keyword1","keyword3"]"#
    );
    assert_eq!(
      encode_list(&[HowToUse::Cicd, HowToUse::Cmdline]).unwrap(),
      r#"["CI/CD","command-line"]"#
    );
    let back: Vec<HowToUse> = decode_list(r#"["CI/CD"]"#).unwrap();
    assert_eq!(back, [HowToUse::Cicd]);
  }
}
