//! Fake data for exercising a store.
//!
//! Catalog rows are generated as typed inputs. Assessments are generated as
//! JSON-LD documents and go through the same validate → normalize → persist
//! path as a real ingest.

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use everse_core::{
  dimension::NewDimension,
  indicator::NewIndicator,
  relation::NewContentRelation,
  software::NewSoftware,
  store::EverseStore,
  vocab::{
    HowToUse, Keyword, Literal, QualityDimension, Status,
    dedup_preserving_order,
  },
};
use everse_jsonld::{normalize, validate_assessment};
use rand::{Rng, seq::SliceRandom};
use serde_json::{Value, json};
use tracing::{info, warn};

/// How many rows of each kind to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
  pub indicators:  usize,
  pub dimensions:  usize,
  pub software:    usize,
  pub assessments: usize,
  pub relations:   usize,
}

// ─── Word lists ──────────────────────────────────────────────────────────────

const WORDS: &[&str] = &[
  "analysis", "archive", "benchmark", "build", "citation", "code", "community",
  "coverage", "data", "dependency", "documentation", "format", "interface",
  "license", "metadata", "model", "package", "pipeline", "quality", "release",
  "repository", "research", "reuse", "schema", "software", "source", "test",
  "tool", "version", "workflow",
];

const FIRST_NAMES: &[&str] = &[
  "Ada", "Alan", "Barbara", "Edsger", "Frances", "Grace", "John", "Katherine",
  "Margaret", "Niklaus",
];

const LAST_NAMES: &[&str] = &[
  "Allen", "Dijkstra", "Hopper", "Johnson", "Knuth", "Liskov", "Lovelace",
  "Hamilton", "Turing", "Wirth",
];

const LICENSES: &[&str] = &["MIT", "GPL", "Apache-2.0"];

const INDICATOR_SLUGS: &[&str] = &[
  "has_license",
  "has_releases",
  "has_ci_tests",
  "version_control_use",
  "software_has_citation",
  "repository_workflows",
];

const STATUSES: &[&str] = &[
  "schema:CompletedActionStatus",
  "schema:FailedActionStatus",
];

// ─── Generators ──────────────────────────────────────────────────────────────

fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> &'static str {
  items.choose(rng).copied().unwrap_or_default()
}

fn words<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<&'static str> {
  (0..n).map(|_| pick(rng, WORDS)).collect()
}

fn sentence<R: Rng + ?Sized>(rng: &mut R, n: usize) -> String {
  let mut s = words(rng, n).join(" ");
  if let Some(first) = s.get_mut(..1) {
    first.make_ascii_uppercase();
  }
  s.push('.');
  s
}

/// Sentences up to roughly `max_chars`.
fn text<R: Rng + ?Sized>(rng: &mut R, max_chars: usize) -> String {
  let mut out = sentence(rng, 6);
  loop {
    let n = rng.gen_range(4..=8);
    let next = sentence(rng, n);
    if out.len() + 1 + next.len() > max_chars {
      return out;
    }
    out.push(' ');
    out.push_str(&next);
  }
}

fn sample<T: Literal + PartialEq, R: Rng + ?Sized>(rng: &mut R, max: usize) -> Vec<T> {
  let all: Vec<T> = T::iter().collect();
  let picked = (0..rng.gen_range(1..=max))
    .filter_map(|_| all.choose(rng).copied())
    .collect();
  dedup_preserving_order(picked)
}

/// A time within 2020 to 2025.
fn timestamp<R: Rng + ?Sized>(rng: &mut R) -> DateTime<Utc> {
  DateTime::from_timestamp(rng.gen_range(1_577_836_800..1_735_689_600), 0)
    .unwrap_or_default()
}

fn lexify<R: Rng + ?Sized>(rng: &mut R, n: usize) -> String {
  (0..n).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

pub fn fake_indicator<R: Rng + ?Sized>(rng: &mut R, n: i64) -> NewIndicator {
  NewIndicator {
    identifier:         format!("IND-{n:03}"),
    name:               sentence(rng, 3),
    description:        text(rng, 100),
    keywords:           sample::<Keyword, _>(rng, 3),
    status:             if rng.gen_bool(0.5) {
      Status::Active
    } else {
      Status::Deprecated
    },
    quality_dimensions: sample::<QualityDimension, _>(rng, 2),
    release_date:       Some(timestamp(rng)),
    version:            "1.0".into(),
    doi:                format!("10.1234/{}", lexify(rng, 5)),
  }
}

pub fn fake_dimension<R: Rng + ?Sized>(rng: &mut R, n: i64) -> NewDimension {
  let sources = rng.gen_range(1..=3);
  NewDimension {
    identifier:  format!("DIM-{n:03}"),
    name:        sentence(rng, 2),
    description: text(rng, 80),
    source:      words(rng, sources).into_iter().map(String::from).collect(),
  }
}

pub fn fake_software<R: Rng + ?Sized>(rng: &mut R, n: i64) -> NewSoftware {
  let name = format!("{}-{}", pick(rng, WORDS), pick(rng, WORDS));
  NewSoftware {
    identifier:             format!("SW-{n:03}"),
    url:                    format!("https://example.org/{name}"),
    name,
    description:            text(rng, 100),
    is_accessible_for_free: rng.gen_bool(0.5),
    quality_dimensions:     sample::<QualityDimension, _>(rng, 3),
    how_to_use:             sample::<HowToUse, _>(rng, 2),
    license:                pick(rng, LICENSES).into(),
  }
}

fn fake_check<R: Rng + ?Sized>(rng: &mut R) -> Value {
  let tool = pick(rng, &["howfairis", "somef", "rsfc"]);
  let output = match rng.gen_range(0..3) {
    0 => rng.gen_bool(0.5).to_string(),
    1 => format!("{:.2}", rng.gen_range(0.0..100.0)),
    _ => sentence(rng, 4),
  };
  json!({
    "@type": "CheckResult",
    "assessesIndicator": {
      "@id": format!(
        "https://w3id.org/everse/i/indicators/{}",
        pick(rng, INDICATOR_SLUGS)
      ),
    },
    "checkingSoftware": {
      "@type": "schema:SoftwareApplication",
      "name": tool,
      "@id": format!("https://w3id.org/everse/tools/{tool}"),
      "softwareVersion":
        format!("0.{}.{}", rng.gen_range(1..20), rng.gen_range(0..10)),
    },
    "status": { "@id": pick(rng, STATUSES) },
    "output": output,
  })
}

/// A complete assessment document with one to three creators and one to
/// four checks.
pub fn fake_assessment<R: Rng + ?Sized>(rng: &mut R, n: i64) -> Value {
  let creators: Vec<Value> = (0..rng.gen_range(1..=3))
    .map(|_| {
      let first = pick(rng, FIRST_NAMES);
      let last = pick(rng, LAST_NAMES);
      json!({
        "@type": "schema:Person",
        "name": format!("{first} {last}"),
        "email": format!("{first}.{last}@example.org").to_lowercase(),
      })
    })
    .collect();
  let checks: Vec<Value> =
    (0..rng.gen_range(1..=4)).map(|_| fake_check(rng)).collect();
  let software = format!("{}-{}", pick(rng, WORDS), pick(rng, WORDS));

  json!({
    "@context": "https://w3id.org/everse/rsqa/0.0.1/",
    "@type": "SoftwareQualityAssessment",
    "name": format!("Quality Assessment #{n}"),
    "description": text(rng, 120),
    "creator": creators,
    "dateCreated": timestamp(rng).to_rfc3339(),
    "license": { "@id": "https://creativecommons.org/publicdomain/zero/1.0/" },
    "assessedSoftware": {
      "@type": "schema:SoftwareApplication",
      "name": software,
      "softwareVersion":
        format!("{}.{}.0", rng.gen_range(0..4), rng.gen_range(0..10)),
      "url": format!("https://example.org/{software}"),
      "schema:identifier": {
        "@id": format!("https://doi.org/10.1234/{}", lexify(rng, 5)),
      },
    },
    "checks": checks,
  })
}

// ─── Run ─────────────────────────────────────────────────────────────────────

fn next_number(ids: impl Iterator<Item = i64>) -> i64 {
  ids.max().unwrap_or(0) + 1
}

/// Insert `counts` fake rows. Each entity batch is its own unit of work, and
/// numbering continues after the rows already present so identifiers stay
/// unique across runs.
pub async fn populate<S, R>(
  store: &S,
  counts: Counts,
  rng: &mut R,
) -> anyhow::Result<()>
where
  S: EverseStore,
  R: Rng + ?Sized,
{
  let first = next_number(store.list_indicators().await?.iter().map(|i| i.id));
  let batch = (0..counts.indicators as i64)
    .map(|i| fake_indicator(rng, first + i))
    .collect();
  let n = store.insert_indicators(batch).await.context("inserting indicators")?;
  info!(count = n.len(), "indicators added");

  let first = next_number(store.list_dimensions().await?.iter().map(|d| d.id));
  let batch = (0..counts.dimensions as i64)
    .map(|i| fake_dimension(rng, first + i))
    .collect();
  let n = store.insert_dimensions(batch).await.context("inserting dimensions")?;
  info!(count = n.len(), "dimensions added");

  let first = next_number(store.list_software().await?.iter().map(|s| s.id));
  let batch = (0..counts.software as i64)
    .map(|i| fake_software(rng, first + i))
    .collect();
  let n = store.insert_software(batch).await.context("inserting software")?;
  info!(count = n.len(), "software added");

  let first =
    next_number(store.list_assessments().await?.iter().map(|a| a.assessment.id));
  for i in 0..counts.assessments as i64 {
    let raw = fake_assessment(rng, first + i);
    let doc = validate_assessment(&raw).context("generated assessment")?;
    store
      .insert_assessment(normalize(&doc))
      .await
      .context("inserting assessment")?;
  }
  info!(count = counts.assessments, "assessments added");

  let indicators: Vec<i64> =
    store.list_indicators().await?.iter().map(|i| i.id).collect();
  let dimensions: Vec<i64> =
    store.list_dimensions().await?.iter().map(|d| d.id).collect();
  let software: Vec<i64> =
    store.list_software().await?.iter().map(|s| s.id).collect();

  if counts.relations > 0
    && (indicators.is_empty() || dimensions.is_empty() || software.is_empty())
  {
    warn!("content relations skipped: a parent table is empty");
    return Ok(());
  }

  let batch = (0..counts.relations)
    .filter_map(|_| {
      Some(NewContentRelation {
        indicator_id: *indicators.choose(rng)?,
        dimension_id: *dimensions.choose(rng)?,
        software_id:  *software.choose(rng)?,
      })
    })
    .collect();
  let n = store
    .insert_content_relations(batch)
    .await
    .context("inserting content relations")?;
  info!(count = n.len(), "content relations added");

  Ok(())
}
