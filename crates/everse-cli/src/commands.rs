//! Subcommand implementations.

use std::{path::Path, sync::Arc};

use anyhow::{Context as _, bail};
use everse_core::store::{EverseStore, StoreError as _};
use everse_jsonld::{
  DocumentKind, ValidatedDocument, denormalize, normalize, summarize, to_json,
};
use everse_store_sqlite::SqliteStore;
use rand::{SeedableRng as _, rngs::StdRng};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
  config::Settings,
  populate::{self, Counts},
  table,
};

// ─── Store access ────────────────────────────────────────────────────────────

/// Open the store, creating the file and tables if needed.
async fn open(settings: &Settings) -> anyhow::Result<SqliteStore> {
  let path = settings.store_path();
  SqliteStore::open(&path, &settings.schema_name)
    .await
    .with_context(|| format!("failed to open store at {}", path.display()))
}

/// Attach an existing, initialised store.
async fn connect(settings: &Settings) -> anyhow::Result<SqliteStore> {
  let path = settings.store_path();
  SqliteStore::connect(&path, &settings.schema_name)
    .await
    .with_context(|| {
      format!(
        "failed to connect to store at {}; run `everse init`",
        path.display()
      )
    })
}

async fn print_all<S: EverseStore>(store: &S) -> anyhow::Result<()> {
  println!("{}", table::indicators(&store.list_indicators().await?));
  println!("{}", table::dimensions(&store.list_dimensions().await?));
  println!("{}", table::software(&store.list_software().await?));
  let summaries: Vec<_> =
    store.list_assessments().await?.iter().map(summarize).collect();
  println!("{}", table::assessments(&summaries));
  println!("{}", table::relations(&store.list_content_relations().await?));
  Ok(())
}

// ─── Commands ────────────────────────────────────────────────────────────────

pub async fn init(settings: &Settings) -> anyhow::Result<()> {
  let store = open(settings).await?;
  let tables = store.describe_tables().await?;
  println!(
    "Schema {:?} ready at {} ({} tables)\n",
    store.schema(),
    settings.store_path().display(),
    tables.len()
  );
  for info in &tables {
    println!("{}", table::columns(info));
  }
  Ok(())
}

pub async fn clear(settings: &Settings) -> anyhow::Result<()> {
  let store = open(settings).await?;
  store.clear().await.context("failed to clear the store")?;
  println!("All entries removed; no new entries were added.");
  Ok(())
}

pub async fn populate(
  settings: &Settings,
  counts: Counts,
) -> anyhow::Result<()> {
  let store = open(settings).await?;
  let mut rng = StdRng::from_entropy();
  populate::populate(&store, counts, &mut rng).await?;
  print_all(&store).await
}

pub async fn show(settings: &Settings) -> anyhow::Result<()> {
  print_all(&connect(settings).await?).await
}

pub async fn ingest(
  settings: &Settings,
  kind: DocumentKind,
  file: &Path,
) -> anyhow::Result<()> {
  let raw = std::fs::read_to_string(file)
    .with_context(|| format!("failed to read {}", file.display()))?;
  let value: Value = serde_json::from_str(&raw)
    .with_context(|| format!("{} is not valid JSON", file.display()))?;

  let doc = match everse_jsonld::validate(kind, &value) {
    Ok(doc) => doc,
    Err(everse_jsonld::Error::Validation(errors)) => {
      eprintln!("stage: validation");
      for field in &errors.fields {
        eprintln!("  {field}");
      }
      bail!(
        "{} rejected: {} invalid field(s)",
        file.display(),
        errors.fields.len()
      );
    }
    Err(e) => return Err(e).context("stage: validation"),
  };

  let store = open(settings).await?;
  let stored = match doc {
    ValidatedDocument::Assessment(doc) => {
      let stored = store.insert_assessment(normalize(&doc)).await;
      stored.map(|a| {
        let s = summarize(&a);
        format!(
          "assessment {} {:?}: {} check(s) by {}",
          s.id, s.name, s.check_count, s.creator_names
        )
      })
    }
    ValidatedDocument::Indicator(input) => store
      .add_indicator(input)
      .await
      .map(|i| format!("indicator {} {}", i.id, i.data.identifier)),
    ValidatedDocument::Dimension(input) => store
      .add_dimension(input)
      .await
      .map(|d| format!("dimension {} {}", d.id, d.data.identifier)),
    ValidatedDocument::Software(input) => store
      .add_software(input)
      .await
      .map(|s| format!("software {} {}", s.id, s.data.identifier)),
  };

  match stored {
    Ok(line) => {
      println!("stored {line}");
      Ok(())
    }
    Err(e) => {
      eprintln!("stage: persistence");
      if let Some(constraint) = e.constraint() {
        eprintln!("  constraint: {constraint}");
      }
      Err(e).with_context(|| format!("{} not persisted", file.display()))
    }
  }
}

pub async fn export(settings: &Settings, id: i64) -> anyhow::Result<()> {
  let store = connect(settings).await?;
  let Some(stored) = store.get_assessment(id).await? else {
    bail!("assessment {id} not found");
  };
  let doc = denormalize(&stored).context("stage: normalization")?;
  println!("{}", to_json(&doc)?);
  Ok(())
}

pub async fn delete_assessment(
  settings: &Settings,
  id: i64,
) -> anyhow::Result<()> {
  let store = connect(settings).await?;
  if !store.delete_assessment(id).await? {
    bail!("assessment {id} not found");
  }
  println!("deleted assessment {id}");
  Ok(())
}

pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
  let store = open(settings).await?;
  let app = everse_api::api_router(Arc::new(store))
    .layer(TraceLayer::new_for_http());

  let address = settings.address();
  info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  fn settings(dir: &Path) -> Settings {
    Settings {
      store_path:  dir.join("everse.db"),
      schema_name: "qa".into(),
      host:        "127.0.0.1".into(),
      port:        0,
    }
  }

  fn write(dir: &Path, name: &str, value: Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, value.to_string()).unwrap();
    path
  }

  fn assessment() -> Value {
    serde_json::json!({
      "@context": "https://w3id.org/everse/rsqa/0.0.1/",
      "@type": "SoftwareQualityAssessment",
      "name": "Quality Assessment #1",
      "description": "Automated checks.",
      "creator": { "name": "Ada Lovelace" },
      "dateCreated": "2024-05-01T12:00:00Z",
      "license": { "@id": "https://creativecommons.org/publicdomain/zero/1.0/" },
      "assessedSoftware": { "name": "analytical-engine" },
      "checks": {
        "assessesIndicator": { "@id": "https://w3id.org/everse/i/indicators/license" },
        "checkingSoftware": { "name": "howfairis" },
        "status": { "@id": "schema:CompletedActionStatus" },
      },
    })
  }

  #[tokio::test]
  async fn ingest_then_delete() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());
    let file = write(dir.path(), "a.jsonld", assessment());

    ingest(&settings, DocumentKind::Assessment, &file).await.unwrap();
    export(&settings, 1).await.unwrap();

    let store = connect(&settings).await.unwrap();
    let stored = store.get_assessment(1).await.unwrap().unwrap();
    assert_eq!(summarize(&stored).creator_names, "Ada Lovelace");

    delete_assessment(&settings, 1).await.unwrap();
    assert!(delete_assessment(&settings, 1).await.is_err());
  }

  #[tokio::test]
  async fn invalid_document_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());
    let mut doc = assessment();
    doc.as_object_mut().unwrap().remove("dateCreated");
    let file = write(dir.path(), "bad.jsonld", doc);

    let err = ingest(&settings, DocumentKind::Assessment, &file)
      .await
      .unwrap_err();
    assert!(err.to_string().contains("1 invalid field"));
    assert!(!settings.store_path().exists());
  }

  #[tokio::test]
  async fn duplicate_software_is_a_persistence_failure() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());
    let file = write(
      dir.path(),
      "sw.json",
      serde_json::json!({
        "identifier": "SW-001",
        "name": "howfairis",
        "description": "Checks the fair-software recommendations.",
        "url": "https://github.com/fair-software/howfairis",
        "isAccessibleForFree": true,
        "howToUse": ["cmdline"],
        "license": "Apache-2.0",
      }),
    );

    ingest(&settings, DocumentKind::Software, &file).await.unwrap();
    let err = ingest(&settings, DocumentKind::Software, &file)
      .await
      .unwrap_err();
    assert!(err.to_string().contains("not persisted"));

    let store = connect(&settings).await.unwrap();
    assert_eq!(store.list_software().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn show_needs_an_initialised_store() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());
    assert!(show(&settings).await.is_err());

    init(&settings).await.unwrap();
    show(&settings).await.unwrap();
  }

  #[tokio::test]
  async fn clear_restarts_ids() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());
    let counts = Counts {
      indicators:  2,
      dimensions:  0,
      software:    0,
      assessments: 1,
      relations:   0,
    };
    populate(&settings, counts).await.unwrap();
    clear(&settings).await.unwrap();
    populate(&settings, counts).await.unwrap();

    let store = connect(&settings).await.unwrap();
    let ids: Vec<_> =
      store.list_indicators().await.unwrap().iter().map(|i| i.id).collect();
    assert_eq!(ids, [1, 2]);
  }
}
