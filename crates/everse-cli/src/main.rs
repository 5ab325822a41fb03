//! `everse` — command-line tool for the EVERSE software-quality data layer.
//!
//! Reads `everse.toml` (or the path given with `--config`) and
//! `EVERSE_*` environment variables, then runs one subcommand against the
//! configured SQLite store.
//!
//! # Usage
//!
//! ```text
//! everse init
//! everse populate --num-indicator 10 --num-assessment 3
//! everse ingest assessment.jsonld
//! everse ingest --kind software tool.json
//! everse show
//! everse serve
//! ```

mod commands;
mod config;
mod populate;
mod table;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use everse_jsonld::DocumentKind;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{config::Settings, populate::Counts};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "EVERSE software-quality data layer")]
struct Cli {
  /// Path to the configuration file (TOML, JSON or YAML).
  #[arg(short, long, default_value = "everse.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create the schema and tables, then print every table's columns.
  Init,

  /// Insert fake data, or with `--clear` only empty every table.
  Populate(PopulateArgs),

  /// Validate, normalize and persist one JSON document.
  Ingest {
    /// What the document describes.
    #[arg(long, default_value_t = DocumentKind::Assessment)]
    kind: DocumentKind,

    file: PathBuf,
  },

  /// Print every table.
  Show,

  /// Print an assessment as a JSON-LD document.
  Export { id: i64 },

  /// Delete an assessment together with its creators, software and checks.
  DeleteAssessment { id: i64 },

  /// Serve the HTTP API.
  Serve,
}

#[derive(Args)]
struct PopulateArgs {
  #[arg(long, default_value_t = 5)]
  num_indicator:        usize,
  #[arg(long, default_value_t = 5)]
  num_dimension:        usize,
  #[arg(long, default_value_t = 5)]
  num_software:         usize,
  #[arg(long, default_value_t = 5)]
  num_assessment:       usize,
  #[arg(long, default_value_t = 5)]
  num_content_relation: usize,

  /// Remove all rows, restart ids and add nothing.
  #[arg(long)]
  clear: bool,
}

impl PopulateArgs {
  fn counts(&self) -> Counts {
    Counts {
      indicators:  self.num_indicator,
      dimensions:  self.num_dimension,
      software:    self.num_software,
      assessments: self.num_assessment,
      relations:   self.num_content_relation,
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(&cli.config).with_context(|| {
    format!("failed to load configuration from {}", cli.config.display())
  })?;

  match cli.command {
    Command::Init => commands::init(&settings).await,
    Command::Populate(args) if args.clear => commands::clear(&settings).await,
    Command::Populate(args) => commands::populate(&settings, args.counts()).await,
    Command::Ingest { kind, file } => {
      commands::ingest(&settings, kind, &file).await
    }
    Command::Show => commands::show(&settings).await,
    Command::Export { id } => commands::export(&settings, id).await,
    Command::DeleteAssessment { id } => {
      commands::delete_assessment(&settings, id).await
    }
    Command::Serve => commands::serve(&settings).await,
  }
}
