//! Layered settings: built-in defaults, then the optional config file, then
//! `EVERSE_*` environment variables.

use std::path::{Path, PathBuf};

use everse_store_sqlite::DEFAULT_SCHEMA;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite database file. A leading `~/` is expanded.
  pub store_path:  PathBuf,
  /// Identifier every table is qualified with.
  pub schema_name: String,
  pub host:        String,
  pub port:        u16,
}

impl Settings {
  /// Load settings from `path`, which may be absent. The format follows the
  /// file extension (TOML, JSON or YAML).
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("store_path", "everse.db")?
      .set_default("schema_name", DEFAULT_SCHEMA)?
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8088)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("EVERSE").try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply_without_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings.store_path, PathBuf::from("everse.db"));
    assert_eq!(settings.schema_name, "everse");
    assert_eq!(settings.address(), "0.0.0.0:8088");
  }

  #[test]
  fn file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("everse.toml");
    std::fs::write(
      &path,
      "store_path = \"/var/lib/everse/qa.db\"\nschema_name = \"qa\"\nport = 9000\n",
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.store_path(), PathBuf::from("/var/lib/everse/qa.db"));
    assert_eq!(settings.schema_name, "qa");
    assert_eq!(settings.host, "0.0.0.0");
    assert_eq!(settings.port, 9000);
  }

  #[test]
  fn json_files_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("everse.json");
    std::fs::write(&path, r#"{ "host": "127.0.0.1" }"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.address(), "127.0.0.1:8088");
  }

  #[test]
  fn tilde_is_expanded() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/everse.db")),
      PathBuf::from(home).join("everse.db")
    );
    assert_eq!(expand_tilde(Path::new("/tmp/x.db")), PathBuf::from("/tmp/x.db"));
  }
}
