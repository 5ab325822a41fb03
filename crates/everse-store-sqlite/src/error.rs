//! Error type for `everse-store-sqlite`.

use everse_core::store::{StoreError, StoreErrorKind};
use rusqlite::{ErrorCode, ffi};
use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// Which rule the engine enforced when it rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ConstraintKind {
  Unique,
  ForeignKey,
  NotNull,
  Check,
  /// A schema trigger aborted the statement.
  Trigger,
  Other,
}

impl ConstraintKind {
  fn from_extended_code(code: i32) -> Self {
    match code {
      ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
        Self::Unique
      }
      ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Self::ForeignKey,
      ffi::SQLITE_CONSTRAINT_NOTNULL => Self::NotNull,
      ffi::SQLITE_CONSTRAINT_CHECK => Self::Check,
      ffi::SQLITE_CONSTRAINT_TRIGGER => Self::Trigger,
      _ => Self::Other,
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  /// The write was rejected and its transaction rolled back.
  #[error("constraint violation ({kind}): {message}")]
  ConstraintViolation { kind: ConstraintKind, message: String },

  /// The database cannot be opened or the schema is absent.
  #[error("store unavailable: {0}")]
  Connectivity(String),

  #[error("invalid schema name {0:?}; expected [A-Za-z_][A-Za-z0-9_]*")]
  InvalidSchemaName(String),

  #[error("{entity} {id} not found")]
  NotFound { entity: &'static str, id: i64 },

  #[error("core error: {0}")]
  Core(#[from] everse_core::Error),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self {
    if let rusqlite::Error::SqliteFailure(err, msg) = &e {
      let message = msg.clone().unwrap_or_else(|| err.to_string());
      if err.code == ErrorCode::ConstraintViolation {
        return Self::ConstraintViolation {
          kind: ConstraintKind::from_extended_code(err.extended_code),
          message,
        };
      }
      if matches!(err.code, ErrorCode::CannotOpen | ErrorCode::NotADatabase)
        || message.starts_with("no such table")
        || message.starts_with("unknown database")
      {
        return Self::Connectivity(message);
      }
    }
    Self::Database(tokio_rusqlite::Error::Rusqlite(e))
  }
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    match e {
      tokio_rusqlite::Error::Rusqlite(e) => Self::from(e),
      tokio_rusqlite::Error::ConnectionClosed => {
        Self::Connectivity("connection closed".to_owned())
      }
      other => Self::Database(other),
    }
  }
}

impl StoreError for Error {
  fn kind(&self) -> StoreErrorKind {
    match self {
      Self::ConstraintViolation { .. } => StoreErrorKind::Constraint,
      Self::Connectivity(_) | Self::InvalidSchemaName(_) => {
        StoreErrorKind::Connectivity
      }
      Self::NotFound { .. } => StoreErrorKind::NotFound,
      Self::Core(_) | Self::Database(_) | Self::Json(_) | Self::DateParse(_) => {
        StoreErrorKind::Internal
      }
    }
  }

  fn constraint(&self) -> Option<&'static str> {
    match self {
      Self::ConstraintViolation { kind, .. } => Some((*kind).into()),
      _ => None,
    }
  }
}
