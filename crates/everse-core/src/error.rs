//! Error types for `everse-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown {vocabulary} literal: {value:?}")]
  UnknownLiteral {
    vocabulary: &'static str,
    value:      String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
