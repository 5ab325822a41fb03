//! SQLite backend for the EVERSE assessment store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. The database file is attached under
//! the configured schema name and every table is qualified with it.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{ConstraintKind, Error, Result};
pub use store::{DEFAULT_SCHEMA, SqliteStore};
