//! Core types and trait definitions for the EVERSE software-quality data
//! layer.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! JSON-LD codec (`everse-jsonld`) produces the `New*` input types defined
//! here, and storage backends (e.g. `everse-store-sqlite`) implement
//! [`store::EverseStore`].

// Native `async fn` in traits; see `store.rs`.
#![allow(async_fn_in_trait)]

pub mod assessment;
pub mod dimension;
pub mod error;
pub mod indicator;
pub mod relation;
pub mod software;
pub mod store;
pub mod vocab;

pub use error::{Error, Result};
