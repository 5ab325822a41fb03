//! JSON REST API for EVERSE assessment data.
//!
//! Exposes an axum [`Router`] backed by any [`everse_core::store::EverseStore`].
//! Inbound documents go through the same validate → normalize → persist
//! pipeline as the command-line ingest. Auth, TLS, and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", everse_api::api_router(store.clone()))
//! ```

pub mod assessments;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod indicators;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use everse_core::store::EverseStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: EverseStore + 'static,
{
  Router::new()
    // Assessments
    .route(
      "/assessments",
      get(assessments::list::<S>).post(assessments::create::<S>),
    )
    .route(
      "/assessments/{id}",
      get(assessments::export::<S>).delete(assessments::delete::<S>),
    )
    .route("/assessments/{id}/summary", get(assessments::summary::<S>))
    // Indicators
    .route(
      "/indicators",
      get(indicators::list::<S>).post(indicators::create::<S>),
    )
    .route(
      "/indicators/{id}",
      get(indicators::get_one::<S>).delete(indicators::delete::<S>),
    )
    .route("/indicators/{id}/deprecate", post(indicators::deprecate::<S>))
    // Dimensions
    .route(
      "/dimensions",
      get(catalog::list_dimensions::<S>).post(catalog::create_dimension::<S>),
    )
    .route("/dimensions/{id}", delete(catalog::delete_dimension::<S>))
    // Software
    .route(
      "/software",
      get(catalog::list_software::<S>).post(catalog::create_software::<S>),
    )
    .route("/software/{id}", delete(catalog::delete_software::<S>))
    // Content relations
    .route(
      "/content-relations",
      get(catalog::list_relations::<S>).post(catalog::create_relation::<S>),
    )
    .route("/content-relations/{id}", delete(catalog::delete_relation::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests;
