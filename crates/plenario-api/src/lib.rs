//! JSON REST API for the Plenário validation engine.
//!
//! Exposes an axum [`Router`] backed by any
//! [`plenario_core::store::LegislativeStore`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", plenario_api::api_router(engine.clone()))
//! ```

pub mod error;
pub mod rules;
pub mod validation;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use plenario_core::{engine::ValidationEngine, store::LegislativeStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(engine: Arc<ValidationEngine<S>>) -> Router<()>
where
  S: LegislativeStore + 'static,
{
  Router::new()
    // Catalog
    .route("/rules", get(rules::list::<S>))
    // Validation
    .route("/validation/run", post(validation::run::<S>))
    .route("/validation/pauta/{proposal_id}", get(validation::agenda::<S>))
    .route(
      "/validation/votacao/{session_id}/{proposal_id}",
      get(validation::vote::<S>),
    )
    .route("/validation/relatorio", get(validation::report::<S>))
    .with_state(engine)
}

// ─── Integration tests ────────────────────────────────────────────────────────
