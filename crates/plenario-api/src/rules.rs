//! Handler for `GET /rules`.

use std::sync::Arc;

use axum::{Json, extract::State};
use plenario_core::{
  engine::ValidationEngine, rule::RuleDefinition, store::LegislativeStore,
};

/// `GET /rules` — the full catalog, active and inactive rules alike.
pub async fn list<S>(
  State(engine): State<Arc<ValidationEngine<S>>>,
) -> Json<Vec<RuleDefinition>>
where
  S: LegislativeStore,
{
  Json(engine.catalog().rules().to_vec())
}
