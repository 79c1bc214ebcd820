//! Handlers for `/validation` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/validation/run` | Body: [`ValidationContext`]; returns every applicable result |
//! | `GET`  | `/validation/pauta/:proposal_id` | Agenda-eligibility verdict |
//! | `GET`  | `/validation/votacao/:session_id/:proposal_id` | Vote-opening verdict |
//! | `GET`  | `/validation/relatorio` | Compliance report over in-progress proposals |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use plenario_core::{
  context::ValidationContext,
  engine::ValidationEngine,
  outcome::{
    AgendaEligibility, ComplianceReport, RuleResult, VoteEligibility,
  },
  store::LegislativeStore,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `POST /validation/run` — run a raw validation pass over a caller-built
/// context.
pub async fn run<S>(
  State(engine): State<Arc<ValidationEngine<S>>>,
  Json(ctx): Json<ValidationContext>,
) -> Json<Vec<RuleResult>>
where
  S: LegislativeStore,
{
  Json(engine.run_validation(&ctx).await)
}

/// `GET /validation/pauta/:proposal_id`
pub async fn agenda<S>(
  State(engine): State<Arc<ValidationEngine<S>>>,
  Path(proposal_id): Path<Uuid>,
) -> Json<AgendaEligibility>
where
  S: LegislativeStore,
{
  Json(engine.check_agenda_eligibility(proposal_id).await)
}

/// `GET /validation/votacao/:session_id/:proposal_id`
pub async fn vote<S>(
  State(engine): State<Arc<ValidationEngine<S>>>,
  Path((session_id, proposal_id)): Path<(Uuid, Uuid)>,
) -> Json<VoteEligibility>
where
  S: LegislativeStore,
{
  Json(engine.check_vote_eligibility(session_id, proposal_id).await)
}

/// `GET /validation/relatorio`
pub async fn report<S>(
  State(engine): State<Arc<ValidationEngine<S>>>,
) -> Result<Json<ComplianceReport>, ApiError>
where
  S: LegislativeStore,
{
  let report = engine
    .build_compliance_report()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(report))
}
