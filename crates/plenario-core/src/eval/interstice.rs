//! Interstício between votes of the same proposal.
//!
//! The minimum spans are configured in the catalog, but the comparison
//! against prior per-round vote timestamps is not implemented: the upstream
//! process never recorded the round-by-round vote times this check needs.
//! The rule reports compliant and flags the gap.

use crate::{
  context::ValidationContext,
  outcome::RuleResult,
  rule::{IntersticeConditions, RuleDefinition},
  store::LegislativeStore,
};

pub(super) async fn evaluate<S: LegislativeStore>(
  rule: &RuleDefinition,
  _conditions: &IntersticeConditions,
  ctx: &ValidationContext,
  store: &S,
) -> Result<Option<RuleResult>, S::Error> {
  let Some(id) = ctx.proposal_id else {
    return Ok(None);
  };
  if store.get_proposal(id).await?.is_none() {
    return Ok(None);
  }

  Ok(Some(super::not_evaluated(
    rule,
    "comparação entre as datas dos turnos de votação",
  )))
}
