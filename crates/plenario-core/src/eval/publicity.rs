//! Publication-transparency deadlines.
//!
//! The days-since-approval check is not implemented: the read model does
//! not carry publication dates for vote results or session minutes. The
//! rule reports compliant and flags the gap.

use crate::{
  context::ValidationContext,
  outcome::RuleResult,
  rule::{PublicityConditions, RuleDefinition},
  store::LegislativeStore,
};

pub(super) async fn evaluate<S: LegislativeStore>(
  rule: &RuleDefinition,
  _conditions: &PublicityConditions,
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
    "contagem de dias desde a aprovação até a publicação",
  )))
}
