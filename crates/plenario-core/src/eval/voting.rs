//! Voting-method constraints per matter type.
//!
//! The method-versus-matter check is not implemented: the read model does
//! not carry the configured voting method of a matéria yet. The rule
//! reports compliant and flags the gap.

use crate::{
  context::ValidationContext,
  outcome::RuleResult,
  rule::{RuleDefinition, VotingConditions},
  store::LegislativeStore,
};

pub(super) async fn evaluate<S: LegislativeStore>(
  rule: &RuleDefinition,
  _conditions: &VotingConditions,
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
    "confronto entre o método de votação configurado e a matéria",
  )))
}
