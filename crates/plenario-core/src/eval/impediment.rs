//! Conflict-of-interest impediments.

use crate::{
  context::ValidationContext,
  outcome::{Evidence, RuleResult},
  rule::{ImpedimentConditions, ImpedimentScope, RuleDefinition},
  store::LegislativeStore,
};

pub(super) async fn evaluate<S: LegislativeStore>(
  rule: &RuleDefinition,
  conditions: &ImpedimentConditions,
  ctx: &ValidationContext,
  store: &S,
) -> Result<Option<RuleResult>, S::Error> {
  let (Some(proposal_id), Some(legislator_id)) =
    (ctx.proposal_id, ctx.legislator_id)
  else {
    return Ok(None);
  };
  let Some(proposal) = store.get_proposal(proposal_id).await? else {
    return Ok(None);
  };

  match conditions.scope {
    ImpedimentScope::SelfVote => {
      let satisfied = proposal.author_id != Some(legislator_id);
      let message = if satisfied {
        "Parlamentar não é autor da matéria".to_string()
      } else {
        "Autor da matéria impedido de votar em causa própria".to_string()
      };

      Ok(Some(RuleResult::new(
        rule,
        satisfied,
        message,
        Evidence::Impediment {
          author_id: proposal.author_id,
          legislator_id,
        },
      )))
    }
    // The broader personal/family/business-interest check depends on
    // declarations the read model does not carry.
    ImpedimentScope::PersonalInterest => Ok(Some(super::not_evaluated(
      rule,
      "cruzamento de declarações de interesse do vereador",
    ))),
  }
}
