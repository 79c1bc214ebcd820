//! Exclusive-initiative check: certain subject matters may only originate
//! from the executive branch.

use crate::{
  context::ValidationContext,
  outcome::{Evidence, RuleResult},
  rule::{InitiativeConditions, RuleDefinition},
  store::LegislativeStore,
};

pub(super) async fn evaluate<S: LegislativeStore>(
  rule: &RuleDefinition,
  conditions: &InitiativeConditions,
  ctx: &ValidationContext,
  store: &S,
) -> Result<Option<RuleResult>, S::Error> {
  let Some(id) = ctx.proposal_id else {
    return Ok(None);
  };
  let Some(proposal) = store.get_proposal(id).await? else {
    return Ok(None);
  };

  let kind = proposal.kind.to_lowercase();
  let summary = proposal.summary.to_lowercase();
  let Some(matched) = conditions.exclusive_subjects.iter().find(|subject| {
    let needle = subject.to_lowercase();
    kind.contains(&needle) || summary.contains(&needle)
  }) else {
    // No privileged subject involved; the rule does not apply.
    return Ok(None);
  };

  // A null author marks an executive-originated proposal.
  let satisfied = proposal.author_id.is_none();

  let message = if satisfied {
    format!("Matéria de iniciativa privativa ({matched}) originada do Executivo")
  } else {
    format!("Matéria de iniciativa privativa ({matched}) proposta por parlamentar")
  };

  Ok(Some(RuleResult::new(
    rule,
    satisfied,
    message,
    Evidence::Initiative {
      matched_subject: matched.clone(),
      author_id: proposal.author_id,
    },
  )))
}
