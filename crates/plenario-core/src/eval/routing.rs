//! Tramitação checks: committee passage and recorded opinions.

use crate::{
  context::ValidationContext,
  outcome::{Evidence, RuleResult},
  record::UnitKind,
  rule::{RoutingCheck, RoutingConditions, RuleDefinition},
  store::LegislativeStore,
};

pub(super) async fn evaluate<S: LegislativeStore>(
  rule: &RuleDefinition,
  conditions: &RoutingConditions,
  ctx: &ValidationContext,
  store: &S,
) -> Result<Option<RuleResult>, S::Error> {
  let Some(id) = ctx.proposal_id else {
    return Ok(None);
  };
  let Some(proposal) = store.get_proposal(id).await? else {
    return Ok(None);
  };

  let steps = proposal.routing.len();
  let committee_opinions = proposal
    .routing
    .iter()
    .filter(|step| {
      step.opinion.is_some()
        && step
          .unit
          .as_ref()
          .is_some_and(|unit| unit.kind == UnitKind::Committee)
    })
    .count();
  let opinions = proposal
    .routing
    .iter()
    .filter(|step| step.opinion.is_some())
    .count();

  let satisfied = match conditions.check {
    RoutingCheck::CommitteeOpinion => committee_opinions > 0,
    RoutingCheck::AnyOpinion => opinions > 0,
  };

  let message = match (conditions.check, satisfied) {
    (RoutingCheck::CommitteeOpinion, true) => {
      "Passagem por comissão com parecer registrado".to_string()
    }
    (RoutingCheck::CommitteeOpinion, false) => {
      "Nenhuma passagem por comissão com parecer registrado".to_string()
    }
    (RoutingCheck::AnyOpinion, true) => {
      "Parecer registrado na tramitação".to_string()
    }
    (RoutingCheck::AnyOpinion, false) => {
      "Nenhum parecer registrado na tramitação".to_string()
    }
  };

  Ok(Some(RuleResult::new(
    rule,
    satisfied,
    message,
    Evidence::Routing {
      steps,
      committee_opinions,
      opinions,
    },
  )))
}
