//! Rule evaluators — one module per rule family.
//!
//! Shared contract: `Ok(None)` means the rule does not apply to the given
//! context (a required context field is missing or the referenced entity
//! does not exist), which is distinct from a violation. Evaluators never
//! fail on missing data; the only errors they surface are the store's own.

mod deadline;
mod impediment;
mod initiative;
mod interstice;
mod publicity;
mod quorum;
mod routing;
mod voting;

pub use deadline::effective_severity;
pub use quorum::required_presence;

use crate::{
  context::ValidationContext,
  outcome::{Evidence, RuleResult},
  rule::{RuleConditions, RuleDefinition},
  store::LegislativeStore,
};

/// Dispatch `rule` to the evaluator for its condition payload.
pub async fn evaluate<S: LegislativeStore>(
  rule: &RuleDefinition,
  ctx: &ValidationContext,
  store: &S,
) -> Result<Option<RuleResult>, S::Error> {
  match &rule.conditions {
    RuleConditions::Quorum(c) => quorum::evaluate(rule, c, ctx, store).await,
    RuleConditions::Deadline(c) => {
      deadline::evaluate(rule, c, ctx, store).await
    }
    RuleConditions::Interstice(c) => {
      interstice::evaluate(rule, c, ctx, store).await
    }
    RuleConditions::Routing(c) => routing::evaluate(rule, c, ctx, store).await,
    RuleConditions::Voting(c) => voting::evaluate(rule, c, ctx, store).await,
    RuleConditions::Initiative(c) => {
      initiative::evaluate(rule, c, ctx, store).await
    }
    RuleConditions::Impediment(c) => {
      impediment::evaluate(rule, c, ctx, store).await
    }
    RuleConditions::Publicity(c) => {
      publicity::evaluate(rule, c, ctx, store).await
    }
  }
}

/// Result for a structurally-defined check whose evaluation is not
/// implemented: reports compliant and flags the gap in `details`, so the
/// gap stays visible in every result stream instead of silently vanishing.
fn not_evaluated(rule: &RuleDefinition, missing: &str) -> RuleResult {
  let mut result = RuleResult::new(
    rule,
    true,
    format!("{}: verificação automática não implementada", rule.name),
    Evidence::NotEvaluated,
  );
  result.details =
    Some(format!("Verificação pendente de implementação: {missing}"));
  result
}
