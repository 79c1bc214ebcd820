//! Quorum evaluation: attendance thresholds per quorum kind.

use crate::{
  context::ValidationContext,
  outcome::{Evidence, RuleResult},
  rule::{QuorumConditions, QuorumKind, RuleDefinition},
  store::LegislativeStore,
};

/// The attendance count `kind` requires, given the chamber size and the
/// number present.
///
/// A simple quorum is a majority of the legislators in the room, so any
/// non-empty attendance satisfies it.
pub fn required_presence(kind: QuorumKind, total: u32, present: u32) -> u32 {
  match kind {
    QuorumKind::Absolute => total / 2 + 1,
    QuorumKind::Qualified => (total * 2).div_ceil(3),
    QuorumKind::Simple => present / 2 + 1,
  }
}

pub(super) async fn evaluate<S: LegislativeStore>(
  rule: &RuleDefinition,
  conditions: &QuorumConditions,
  ctx: &ValidationContext,
  store: &S,
) -> Result<Option<RuleResult>, S::Error> {
  let Some(session_id) = ctx.session_id else {
    return Ok(None);
  };
  let Some(session) = store.get_session(session_id).await? else {
    return Ok(None);
  };

  let total = store.count_active_legislators().await?;
  let present = session.present_count();
  let required = required_presence(conditions.kind, total, present);
  let satisfied = present >= required;

  let message = if satisfied {
    format!("Quórum atingido: {present} presentes, {required} exigidos")
  } else {
    format!("Quórum insuficiente: {present} presentes, {required} exigidos")
  };

  Ok(Some(RuleResult::new(
    rule,
    satisfied,
    message,
    Evidence::Quorum {
      present,
      total,
      required,
    },
  )))
}
