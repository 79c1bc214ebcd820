//! Deadline (prazo) evaluation with time-based severity escalation.

use chrono::{DateTime, Duration, Utc};

use crate::{
  context::ValidationContext,
  outcome::{Evidence, RuleResult},
  rule::{
    DeadlineAnchor, DeadlineConditions, DeadlineSpan, RuleDefinition,
    Severity,
  },
  store::LegislativeStore,
  temporal,
};

/// Days-remaining window below which an approaching deadline stops counting
/// as satisfied.
const URGENCY_WINDOW_DAYS: i64 = 3;

/// The severity a deadline result carries, given the configured severity and
/// the days left until (negative: since) the due date. Overdue deadlines
/// block; imminent ones are errors; otherwise the configuration stands.
pub fn effective_severity(
  configured: Severity,
  days_remaining: i64,
) -> Severity {
  if days_remaining <= 0 {
    Severity::Blocking
  } else if days_remaining <= URGENCY_WINDOW_DAYS {
    Severity::Error
  } else {
    configured
  }
}

pub(super) async fn evaluate<S: LegislativeStore>(
  rule: &RuleDefinition,
  conditions: &DeadlineConditions,
  ctx: &ValidationContext,
  store: &S,
) -> Result<Option<RuleResult>, S::Error> {
  let Some(anchor) = anchor_instant(conditions.anchor, ctx, store).await?
  else {
    return Ok(None);
  };

  let due = match conditions.span {
    DeadlineSpan::BusinessDays(n) => temporal::add_business_days(anchor, n),
    DeadlineSpan::CalendarDays(n) => temporal::add_days(anchor, n),
    DeadlineSpan::HoursBefore(h) => anchor - Duration::hours(i64::from(h)),
  };

  let days_remaining = temporal::difference_in_days(due, ctx.now());
  let satisfied = days_remaining > URGENCY_WINDOW_DAYS;
  let severity = effective_severity(rule.severity, days_remaining);

  let message = if days_remaining > 0 {
    format!("Prazo em curso: {days_remaining} dia(s) restante(s)")
  } else if days_remaining == 0 {
    "Prazo vence hoje".to_string()
  } else {
    format!("Prazo vencido há {} dia(s)", -days_remaining)
  };

  Ok(Some(RuleResult::with_severity(
    rule,
    satisfied,
    severity,
    message,
    Evidence::Deadline {
      due,
      days_remaining,
    },
  )))
}

/// Resolve the instant the deadline counts from. `None` when the context or
/// the read model lacks the anchor.
async fn anchor_instant<S: LegislativeStore>(
  anchor: DeadlineAnchor,
  ctx: &ValidationContext,
  store: &S,
) -> Result<Option<DateTime<Utc>>, S::Error> {
  match anchor {
    DeadlineAnchor::LatestRoutingStep => {
      let Some(id) = ctx.proposal_id else {
        return Ok(None);
      };
      let Some(proposal) = store.get_proposal(id).await? else {
        return Ok(None);
      };
      // Routing history is ordered newest-first.
      Ok(proposal.routing.first().map(|step| step.created_at))
    }
    DeadlineAnchor::VoteOrLastUpdate => {
      let Some(id) = ctx.proposal_id else {
        return Ok(None);
      };
      let Some(proposal) = store.get_proposal(id).await? else {
        return Ok(None);
      };
      Ok(Some(proposal.vote_date.unwrap_or(proposal.updated_at)))
    }
    DeadlineAnchor::SessionStart => {
      let Some(id) = ctx.session_id else {
        return Ok(None);
      };
      let Some(session) = store.get_session(id).await? else {
        return Ok(None);
      };
      Ok(session.scheduled_at)
    }
  }
}
