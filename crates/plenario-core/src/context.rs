//! The per-call validation context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The legislative action a validation pass is gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessAction {
  #[serde(rename = "PAUTA")]
  AgendaInclusion,
  #[serde(rename = "VOTACAO")]
  Voting,
  #[serde(rename = "PUBLICACAO")]
  Publication,
}

impl ProcessAction {
  /// The stable tag string, as serialised.
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::AgendaInclusion => "PAUTA",
      Self::Voting => "VOTACAO",
      Self::Publication => "PUBLICACAO",
    }
  }
}

/// Everything a validation pass knows about the situation under review.
///
/// All fields are optional. Each evaluator declares which fields it needs;
/// a missing field means the rule does not apply — never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationContext {
  pub proposal_id:   Option<Uuid>,
  pub session_id:    Option<Uuid>,
  pub legislator_id: Option<Uuid>,
  pub action:        Option<ProcessAction>,
  /// Pins "now" for deadline math; defaults to the wall clock. Lets tests
  /// and replays evaluate deadlines against a fixed instant.
  pub as_of:         Option<DateTime<Utc>>,
  /// Free-form extras forwarded by the caller; unused by the built-in
  /// evaluators.
  pub data:          Option<serde_json::Value>,
}

impl ValidationContext {
  /// Context for agenda-eligibility checks: proposal only.
  pub fn for_proposal(proposal_id: Uuid) -> Self {
    Self {
      proposal_id: Some(proposal_id),
      ..Self::default()
    }
  }

  /// Context for vote-opening checks.
  pub fn for_vote(session_id: Uuid, proposal_id: Uuid) -> Self {
    Self {
      proposal_id: Some(proposal_id),
      session_id: Some(session_id),
      action: Some(ProcessAction::Voting),
      ..Self::default()
    }
  }

  /// The instant deadline rules measure against.
  pub fn now(&self) -> DateTime<Utc> { self.as_of.unwrap_or_else(Utc::now) }
}
