//! Read-model records — the slice of the câmara's relational data the rule
//! evaluators consume.
//!
//! These are projections of the portal's proposição/sessão/tramitação
//! tables, narrowed to the fields evaluation needs. The engine only ever
//! reads them; ingestion belongs to the storage backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Sessions ────────────────────────────────────────────────────────────────

/// One legislator's attendance record for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presence {
  pub legislator_id: Uuid,
  pub present:       bool,
}

/// A plenary session with its confirmed attendance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
  pub session_id:   Uuid,
  /// Scheduled start; `None` for sessions not yet scheduled.
  pub scheduled_at: Option<DateTime<Utc>>,
  pub presences:    Vec<Presence>,
}

impl Session {
  /// Count of legislators marked present.
  pub fn present_count(&self) -> u32 {
    self.presences.iter().filter(|p| p.present).count() as u32
  }
}

// ─── Handling units and routing ──────────────────────────────────────────────

/// The kind of body a routing step was assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
  #[serde(rename = "COMISSAO")]
  Committee,
  #[serde(rename = "MESA")]
  Board,
  #[serde(rename = "PLENARIO")]
  Plenary,
  #[serde(rename = "EXECUTIVO")]
  Executive,
  #[serde(rename = "OUTRO")]
  Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlingUnit {
  pub name: String,
  pub kind: UnitKind,
}

/// A committee's formal written opinion (parecer) attached to a routing
/// step. Only its presence matters to the routing rules; the fields are
/// carried for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
  /// E.g. `"FAVORAVEL"` or `"CONTRARIO"`; free text from the portal.
  pub conclusion: Option<String>,
  pub issued_at:  Option<DateTime<Utc>>,
}

/// One step in a proposal's tramitação history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingStep {
  pub created_at: DateTime<Utc>,
  pub unit:       Option<HandlingUnit>,
  pub opinion:    Option<Opinion>,
}

// ─── Proposals ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
  #[serde(rename = "EM_TRAMITACAO")]
  InProgress,
  #[serde(rename = "APROVADA")]
  Approved,
  #[serde(rename = "REJEITADA")]
  Rejected,
  #[serde(rename = "VETADA")]
  Vetoed,
  #[serde(rename = "SANCIONADA")]
  Sanctioned,
  #[serde(rename = "ARQUIVADA")]
  Archived,
}

/// A legislative proposal with its routing history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
  pub proposal_id: Uuid,
  /// Upstream matter-type token, e.g. `"PROJETO_DE_LEI"` or
  /// `"EMENDA_LEI_ORGANICA"`.
  pub kind:        String,
  pub summary:     String,
  /// `None` means the proposal originated from the executive branch.
  pub author_id:   Option<Uuid>,
  pub status:      ProposalStatus,
  pub vote_date:   Option<DateTime<Utc>>,
  pub updated_at:  DateTime<Utc>,
  /// Routing history, newest step first.
  pub routing:     Vec<RoutingStep>,
}
