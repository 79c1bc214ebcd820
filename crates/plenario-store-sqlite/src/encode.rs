//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Enums are stored as their
//! portal tags, opinions as compact JSON. UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use plenario_core::record::{
  HandlingUnit, Opinion, Proposal, ProposalStatus, RoutingStep, UnitKind,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("bad timestamp {s:?}: {e}")))
}

// ─── UnitKind ────────────────────────────────────────────────────────────────

pub fn encode_unit_kind(k: UnitKind) -> &'static str {
  match k {
    UnitKind::Committee => "COMISSAO",
    UnitKind::Board => "MESA",
    UnitKind::Plenary => "PLENARIO",
    UnitKind::Executive => "EXECUTIVO",
    UnitKind::Other => "OUTRO",
  }
}

pub fn decode_unit_kind(s: &str) -> Result<UnitKind> {
  match s {
    "COMISSAO" => Ok(UnitKind::Committee),
    "MESA" => Ok(UnitKind::Board),
    "PLENARIO" => Ok(UnitKind::Plenary),
    "EXECUTIVO" => Ok(UnitKind::Executive),
    "OUTRO" => Ok(UnitKind::Other),
    other => Err(Error::Decode(format!("unknown unit kind: {other:?}"))),
  }
}

// ─── ProposalStatus ──────────────────────────────────────────────────────────

pub fn encode_status(s: ProposalStatus) -> &'static str {
  match s {
    ProposalStatus::InProgress => "EM_TRAMITACAO",
    ProposalStatus::Approved => "APROVADA",
    ProposalStatus::Rejected => "REJEITADA",
    ProposalStatus::Vetoed => "VETADA",
    ProposalStatus::Sanctioned => "SANCIONADA",
    ProposalStatus::Archived => "ARQUIVADA",
  }
}

pub fn decode_status(s: &str) -> Result<ProposalStatus> {
  match s {
    "EM_TRAMITACAO" => Ok(ProposalStatus::InProgress),
    "APROVADA" => Ok(ProposalStatus::Approved),
    "REJEITADA" => Ok(ProposalStatus::Rejected),
    "VETADA" => Ok(ProposalStatus::Vetoed),
    "SANCIONADA" => Ok(ProposalStatus::Sanctioned),
    "ARQUIVADA" => Ok(ProposalStatus::Archived),
    other => Err(Error::Decode(format!("unknown proposal status: {other:?}"))),
  }
}

// ─── Opinion ─────────────────────────────────────────────────────────────────

pub fn encode_opinion(o: &Opinion) -> Result<String> {
  Ok(serde_json::to_string(o)?)
}

pub fn decode_opinion(s: &str) -> Result<Opinion> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `proposals` row.
pub struct RawProposal {
  pub proposal_id: String,
  pub kind:        String,
  pub summary:     String,
  pub author_id:   Option<String>,
  pub status:      String,
  pub vote_date:   Option<String>,
  pub updated_at:  String,
}

impl RawProposal {
  pub fn into_proposal(self, routing: Vec<RoutingStep>) -> Result<Proposal> {
    Ok(Proposal {
      proposal_id: decode_uuid(&self.proposal_id)?,
      kind: self.kind,
      summary: self.summary,
      author_id: self.author_id.as_deref().map(decode_uuid).transpose()?,
      status: decode_status(&self.status)?,
      vote_date: self.vote_date.as_deref().map(decode_dt).transpose()?,
      updated_at: decode_dt(&self.updated_at)?,
      routing,
    })
  }
}

/// Raw strings read from a `routing_steps` row joined with `units`.
pub struct RawRoutingStep {
  pub created_at:   String,
  pub unit_name:    Option<String>,
  pub unit_kind:    Option<String>,
  pub opinion_json: Option<String>,
}

impl RawRoutingStep {
  pub fn into_step(self) -> Result<RoutingStep> {
    let unit = match (self.unit_name, self.unit_kind) {
      (Some(name), Some(kind)) => Some(HandlingUnit {
        name,
        kind: decode_unit_kind(&kind)?,
      }),
      _ => None,
    };

    Ok(RoutingStep {
      created_at: decode_dt(&self.created_at)?,
      unit,
      opinion: self.opinion_json.as_deref().map(decode_opinion).transpose()?,
    })
  }
}
