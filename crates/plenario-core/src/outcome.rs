//! Evaluation outcomes — rule results and the verdicts built from them.
//!
//! Results are transient decision artifacts: created fresh on every pass,
//! never persisted. Each carries an evidence snapshot of the numbers it was
//! decided on, so verdicts are auditable and assertable in tests.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rule::{RuleDefinition, RuleType, Severity};

// ─── Evidence ────────────────────────────────────────────────────────────────

/// Snapshot of the state a result was decided on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
  Quorum {
    present:  u32,
    total:    u32,
    required: u32,
  },
  Deadline {
    due:            DateTime<Utc>,
    days_remaining: i64,
  },
  Routing {
    steps:              usize,
    committee_opinions: usize,
    opinions:           usize,
  },
  Initiative {
    matched_subject: String,
    author_id:       Option<Uuid>,
  },
  Impediment {
    author_id:     Option<Uuid>,
    legislator_id: Uuid,
  },
  /// The rule is structurally defined but its check is not implemented; the
  /// result reports compliant and flags the gap in its details.
  NotEvaluated,
}

// ─── RuleResult ──────────────────────────────────────────────────────────────

/// The outcome of evaluating one rule against one context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
  pub code:      String,
  pub name:      String,
  pub rule_type: RuleType,
  pub satisfied: bool,
  /// Effective severity: echoes the rule's configuration except for
  /// deadline rules, which escalate as the due date approaches.
  pub severity:  Severity,
  pub message:   String,
  pub details:   Option<String>,
  /// Present only when the rule is violated.
  pub corrective_suggestion: Option<String>,
  pub evidence:  Evidence,
}

impl RuleResult {
  /// Build a result for `rule`, echoing its configured severity.
  pub fn new(
    rule: &RuleDefinition,
    satisfied: bool,
    message: String,
    evidence: Evidence,
  ) -> Self {
    Self::with_severity(rule, satisfied, rule.severity, message, evidence)
  }

  /// Build a result carrying an explicitly escalated severity.
  pub fn with_severity(
    rule: &RuleDefinition,
    satisfied: bool,
    severity: Severity,
    message: String,
    evidence: Evidence,
  ) -> Self {
    Self {
      code: rule.code.clone(),
      name: rule.name.clone(),
      rule_type: rule.rule_type(),
      satisfied,
      severity,
      message,
      details: None,
      corrective_suggestion: (!satisfied)
        .then(|| rule.corrective_suggestion.clone()),
      evidence,
    }
  }

  /// A violated rule at blocking severity.
  pub fn is_blocker(&self) -> bool {
    !self.satisfied && self.severity == Severity::Blocking
  }

  /// A violated rule below blocking severity.
  pub fn is_warning(&self) -> bool {
    !self.satisfied && self.severity < Severity::Blocking
  }
}

// ─── Verdicts ────────────────────────────────────────────────────────────────

/// Whether a proposal may enter the session agenda.
/// `eligible` is true iff `blockers` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaEligibility {
  pub proposal_id: Uuid,
  pub eligible:    bool,
  pub blockers:    Vec<RuleResult>,
  pub warnings:    Vec<RuleResult>,
}

/// Whether a vote on a proposal may be opened in a session.
/// `can_vote` is true iff `blockers` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteEligibility {
  pub session_id:  Uuid,
  pub proposal_id: Uuid,
  pub can_vote:    bool,
  pub blockers:    Vec<RuleResult>,
  pub warnings:    Vec<RuleResult>,
}

/// One violation surfaced by the compliance report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceViolation {
  pub proposal_id: Uuid,
  pub result:      RuleResult,
}

/// Batch snapshot of open violations across in-progress proposals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
  pub generated_at:      DateTime<Utc>,
  pub proposals_scanned: usize,
  pub total_violations:  usize,
  pub by_type:           BTreeMap<RuleType, usize>,
  pub violations:        Vec<ComplianceViolation>,
}
