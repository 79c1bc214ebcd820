//! The validation orchestrator and decision gates.

use std::{collections::BTreeMap, sync::Arc};

use chrono::Utc;
use uuid::Uuid;

use crate::{
  catalog::RuleCatalog,
  context::ValidationContext,
  eval,
  outcome::{
    AgendaEligibility, ComplianceReport, ComplianceViolation, RuleResult,
    VoteEligibility,
  },
  rule::RuleType,
  store::LegislativeStore,
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Engine tunables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
  /// Upper bound on proposals scanned by
  /// [`ValidationEngine::build_compliance_report`].
  pub report_scan_limit: usize,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      report_scan_limit: 50,
    }
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Rule types allowed to block the opening of a vote. Keeping other blocking
/// types (e.g. INICIATIVA) out of vote gating is a policy choice of the
/// regimento: those violations gate agenda inclusion instead.
const VOTE_GATE_TYPES: [RuleType; 3] =
  [RuleType::Quorum, RuleType::Routing, RuleType::Voting];

/// Evaluates the rule catalog against live legislative state.
///
/// Stateless between calls: every pass reads fresh data and produces fresh
/// results.
pub struct ValidationEngine<S> {
  store:   Arc<S>,
  catalog: RuleCatalog,
  config:  EngineConfig,
}

impl<S> Clone for ValidationEngine<S> {
  fn clone(&self) -> Self {
    Self {
      store:   Arc::clone(&self.store),
      catalog: self.catalog.clone(),
      config:  self.config.clone(),
    }
  }
}

impl<S: LegislativeStore> ValidationEngine<S> {
  pub fn new(store: Arc<S>, catalog: RuleCatalog, config: EngineConfig) -> Self {
    Self {
      store,
      catalog,
      config,
    }
  }

  /// The catalog this engine evaluates.
  pub fn catalog(&self) -> &RuleCatalog { &self.catalog }

  /// Run every active rule against `ctx` and collect the applicable results.
  ///
  /// Evaluator calls are isolated: a store error fails the one rule (with a
  /// warning) and the pass continues, so a flaky read never aborts the
  /// remaining rules.
  pub async fn run_validation(
    &self,
    ctx: &ValidationContext,
  ) -> Vec<RuleResult> {
    let mut results = Vec::new();

    for rule in self.catalog.active() {
      match eval::evaluate(rule, ctx, self.store.as_ref()).await {
        Ok(Some(result)) => results.push(result),
        Ok(None) => {}
        Err(error) => {
          tracing::warn!(
            code = %rule.code,
            %error,
            "rule evaluation failed; skipping"
          );
        }
      }
    }

    let violations = results.iter().filter(|r| !r.satisfied).count();
    tracing::info!(
      action = ctx.action.map(|a| a.as_str()),
      proposal_id = ?ctx.proposal_id,
      session_id = ?ctx.session_id,
      total_rules = self.catalog.len(),
      evaluated = results.len(),
      violations,
      "validation pass complete"
    );

    results
  }

  /// Can this proposal enter the session agenda?
  ///
  /// Every blocking violation gates here, regardless of rule type.
  pub async fn check_agenda_eligibility(
    &self,
    proposal_id: Uuid,
  ) -> AgendaEligibility {
    let ctx = ValidationContext::for_proposal(proposal_id);
    let results = self.run_validation(&ctx).await;

    let (blockers, warnings) = partition_violations(results, None);
    AgendaEligibility {
      proposal_id,
      eligible: blockers.is_empty(),
      blockers,
      warnings,
    }
  }

  /// Can a vote on this proposal be opened in this session?
  ///
  /// Only violations of the types in [`VOTE_GATE_TYPES`] block.
  pub async fn check_vote_eligibility(
    &self,
    session_id: Uuid,
    proposal_id: Uuid,
  ) -> VoteEligibility {
    let ctx = ValidationContext::for_vote(session_id, proposal_id);
    let results = self.run_validation(&ctx).await;

    let (blockers, warnings) =
      partition_violations(results, Some(&VOTE_GATE_TYPES));
    VoteEligibility {
      session_id,
      proposal_id,
      can_vote: blockers.is_empty(),
      blockers,
      warnings,
    }
  }

  /// Scan up to [`EngineConfig::report_scan_limit`] in-progress proposals
  /// and aggregate every violation found.
  ///
  /// The listing query is the one infrastructure error surfaced by the
  /// engine: without the scan list there is no report to build.
  pub async fn build_compliance_report(
    &self,
  ) -> Result<ComplianceReport, S::Error> {
    let ids = self
      .store
      .list_pending_proposals(self.config.report_scan_limit)
      .await?;

    let mut violations = Vec::new();
    for proposal_id in &ids {
      let ctx = ValidationContext::for_proposal(*proposal_id);
      for result in self.run_validation(&ctx).await {
        if !result.satisfied {
          violations.push(ComplianceViolation {
            proposal_id: *proposal_id,
            result,
          });
        }
      }
    }

    let mut by_type = BTreeMap::new();
    for violation in &violations {
      *by_type.entry(violation.result.rule_type).or_insert(0) += 1;
    }

    Ok(ComplianceReport {
      generated_at: Utc::now(),
      proposals_scanned: ids.len(),
      total_violations: violations.len(),
      by_type,
      violations,
    })
  }
}

/// Split violations into gate blockers and advisory warnings. `allowed`
/// narrows which rule types may block; `None` lets any blocking violation
/// gate.
fn partition_violations(
  results: Vec<RuleResult>,
  allowed: Option<&[RuleType]>,
) -> (Vec<RuleResult>, Vec<RuleResult>) {
  let mut blockers = Vec::new();
  let mut warnings = Vec::new();

  for result in results {
    if result.is_blocker() {
      if allowed.is_none_or(|types| types.contains(&result.rule_type)) {
        blockers.push(result);
      }
    } else if result.is_warning() {
      warnings.push(result);
    }
  }

  (blockers, warnings)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use chrono::{DateTime, Duration, TimeZone, Utc};

  use super::*;
  use crate::{
    record::{
      HandlingUnit, Opinion, Presence, Proposal, ProposalStatus, RoutingStep,
      Session, UnitKind,
    },
    rule::{
      QuorumConditions, QuorumKind, RuleConditions, RuleDefinition, Severity,
    },
  };

  // ── In-memory store double ───────────────────────────────────────────────

  #[derive(Debug, thiserror::Error)]
  #[error("memory store error")]
  struct MemoryError;

  #[derive(Default)]
  struct MemoryStore {
    legislators: u32,
    sessions:    HashMap<Uuid, Session>,
    proposals:   HashMap<Uuid, Proposal>,
  }

  impl LegislativeStore for MemoryStore {
    type Error = MemoryError;

    async fn count_active_legislators(&self) -> Result<u32, MemoryError> {
      Ok(self.legislators)
    }

    async fn get_session(
      &self,
      id: Uuid,
    ) -> Result<Option<Session>, MemoryError> {
      Ok(self.sessions.get(&id).cloned())
    }

    async fn get_proposal(
      &self,
      id: Uuid,
    ) -> Result<Option<Proposal>, MemoryError> {
      Ok(self.proposals.get(&id).cloned())
    }

    async fn list_pending_proposals(
      &self,
      limit: usize,
    ) -> Result<Vec<Uuid>, MemoryError> {
      let mut ids: Vec<_> = self
        .proposals
        .iter()
        .filter(|(_, p)| p.status == ProposalStatus::InProgress)
        .map(|(id, _)| *id)
        .collect();
      ids.sort();
      ids.truncate(limit);
      Ok(ids)
    }
  }

  // ── Fixtures ─────────────────────────────────────────────────────────────

  fn build_engine(store: MemoryStore) -> ValidationEngine<MemoryStore> {
    ValidationEngine::new(
      Arc::new(store),
      RuleCatalog::regimental(),
      EngineConfig::default(),
    )
  }

  fn session_with(present: u32, absent: u32) -> Session {
    let mut presences = Vec::new();
    for _ in 0..present {
      presences.push(Presence {
        legislator_id: Uuid::new_v4(),
        present:       true,
      });
    }
    for _ in 0..absent {
      presences.push(Presence {
        legislator_id: Uuid::new_v4(),
        present:       false,
      });
    }
    Session {
      session_id: Uuid::new_v4(),
      scheduled_at: Some(Utc::now() + Duration::days(7)),
      presences,
    }
  }

  fn committee_step(created_at: DateTime<Utc>) -> RoutingStep {
    RoutingStep {
      created_at,
      unit: Some(HandlingUnit {
        name: "Comissão de Legislação e Justiça".to_string(),
        kind: UnitKind::Committee,
      }),
      opinion: Some(Opinion {
        conclusion: Some("FAVORAVEL".to_string()),
        issued_at:  Some(created_at),
      }),
    }
  }

  /// A well-behaved ordinary proposal: committee opinion recorded, recent
  /// dates, no privileged subject.
  fn clean_proposal() -> Proposal {
    Proposal {
      proposal_id: Uuid::new_v4(),
      kind: "PROJETO_DE_LEI".to_string(),
      summary: "Denomina via pública no bairro centro".to_string(),
      author_id: Some(Uuid::new_v4()),
      status: ProposalStatus::InProgress,
      vote_date: None,
      updated_at: Utc::now(),
      routing: vec![committee_step(Utc::now())],
    }
  }

  fn find<'a>(results: &'a [RuleResult], code: &str) -> &'a RuleResult {
    results
      .iter()
      .find(|r| r.code == code)
      .unwrap_or_else(|| panic!("no result for {code}"))
  }

  // ── Catalog gating ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn inactive_rules_are_never_evaluated() {
    let mut store = MemoryStore::default();
    store.legislators = 11;
    let session = session_with(8, 3);
    let session_id = session.session_id;
    store.sessions.insert(session_id, session);

    let catalog = RuleCatalog::new(vec![RuleDefinition {
      code: "RR-900".to_string(),
      name: "Regra desativada".to_string(),
      description: String::new(),
      active: false,
      severity: Severity::Blocking,
      conditions: RuleConditions::Quorum(QuorumConditions {
        kind:            QuorumKind::Absolute,
        minimum_percent: None,
      }),
      error_message: String::new(),
      corrective_suggestion: String::new(),
    }])
    .unwrap();

    let engine = ValidationEngine::new(
      Arc::new(store),
      catalog,
      EngineConfig::default(),
    );
    let ctx = ValidationContext {
      session_id: Some(session_id),
      ..Default::default()
    };

    assert!(engine.run_validation(&ctx).await.is_empty());
  }

  // ── Quorum ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn absolute_quorum_boundary_at_eleven_members() {
    for (present, expected) in [(5u32, false), (6, true)] {
      let mut store = MemoryStore::default();
      store.legislators = 11;
      let session = session_with(present, 11 - present);
      let session_id = session.session_id;
      store.sessions.insert(session_id, session);

      let engine = build_engine(store);
      let ctx = ValidationContext {
        session_id: Some(session_id),
        ..Default::default()
      };
      let results = engine.run_validation(&ctx).await;

      assert_eq!(find(&results, "RR-001").satisfied, expected);
    }
  }

  #[tokio::test]
  async fn qualified_quorum_boundary_at_nine_members() {
    for (present, expected) in [(5u32, false), (6, true)] {
      let mut store = MemoryStore::default();
      store.legislators = 9;
      let session = session_with(present, 9 - present);
      let session_id = session.session_id;
      store.sessions.insert(session_id, session);

      let engine = build_engine(store);
      let ctx = ValidationContext {
        session_id: Some(session_id),
        ..Default::default()
      };
      let results = engine.run_validation(&ctx).await;

      assert_eq!(find(&results, "RR-003").satisfied, expected);
    }
  }

  #[tokio::test]
  async fn quorum_rules_skip_contexts_without_a_session() {
    let mut store = MemoryStore::default();
    store.legislators = 11;
    let proposal = clean_proposal();
    let proposal_id = proposal.proposal_id;
    store.proposals.insert(proposal_id, proposal);

    let engine = build_engine(store);
    let ctx = ValidationContext::for_proposal(proposal_id);
    let results = engine.run_validation(&ctx).await;

    assert!(results.iter().all(|r| r.rule_type != RuleType::Quorum));
  }

  // ── Deadlines ────────────────────────────────────────────────────────────

  /// Build a store with one proposal whose latest routing step is at a
  /// pinned instant, for deterministic deadline math.
  fn deadline_fixture(anchor: DateTime<Utc>) -> (MemoryStore, Uuid) {
    let mut store = MemoryStore::default();
    let mut proposal = clean_proposal();
    proposal.routing = vec![committee_step(anchor)];
    proposal.updated_at = anchor;
    let proposal_id = proposal.proposal_id;
    store.proposals.insert(proposal_id, proposal);
    (store, proposal_id)
  }

  #[tokio::test]
  async fn deadline_escalates_to_error_when_imminent() {
    // Anchor Monday 2024-06-03; 15 business days land on Monday 2024-06-24.
    let anchor = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
    let (store, proposal_id) = deadline_fixture(anchor);

    let engine = build_engine(store);
    let ctx = ValidationContext {
      proposal_id: Some(proposal_id),
      as_of: Some(Utc.with_ymd_and_hms(2024, 6, 22, 9, 0, 0).unwrap()),
      ..Default::default()
    };
    let results = engine.run_validation(&ctx).await;

    let result = find(&results, "RR-010");
    assert!(!result.satisfied);
    assert_eq!(result.severity, Severity::Error);
    assert!(result.message.contains('2'), "message: {}", result.message);
  }

  #[tokio::test]
  async fn overdue_deadline_escalates_to_blocking() {
    let anchor = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
    let (store, proposal_id) = deadline_fixture(anchor);

    let engine = build_engine(store);
    let ctx = ValidationContext {
      proposal_id: Some(proposal_id),
      as_of: Some(Utc.with_ymd_and_hms(2024, 6, 25, 9, 0, 0).unwrap()),
      ..Default::default()
    };
    let results = engine.run_validation(&ctx).await;

    let result = find(&results, "RR-010");
    assert!(!result.satisfied);
    assert_eq!(result.severity, Severity::Blocking);
  }

  #[tokio::test]
  async fn comfortable_deadline_keeps_configured_severity() {
    let anchor = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
    let (store, proposal_id) = deadline_fixture(anchor);

    let engine = build_engine(store);
    let ctx = ValidationContext {
      proposal_id: Some(proposal_id),
      as_of: Some(Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()),
      ..Default::default()
    };
    let results = engine.run_validation(&ctx).await;

    let result = find(&results, "RR-010");
    assert!(result.satisfied);
    assert_eq!(result.severity, Severity::Warning);
  }

  // ── Tramitação ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn committee_without_opinion_fails_clj_passage_only() {
    let mut store = MemoryStore::default();
    let mut proposal = clean_proposal();
    proposal.routing = vec![
      RoutingStep {
        created_at: Utc::now(),
        unit: Some(HandlingUnit {
          name: "Comissão de Legislação e Justiça".to_string(),
          kind: UnitKind::Committee,
        }),
        opinion: None,
      },
      RoutingStep {
        created_at: Utc::now() - Duration::days(2),
        unit: Some(HandlingUnit {
          name: "Protocolo".to_string(),
          kind: UnitKind::Other,
        }),
        opinion: Some(Opinion {
          conclusion: None,
          issued_at:  None,
        }),
      },
    ];
    let proposal_id = proposal.proposal_id;
    store.proposals.insert(proposal_id, proposal);

    let engine = build_engine(store);
    let ctx = ValidationContext::for_proposal(proposal_id);
    let results = engine.run_validation(&ctx).await;

    assert!(!find(&results, "RR-030").satisfied);
    assert!(find(&results, "RR-031").satisfied);
  }

  // ── Iniciativa ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn initiative_distinguishes_violation_from_inapplicable() {
    // Parliamentary author on a privileged subject: violation.
    let mut store = MemoryStore::default();
    let mut proposal = clean_proposal();
    proposal.summary =
      "Dispõe sobre AUMENTO_REMUNERACAO dos servidores".to_string();
    let proposal_id = proposal.proposal_id;
    store.proposals.insert(proposal_id, proposal);

    let engine = build_engine(store);
    let ctx = ValidationContext::for_proposal(proposal_id);
    let results = engine.run_validation(&ctx).await;
    assert!(!find(&results, "RR-050").satisfied);

    // Executive origin on the same subject: satisfied.
    let mut store = MemoryStore::default();
    let mut proposal = clean_proposal();
    proposal.summary =
      "Dispõe sobre AUMENTO_REMUNERACAO dos servidores".to_string();
    proposal.author_id = None;
    let proposal_id = proposal.proposal_id;
    store.proposals.insert(proposal_id, proposal);

    let engine = build_engine(store);
    let ctx = ValidationContext::for_proposal(proposal_id);
    let results = engine.run_validation(&ctx).await;
    assert!(find(&results, "RR-050").satisfied);

    // No privileged subject: the rule does not apply at all.
    let mut store = MemoryStore::default();
    let proposal = clean_proposal();
    let proposal_id = proposal.proposal_id;
    store.proposals.insert(proposal_id, proposal);

    let engine = build_engine(store);
    let ctx = ValidationContext::for_proposal(proposal_id);
    let results = engine.run_validation(&ctx).await;
    assert!(results.iter().all(|r| r.code != "RR-050"));
  }

  // ── Impedimento ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn self_vote_impediment_keeps_configured_warning_severity() {
    let author = Uuid::new_v4();
    let mut store = MemoryStore::default();
    let mut proposal = clean_proposal();
    proposal.author_id = Some(author);
    let proposal_id = proposal.proposal_id;
    store.proposals.insert(proposal_id, proposal);

    let engine = build_engine(store);

    let ctx = ValidationContext {
      proposal_id: Some(proposal_id),
      legislator_id: Some(author),
      ..Default::default()
    };
    let results = engine.run_validation(&ctx).await;
    let result = find(&results, "RR-060");
    assert!(!result.satisfied);
    assert_eq!(result.severity, Severity::Warning);

    let ctx = ValidationContext {
      proposal_id: Some(proposal_id),
      legislator_id: Some(Uuid::new_v4()),
      ..Default::default()
    };
    let results = engine.run_validation(&ctx).await;
    assert!(find(&results, "RR-060").satisfied);
  }

  // ── Gates ────────────────────────────────────────────────────────────────

  /// A blocking INICIATIVA violation gates the agenda but is excluded from
  /// vote gating by the type allowlist.
  #[tokio::test]
  async fn vote_gate_excludes_initiative_blockers() {
    let mut store = MemoryStore::default();
    store.legislators = 11;

    let session = session_with(8, 3);
    let session_id = session.session_id;
    store.sessions.insert(session_id, session);

    let mut proposal = clean_proposal();
    proposal.summary =
      "Autoriza CRIACAO_CARGO de procurador municipal".to_string();
    let proposal_id = proposal.proposal_id;
    store.proposals.insert(proposal_id, proposal);

    let engine = build_engine(store);

    let agenda = engine.check_agenda_eligibility(proposal_id).await;
    assert!(!agenda.eligible);
    assert!(agenda.blockers.iter().any(|b| b.code == "RR-050"));

    let vote = engine.check_vote_eligibility(session_id, proposal_id).await;
    assert!(vote.blockers.iter().all(|b| b.code != "RR-050"));
    assert!(vote.can_vote);
  }

  #[tokio::test]
  async fn clean_proposal_is_agenda_eligible() {
    let mut store = MemoryStore::default();
    store.legislators = 11;
    let session = session_with(8, 3);
    store.sessions.insert(session.session_id, session);

    let proposal = clean_proposal();
    let proposal_id = proposal.proposal_id;
    store.proposals.insert(proposal_id, proposal);

    let engine = build_engine(store);
    let verdict = engine.check_agenda_eligibility(proposal_id).await;

    assert!(verdict.eligible);
    assert!(verdict.blockers.is_empty());
  }

  #[tokio::test]
  async fn missing_proposal_yields_no_results_and_no_blockers() {
    let engine = build_engine(MemoryStore::default());
    let verdict = engine.check_agenda_eligibility(Uuid::new_v4()).await;

    assert!(verdict.eligible);
    assert!(verdict.blockers.is_empty());
    assert!(verdict.warnings.is_empty());
  }

  #[tokio::test]
  async fn repeated_passes_are_idempotent() {
    let mut store = MemoryStore::default();
    let mut proposal = clean_proposal();
    // Pin every timestamp so the two passes see identical data.
    let anchor = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
    proposal.routing = vec![committee_step(anchor)];
    proposal.updated_at = anchor;
    let proposal_id = proposal.proposal_id;
    store.proposals.insert(proposal_id, proposal);

    let engine = build_engine(store);
    let ctx = ValidationContext {
      proposal_id: Some(proposal_id),
      as_of: Some(anchor + Duration::days(5)),
      ..Default::default()
    };

    let first = engine.run_validation(&ctx).await;
    let second = engine.run_validation(&ctx).await;
    assert_eq!(first, second);
  }

  // ── Compliance report ────────────────────────────────────────────────────

  #[tokio::test]
  async fn report_counts_violations_by_type() {
    let mut store = MemoryStore::default();

    // One proposal with no opinion anywhere: violates RR-030 and RR-031.
    let mut bad = clean_proposal();
    bad.routing = vec![RoutingStep {
      created_at: Utc::now(),
      unit: Some(HandlingUnit {
        name: "Protocolo".to_string(),
        kind: UnitKind::Other,
      }),
      opinion: None,
    }];
    store.proposals.insert(bad.proposal_id, bad);

    let good = clean_proposal();
    store.proposals.insert(good.proposal_id, good);

    let engine = build_engine(store);
    let report = engine.build_compliance_report().await.unwrap();

    assert_eq!(report.proposals_scanned, 2);
    assert_eq!(report.by_type.get(&RuleType::Routing), Some(&2));
    assert_eq!(report.total_violations, report.violations.len());
  }

  #[tokio::test]
  async fn report_scan_respects_configured_limit() {
    let mut store = MemoryStore::default();
    for _ in 0..3 {
      let proposal = clean_proposal();
      store.proposals.insert(proposal.proposal_id, proposal);
    }

    let engine = ValidationEngine::new(
      Arc::new(store),
      RuleCatalog::regimental(),
      EngineConfig {
        report_scan_limit: 2,
      },
    );
    let report = engine.build_compliance_report().await.unwrap();

    assert_eq!(report.proposals_scanned, 2);
  }
}
