//! Rule definitions — the declarative encoding of the câmara's regimento
//! interno.
//!
//! A rule pairs a typed condition payload with a static severity and message
//! templates. Rules are configuration, not behaviour: evaluation lives in
//! [`crate::eval`], and the standard rule set in [`crate::catalog`].

use serde::{Deserialize, Serialize};

// ─── Severity ────────────────────────────────────────────────────────────────

/// How strongly a violated rule weighs on a decision.
///
/// Ordinal: decision gates compare severities, and deadline evaluation
/// escalates them as the due date approaches. Only [`Severity::Blocking`]
/// violations gate actions; everything below is advisory.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Severity {
  #[serde(rename = "INFO")]
  Info,
  #[serde(rename = "AVISO")]
  Warning,
  #[serde(rename = "ERRO")]
  Error,
  #[serde(rename = "BLOQUEIO")]
  Blocking,
}

// ─── Rule type ───────────────────────────────────────────────────────────────

/// The eight rule families of the regimento. Serialised tags match the
/// portal's vocabulary; downstream consumers reference rules by this tag and
/// by [`RuleDefinition::code`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
)]
pub enum RuleType {
  #[serde(rename = "QUORUM")]
  Quorum,
  #[serde(rename = "PRAZO")]
  Deadline,
  #[serde(rename = "INTERSTICIO")]
  Interstice,
  #[serde(rename = "TRAMITACAO")]
  Routing,
  #[serde(rename = "VOTACAO")]
  Voting,
  #[serde(rename = "INICIATIVA")]
  Initiative,
  #[serde(rename = "IMPEDIMENTO")]
  Impediment,
  #[serde(rename = "PUBLICIDADE")]
  Publicity,
}

impl RuleType {
  /// The stable tag string, as serialised.
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Quorum => "QUORUM",
      Self::Deadline => "PRAZO",
      Self::Interstice => "INTERSTICIO",
      Self::Routing => "TRAMITACAO",
      Self::Voting => "VOTACAO",
      Self::Initiative => "INICIATIVA",
      Self::Impediment => "IMPEDIMENTO",
      Self::Publicity => "PUBLICIDADE",
    }
  }
}

// ─── Quorum conditions ───────────────────────────────────────────────────────

/// Which attendance threshold a quorum rule demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuorumKind {
  /// Majority of the legislators present.
  #[serde(rename = "SIMPLES")]
  Simple,
  /// ⌊N/2⌋+1 of all active legislators.
  #[serde(rename = "ABSOLUTA")]
  Absolute,
  /// ⌈2N/3⌉ of all active legislators.
  #[serde(rename = "QUALIFICADA")]
  Qualified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuorumConditions {
  pub kind:            QuorumKind,
  /// Informative percentage shown in reports; the actual threshold is
  /// computed from `kind`, never from this field.
  pub minimum_percent: Option<u8>,
}

// ─── Deadline conditions ─────────────────────────────────────────────────────

/// Which timestamp a deadline counts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadlineAnchor {
  /// The most recent routing step of the proposal in context.
  #[serde(rename = "ULTIMA_TRAMITACAO")]
  LatestRoutingStep,
  /// The proposal's vote date, falling back to its last update.
  #[serde(rename = "VOTACAO_OU_ATUALIZACAO")]
  VoteOrLastUpdate,
  /// The scheduled start of the session in context.
  #[serde(rename = "INICIO_DA_SESSAO")]
  SessionStart,
}

/// The span between the anchor and the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "amount")]
pub enum DeadlineSpan {
  /// Weekdays only; Saturdays and Sundays are skipped, holidays are not.
  #[serde(rename = "DIAS_UTEIS")]
  BusinessDays(u32),
  #[serde(rename = "DIAS_CORRIDOS")]
  CalendarDays(u32),
  /// The action must happen this many hours *before* the anchor.
  #[serde(rename = "HORAS_ANTES")]
  HoursBefore(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadlineConditions {
  pub anchor: DeadlineAnchor,
  pub span:   DeadlineSpan,
}

// ─── Interstice conditions ───────────────────────────────────────────────────

/// Minimum waiting period between two votes of the same proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "amount")]
pub enum IntersticeSpan {
  #[serde(rename = "HORAS")]
  Hours(u32),
  #[serde(rename = "DIAS_CORRIDOS")]
  CalendarDays(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersticeConditions {
  pub minimum: IntersticeSpan,
}

// ─── Routing conditions ──────────────────────────────────────────────────────

/// What a tramitação rule looks for in the routing history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutingCheck {
  /// A routing step handled by a committee, with an opinion recorded.
  #[serde(rename = "PARECER_DE_COMISSAO")]
  CommitteeOpinion,
  /// Any routing step with an opinion recorded, regardless of unit.
  #[serde(rename = "QUALQUER_PARECER")]
  AnyOpinion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConditions {
  pub check: RoutingCheck,
}

// ─── Voting-method conditions ────────────────────────────────────────────────

/// Constraints tying voting methods to matter types. `matters` carries the
/// portal's matter-type tokens (e.g. `"EMENDA_LEI_ORGANICA"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check")]
pub enum VotingCheck {
  /// Roll-call voting is mandatory for these matters.
  #[serde(rename = "NOMINAL_OBRIGATORIA")]
  RequireNominal { matters: Vec<String> },
  /// Secret ballot is permitted only for these matters.
  #[serde(rename = "SECRETA_RESTRITA")]
  RestrictSecret { matters: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingConditions {
  #[serde(flatten)]
  pub check: VotingCheck,
}

// ─── Initiative conditions ───────────────────────────────────────────────────

/// Subject matters only the executive branch may originate legislation on.
/// Tokens are matched case-insensitively against a proposal's type and
/// summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiativeConditions {
  pub exclusive_subjects: Vec<String>,
}

// ─── Impediment conditions ───────────────────────────────────────────────────

/// Which conflict-of-interest restriction an impediment rule enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpedimentScope {
  /// The proposal's author may not vote on it.
  #[serde(rename = "CAUSA_PROPRIA")]
  SelfVote,
  /// Personal, family or business interest in the matter.
  #[serde(rename = "INTERESSE_PESSOAL")]
  PersonalInterest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpedimentConditions {
  pub scope: ImpedimentScope,
}

// ─── Publicity conditions ────────────────────────────────────────────────────

/// What a publication-transparency rule covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicityTarget {
  #[serde(rename = "RESULTADO_VOTACAO_NOMINAL")]
  RollCallResults,
  #[serde(rename = "ATA_DA_SESSAO")]
  SessionMinutes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicityConditions {
  pub target:        PublicityTarget,
  pub calendar_days: u32,
}

// ─── RuleConditions ──────────────────────────────────────────────────────────

/// The typed condition payload of a rule. The variant doubles as the rule's
/// `type` discriminant, so a rule's tag and its payload shape can never
/// disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "conditions")]
pub enum RuleConditions {
  #[serde(rename = "QUORUM")]
  Quorum(QuorumConditions),
  #[serde(rename = "PRAZO")]
  Deadline(DeadlineConditions),
  #[serde(rename = "INTERSTICIO")]
  Interstice(IntersticeConditions),
  #[serde(rename = "TRAMITACAO")]
  Routing(RoutingConditions),
  #[serde(rename = "VOTACAO")]
  Voting(VotingConditions),
  #[serde(rename = "INICIATIVA")]
  Initiative(InitiativeConditions),
  #[serde(rename = "IMPEDIMENTO")]
  Impediment(ImpedimentConditions),
  #[serde(rename = "PUBLICIDADE")]
  Publicity(PublicityConditions),
}

impl RuleConditions {
  /// The rule-type tag for this payload.
  pub fn rule_type(&self) -> RuleType {
    match self {
      Self::Quorum(_) => RuleType::Quorum,
      Self::Deadline(_) => RuleType::Deadline,
      Self::Interstice(_) => RuleType::Interstice,
      Self::Routing(_) => RuleType::Routing,
      Self::Voting(_) => RuleType::Voting,
      Self::Initiative(_) => RuleType::Initiative,
      Self::Impediment(_) => RuleType::Impediment,
      Self::Publicity(_) => RuleType::Publicity,
    }
  }
}

// ─── RuleDefinition ──────────────────────────────────────────────────────────

/// One regimental rule: stable code, condition payload, severity, and the
/// static text shown when the rule is violated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
  /// Unique, stable identifier (e.g. `"RR-030"`). Reports and the UI
  /// reference rules by this code.
  pub code:                  String,
  pub name:                  String,
  pub description:           String,
  /// Inactive rules are skipped entirely by the engine.
  pub active:                bool,
  pub severity:              Severity,
  pub conditions:            RuleConditions,
  pub error_message:         String,
  pub corrective_suggestion: String,
}

impl RuleDefinition {
  /// The rule-type tag, derived from the condition payload.
  pub fn rule_type(&self) -> RuleType { self.conditions.rule_type() }
}
