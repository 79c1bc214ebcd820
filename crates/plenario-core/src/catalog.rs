//! The rule catalog — the versioned set of regimental rules the engine
//! evaluates.
//!
//! Catalogs are immutable once built and injected into the engine, so test
//! suites can substitute custom rule sets without touching global state.
//! Administrative rule editing, if a câmara ever needs it, is an external
//! concern that would produce a new catalog.

use std::collections::HashSet;

use crate::{
  error::{Error, Result},
  rule::{
    DeadlineAnchor, DeadlineConditions, DeadlineSpan, ImpedimentConditions,
    ImpedimentScope, InitiativeConditions, IntersticeConditions,
    IntersticeSpan, PublicityConditions, PublicityTarget, QuorumConditions,
    QuorumKind, RoutingCheck, RoutingConditions, RuleConditions,
    RuleDefinition, Severity, VotingCheck, VotingConditions,
  },
};

/// An immutable, validated collection of rule definitions.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
  rules: Vec<RuleDefinition>,
}

impl RuleCatalog {
  /// Build a catalog from `rules`, rejecting duplicate rule codes.
  pub fn new(rules: Vec<RuleDefinition>) -> Result<Self> {
    let mut seen = HashSet::new();
    for rule in &rules {
      if !seen.insert(rule.code.as_str()) {
        return Err(Error::DuplicateRuleCode(rule.code.clone()));
      }
    }
    Ok(Self { rules })
  }

  /// All rules, active or not, in catalog order.
  pub fn rules(&self) -> &[RuleDefinition] { &self.rules }

  /// Rules with `active = true`, in catalog order.
  pub fn active(&self) -> impl Iterator<Item = &RuleDefinition> {
    self.rules.iter().filter(|r| r.active)
  }

  /// Look up a rule by its stable code.
  pub fn get(&self, code: &str) -> Option<&RuleDefinition> {
    self.rules.iter().find(|r| r.code == code)
  }

  pub fn len(&self) -> usize { self.rules.len() }

  pub fn is_empty(&self) -> bool { self.rules.is_empty() }

  /// The standard catalog of the regimento interno.
  ///
  /// Code uniqueness is pinned by a test rather than re-validated on every
  /// construction.
  pub fn regimental() -> Self {
    Self {
      rules: regimental_rules(),
    }
  }
}

/// Shorthand constructor for the catalog entries below.
fn rule(
  code: &str,
  name: &str,
  severity: Severity,
  conditions: RuleConditions,
  description: &str,
  error_message: &str,
  corrective_suggestion: &str,
) -> RuleDefinition {
  RuleDefinition {
    code: code.to_string(),
    name: name.to_string(),
    description: description.to_string(),
    active: true,
    severity,
    conditions,
    error_message: error_message.to_string(),
    corrective_suggestion: corrective_suggestion.to_string(),
  }
}

fn regimental_rules() -> Vec<RuleDefinition> {
  vec![
    // ── Quórum ───────────────────────────────────────────────────────────
    rule(
      "RR-001",
      "Quórum de instalação da sessão",
      Severity::Blocking,
      RuleConditions::Quorum(QuorumConditions {
        kind:            QuorumKind::Absolute,
        minimum_percent: Some(50),
      }),
      "A sessão plenária somente se instala com a presença da maioria \
       absoluta dos vereadores.",
      "Sessão sem quórum de instalação",
      "Aguardar a presença da maioria absoluta dos vereadores antes de \
       abrir a sessão.",
    ),
    rule(
      "RR-002",
      "Quórum de deliberação simples",
      Severity::Blocking,
      RuleConditions::Quorum(QuorumConditions {
        kind:            QuorumKind::Simple,
        minimum_percent: None,
      }),
      "Deliberações ordinárias exigem maioria simples dos presentes.",
      "Quórum de deliberação não atingido",
      "Verificar o registro de presenças da sessão.",
    ),
    rule(
      "RR-003",
      "Quórum qualificado",
      Severity::Blocking,
      RuleConditions::Quorum(QuorumConditions {
        kind:            QuorumKind::Qualified,
        minimum_percent: Some(67),
      }),
      "Matérias com exigência qualificada dependem do voto de dois terços \
       dos membros da Câmara.",
      "Quórum qualificado de dois terços não atingido",
      "Adiar a deliberação até que dois terços dos membros estejam \
       presentes.",
    ),
    // ── Prazos ───────────────────────────────────────────────────────────
    rule(
      "RR-010",
      "Prazo para parecer de comissão",
      Severity::Warning,
      RuleConditions::Deadline(DeadlineConditions {
        anchor: DeadlineAnchor::LatestRoutingStep,
        span:   DeadlineSpan::BusinessDays(15),
      }),
      "A comissão emite parecer em até 15 dias úteis contados da \
       distribuição da matéria.",
      "Prazo para emissão de parecer esgotado",
      "Cobrar da comissão a emissão do parecer ou avocar a matéria ao \
       plenário.",
    ),
    rule(
      "RR-011",
      "Prazo para sanção do Executivo",
      Severity::Warning,
      RuleConditions::Deadline(DeadlineConditions {
        anchor: DeadlineAnchor::LatestRoutingStep,
        span:   DeadlineSpan::BusinessDays(15),
      }),
      "O Executivo dispõe de 15 dias úteis para sancionar ou vetar o \
       autógrafo.",
      "Prazo de sanção esgotado",
      "Promulgar a matéria pela Mesa Diretora, nos termos do regimento.",
    ),
    rule(
      "RR-012",
      "Prazo para apreciação de veto",
      Severity::Warning,
      RuleConditions::Deadline(DeadlineConditions {
        anchor: DeadlineAnchor::VoteOrLastUpdate,
        span:   DeadlineSpan::CalendarDays(30),
      }),
      "O veto é apreciado pelo plenário em até 30 dias corridos.",
      "Prazo de apreciação do veto esgotado",
      "Incluir o veto na ordem do dia da próxima sessão.",
    ),
    rule(
      "RR-013",
      "Prazo de publicação da pauta",
      Severity::Warning,
      RuleConditions::Deadline(DeadlineConditions {
        anchor: DeadlineAnchor::SessionStart,
        span:   DeadlineSpan::HoursBefore(48),
      }),
      "A pauta da sessão é publicada com antecedência mínima de 48 horas.",
      "Pauta publicada fora do prazo regimental",
      "Publicar a pauta e reagendar a sessão respeitando a antecedência \
       mínima.",
    ),
    // ── Interstícios ─────────────────────────────────────────────────────
    rule(
      "RR-020",
      "Interstício entre votações",
      Severity::Error,
      RuleConditions::Interstice(IntersticeConditions {
        minimum: IntersticeSpan::Hours(24),
      }),
      "Entre a primeira e a segunda votação de matéria ordinária deve \
       transcorrer no mínimo 24 horas.",
      "Interstício mínimo entre votações não respeitado",
      "Agendar a segunda votação para sessão posterior ao interstício.",
    ),
    rule(
      "RR-021",
      "Interstício para emenda à Lei Orgânica",
      Severity::Error,
      RuleConditions::Interstice(IntersticeConditions {
        minimum: IntersticeSpan::CalendarDays(10),
      }),
      "Emendas à Lei Orgânica exigem interstício mínimo de 10 dias \
       corridos entre os dois turnos de votação.",
      "Interstício entre turnos de votação não respeitado",
      "Agendar o segundo turno respeitando o interstício de 10 dias.",
    ),
    // ── Tramitação ───────────────────────────────────────────────────────
    rule(
      "RR-030",
      "Passagem obrigatória pela Comissão de Legislação e Justiça",
      Severity::Blocking,
      RuleConditions::Routing(RoutingConditions {
        check: RoutingCheck::CommitteeOpinion,
      }),
      "Toda proposição passa pela comissão de legislação e justiça, com \
       parecer registrado, antes de ir a plenário.",
      "Matéria sem passagem por comissão com parecer registrado",
      "Encaminhar a proposição à Comissão de Legislação e Justiça para \
       emissão de parecer.",
    ),
    rule(
      "RR-031",
      "Parecer obrigatório para inclusão em pauta",
      Severity::Blocking,
      RuleConditions::Routing(RoutingConditions {
        check: RoutingCheck::AnyOpinion,
      }),
      "Nenhuma proposição entra na ordem do dia sem parecer registrado na \
       tramitação.",
      "Proposição sem parecer registrado",
      "Aguardar a emissão de parecer antes de incluir a matéria em pauta.",
    ),
    // ── Votação ──────────────────────────────────────────────────────────
    rule(
      "RR-040",
      "Votação nominal obrigatória",
      Severity::Blocking,
      RuleConditions::Voting(VotingConditions {
        check: VotingCheck::RequireNominal {
          matters: vec![
            "QUORUM_QUALIFICADO".to_string(),
            "EMENDA_LEI_ORGANICA".to_string(),
            "VETO".to_string(),
          ],
        },
      }),
      "Matérias com quórum qualificado, emendas à Lei Orgânica e vetos \
       exigem votação nominal.",
      "Método de votação incompatível com a matéria",
      "Configurar a votação como nominal antes da abertura.",
    ),
    rule(
      "RR-041",
      "Votação secreta restrita",
      Severity::Blocking,
      RuleConditions::Voting(VotingConditions {
        check: VotingCheck::RestrictSecret {
          matters: vec![
            "ELEICAO_MESA".to_string(),
            "CASSACAO_MANDATO".to_string(),
          ],
        },
      }),
      "O escrutínio secreto é admitido apenas para eleição da Mesa e \
       cassação de mandato.",
      "Votação secreta não admitida para a matéria",
      "Alterar o método de votação para nominal ou simbólica.",
    ),
    // ── Iniciativa ───────────────────────────────────────────────────────
    rule(
      "RR-050",
      "Iniciativa privativa do Executivo",
      Severity::Blocking,
      RuleConditions::Initiative(InitiativeConditions {
        exclusive_subjects: vec![
          "CRIACAO_CARGO".to_string(),
          "AUMENTO_REMUNERACAO".to_string(),
          "REGIME_JURIDICO_SERVIDORES".to_string(),
          "REORGANIZACAO_ADMINISTRATIVA".to_string(),
          "MATERIA_ORCAMENTARIA".to_string(),
        ],
      }),
      "Matérias sobre criação de cargos, remuneração, regime jurídico dos \
       servidores, reorganização administrativa e orçamento são de \
       iniciativa privativa do Prefeito.",
      "Matéria de iniciativa privativa proposta por parlamentar",
      "Arquivar a proposição ou solicitar ao Executivo o envio de projeto \
       próprio.",
    ),
    // ── Impedimentos ─────────────────────────────────────────────────────
    rule(
      "RR-060",
      "Impedimento de voto em causa própria",
      Severity::Warning,
      RuleConditions::Impediment(ImpedimentConditions {
        scope: ImpedimentScope::SelfVote,
      }),
      "O autor da proposição não participa da votação da própria matéria.",
      "Parlamentar votando em causa própria",
      "Registrar o impedimento do autor antes da abertura da votação.",
    ),
    rule(
      "RR-061",
      "Impedimento por interesse pessoal",
      Severity::Warning,
      RuleConditions::Impediment(ImpedimentConditions {
        scope: ImpedimentScope::PersonalInterest,
      }),
      "Vereador com interesse pessoal, familiar ou negocial na matéria \
       declara-se impedido.",
      "Possível impedimento por interesse pessoal",
      "Colher declaração de impedimento do vereador interessado.",
    ),
    // ── Publicidade ──────────────────────────────────────────────────────
    rule(
      "RR-070",
      "Publicação do resultado de votação nominal",
      Severity::Warning,
      RuleConditions::Publicity(PublicityConditions {
        target:        PublicityTarget::RollCallResults,
        calendar_days: 30,
      }),
      "O resultado de votações nominais é publicado no portal em até 30 \
       dias.",
      "Resultado de votação nominal não publicado no prazo",
      "Publicar o resultado da votação no portal de transparência.",
    ),
    rule(
      "RR-071",
      "Publicação da ata da sessão",
      Severity::Warning,
      RuleConditions::Publicity(PublicityConditions {
        target:        PublicityTarget::SessionMinutes,
        calendar_days: 15,
      }),
      "A ata da sessão é publicada em até 15 dias contados de sua \
       aprovação.",
      "Ata de sessão não publicada no prazo",
      "Publicar a ata aprovada no portal de transparência.",
    ),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::rule::RuleType;

  #[test]
  fn regimental_codes_are_unique() {
    let catalog = RuleCatalog::regimental();
    let rules = catalog.rules().to_vec();
    // Re-validating through the checked constructor must succeed.
    RuleCatalog::new(rules).unwrap();
  }

  #[test]
  fn duplicate_codes_are_rejected() {
    let mut rules = regimental_rules();
    let dup = rules[0].clone();
    rules.push(dup);
    let err = RuleCatalog::new(rules).unwrap_err();
    assert!(matches!(err, Error::DuplicateRuleCode(code) if code == "RR-001"));
  }

  #[test]
  fn regimental_covers_every_rule_type() {
    let catalog = RuleCatalog::regimental();
    for expected in [
      RuleType::Quorum,
      RuleType::Deadline,
      RuleType::Interstice,
      RuleType::Routing,
      RuleType::Voting,
      RuleType::Initiative,
      RuleType::Impediment,
      RuleType::Publicity,
    ] {
      assert!(
        catalog.rules().iter().any(|r| r.rule_type() == expected),
        "missing rule type {expected:?}"
      );
    }
  }

  #[test]
  fn lookup_by_code() {
    let catalog = RuleCatalog::regimental();
    let clj = catalog.get("RR-030").unwrap();
    assert_eq!(clj.rule_type(), RuleType::Routing);
    assert!(catalog.get("RR-999").is_none());
  }

  #[test]
  fn all_regimental_rules_start_active() {
    let catalog = RuleCatalog::regimental();
    assert_eq!(catalog.active().count(), catalog.len());
  }
}
