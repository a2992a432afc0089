//! Diachronic phonology: Mycenaean → Classical Greek derivations.
//!
//! The engine is *directed*: the known Classical form acts as an oracle
//! that decides whether a positional or contextual rule fires. Rules are
//! scanned exactly once in authored order; each fired rule rewrites the
//! running form, and later rules see that output. There is no
//! backtracking and no fixed-point iteration.

pub mod rules;

use std::sync::Arc;

use serde::Serialize;

pub use rules::{ChangeType, Environment, SoundChangeRule, SoundChangeTable};

use crate::script::{fold_form, is_vowel};

/// Period label of the first stage.
pub const MYCENAEAN_PERIOD: &str = "1450-1200 BCE";
/// Period label of the last stage.
pub const CLASSICAL_PERIOD: &str = "800-400 BCE";

/// One form on the path, tagged with its period and what produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub form: String,
    pub period: String,
    pub label: String,
}

/// Stage-by-stage derivation between two forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiachronicPath {
    pub mycenaean: String,
    pub classical: String,
    pub stages: Vec<Stage>,
    pub applied_rules: Vec<SoundChangeRule>,
}

impl DiachronicPath {
    pub fn applied_rule_names(&self) -> Vec<&str> {
        self.applied_rules.iter().map(|r| r.name.as_str()).collect()
    }
}

/// Applies the ordered sound-change table.
#[derive(Debug, Clone)]
pub struct PhonologyEngine {
    table: Arc<SoundChangeTable>,
}

impl PhonologyEngine {
    pub fn new(table: Arc<SoundChangeTable>) -> Self {
        Self { table }
    }

    pub fn rules(&self) -> &[SoundChangeRule] {
        self.table.rules()
    }

    pub fn changes_by_type(&self, change_type: ChangeType) -> Vec<&SoundChangeRule> {
        self.rules()
            .iter()
            .filter(|r| r.change_type == change_type)
            .collect()
    }

    /// Trace `mycenaean` towards `classical` through the rule table.
    ///
    /// Both inputs are folded (separators stripped, lowercased). A stage is
    /// recorded only when a rule actually changed the form; the Classical
    /// stage is always last.
    pub fn diachronic_path(&self, mycenaean: &str, classical: &str) -> DiachronicPath {
        let mycenaean = fold_form(mycenaean);
        let classical = fold_form(classical);

        let mut stages = vec![Stage {
            form: mycenaean.clone(),
            period: MYCENAEAN_PERIOD.to_string(),
            label: "Mycenaean Greek (attested)".to_string(),
        }];
        let mut applied_rules = Vec::new();
        let mut current = mycenaean.clone();

        for rule in self.rules() {
            let Some(source) = firing_source(&current, &classical, rule) else {
                continue;
            };
            let next = apply_source(&current, rule, source);
            if next == current {
                continue;
            }
            tracing::debug!(rule = %rule.name, from = %current, to = %next, "sound change applied");
            stages.push(Stage {
                form: next.clone(),
                period: rule.period.clone(),
                label: rule.name.clone(),
            });
            applied_rules.push(rule.clone());
            current = next;
        }

        stages.push(Stage {
            form: classical.clone(),
            period: CLASSICAL_PERIOD.to_string(),
            label: "Classical Greek".to_string(),
        });

        DiachronicPath {
            mycenaean,
            classical,
            stages,
            applied_rules,
        }
    }

    /// `name: description` for each applied rule, in application order.
    pub fn explain_divergence(&self, mycenaean: &str, classical: &str) -> Vec<String> {
        self.diachronic_path(mycenaean, classical)
            .applied_rules
            .iter()
            .map(|r| format!("{}: {}", r.name, r.description))
            .collect()
    }
}

/// Whether `rule` fires on `current` given the `target` endpoint.
///
/// - `#_`: current starts with the source, target no longer does
/// - `_#`: current ends with the source, target no longer does
/// - `V_V`: the source occurs between two vowels in current
/// - otherwise: source present in current and absent from target
pub fn rule_applies(current: &str, target: &str, rule: &SoundChangeRule) -> bool {
    firing_source(current, target, rule).is_some()
}

/// Apply `rule` to `form` unconditionally, using the first source
/// alternative found in the position the environment requires.
pub fn apply_rule(form: &str, rule: &SoundChangeRule) -> String {
    let found = rule.sources().iter().find(|src| match rule.environment {
        Environment::WordInitial => form.starts_with(src.as_str()),
        Environment::WordFinal => form.ends_with(src.as_str()),
        _ => form.contains(src.as_str()),
    });
    match found {
        Some(source) => apply_source(form, rule, source),
        None => form.to_string(),
    }
}

fn firing_source<'r>(current: &str, target: &str, rule: &'r SoundChangeRule) -> Option<&'r str> {
    rule.sources()
        .iter()
        .map(String::as_str)
        .find(|&src| match rule.environment {
            Environment::WordInitial => current.starts_with(src) && !target.starts_with(src),
            Environment::WordFinal => current.ends_with(src) && !target.ends_with(src),
            Environment::Intervocalic => is_intervocalic(current, src),
            Environment::Context(_) => current.contains(src) && !target.contains(src),
        })
}

fn apply_source(form: &str, rule: &SoundChangeRule, source: &str) -> String {
    match (&rule.target_pattern, &rule.environment) {
        (None, Environment::WordInitial) => form.strip_prefix(source).unwrap_or(form).to_string(),
        (None, Environment::WordFinal) => form.strip_suffix(source).unwrap_or(form).to_string(),
        (None, _) => form.replace(source, ""),
        (Some(target), _) => form.replace(source, target),
    }
}

/// Any occurrence of `segment` with a vowel on both sides.
fn is_intervocalic(word: &str, segment: &str) -> bool {
    word.match_indices(segment).any(|(idx, _)| {
        let before = word[..idx].chars().next_back();
        let after = word[idx + segment.len()..].chars().next();
        matches!((before, after), (Some(b), Some(a)) if is_vowel(b) && is_vowel(a))
    })
}
