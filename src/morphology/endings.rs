//! Reverse index from surface ending to grammatical readings.

use std::collections::HashMap;

use serde::Serialize;

use crate::categories::{Case, Number};
use crate::script::{strip_separators, NULL_MARKER};
use crate::tables::ParadigmTables;

/// One grammatical reading of an ending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndingRule {
    pub ending: String,
    pub case: Case,
    pub number: Number,
    pub declension: String,
}

/// Ending → readings, built once from the declension templates.
///
/// The mapping is many-to-many and deliberately not deduplicated: `-o`
/// is both genitive and instrumental singular of the o-stems, and both
/// readings are real.
#[derive(Debug, Clone, Default)]
pub struct EndingIndex {
    /// Registration order.
    rules: Vec<EndingRule>,
    /// Indices into `rules`, longest ending first, stable on ties.
    by_length: Vec<usize>,
    by_ending: HashMap<String, Vec<usize>>,
}

impl EndingIndex {
    pub fn build(paradigms: &ParadigmTables) -> Self {
        let mut rules = Vec::new();
        for declension in paradigms.declensions() {
            for cell in &declension.cells {
                for raw in &cell.endings {
                    let ending: String = strip_separators(raw.trim())
                        .chars()
                        .filter(|&c| c != NULL_MARKER)
                        .collect();
                    if ending.is_empty() {
                        continue;
                    }
                    rules.push(EndingRule {
                        ending,
                        case: cell.cell.case,
                        number: cell.cell.number,
                        declension: declension.name.clone(),
                    });
                }
            }
        }
        Self::from_rules(rules)
    }

    pub fn from_rules(rules: Vec<EndingRule>) -> Self {
        let mut by_ending: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, rule) in rules.iter().enumerate() {
            by_ending.entry(rule.ending.clone()).or_default().push(i);
        }
        let mut by_length: Vec<usize> = (0..rules.len()).collect();
        by_length.sort_by_key(|&i| std::cmp::Reverse(rules[i].ending.chars().count()));

        tracing::debug!(
            rules = rules.len(),
            endings = by_ending.len(),
            "built ending index"
        );
        Self {
            rules,
            by_length,
            by_ending,
        }
    }

    /// Every reading of `ending`, in registration order.
    pub fn lookup(&self, ending: &str) -> Vec<&EndingRule> {
        self.by_ending
            .get(ending)
            .map(|ids| ids.iter().map(|&i| &self.rules[i]).collect())
            .unwrap_or_default()
    }

    /// All rules, longest ending first; equal lengths keep registration order.
    pub fn longest_first(&self) -> impl Iterator<Item = &EndingRule> + '_ {
        self.by_length.iter().map(|&i| &self.rules[i])
    }

    pub fn rules(&self) -> &[EndingRule] {
        &self.rules
    }

    /// Number of distinct ending strings.
    pub fn distinct_endings(&self) -> usize {
        self.by_ending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
