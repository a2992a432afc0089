//! Paradigm generation: every theoretical inflected form of a stem.
//!
//! Each cell goes through the same chain:
//!
//! ```text
//! stem + ending ──→ apply_orthography ──→ syllabify ──→ surface form
//! ```
//!
//! and is marked attested when its folded surface form appears among the
//! supplied attested forms.

pub mod orthography;
pub mod syllabify;

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

pub use orthography::apply_orthography;
pub use syllabify::syllabify;

use crate::categories::{Case, Gender, Mood, Number, PartOfSpeech, Person, Tense, Voice};
use crate::script::{fold_form, strip_separators, NULL_MARKER};
use crate::tables::paradigms::required_verb_cells;
use crate::tables::ParadigmTables;

/// Grammatical features of one generated form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Features {
    Nominal {
        case: Case,
        number: Number,
        gender: Option<Gender>,
        declension: String,
    },
    Verbal {
        tense: Tense,
        person: Person,
        number: Number,
        mood: Mood,
        voice: Voice,
    },
}

/// One cell of a generated paradigm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InflectedForm {
    /// Syllabified spelling, e.g. `wa-na-ka-te`.
    pub surface_form: String,
    pub features: Features,
    pub attested: bool,
    /// Phonological form before spelling rules, e.g. `wanakte`.
    pub reconstruction: String,
    pub notes: Option<String>,
}

/// Options for [`ParadigmGenerator::generate_all_forms`].
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Declension template; the default declension when absent.
    pub declension: Option<String>,
    pub gender: Option<Gender>,
    pub attested_forms: Vec<String>,
}

/// Builds paradigms from the declension and conjugation templates.
#[derive(Debug, Clone)]
pub struct ParadigmGenerator {
    paradigms: Arc<ParadigmTables>,
}

impl ParadigmGenerator {
    pub fn new(paradigms: Arc<ParadigmTables>) -> Self {
        Self { paradigms }
    }

    /// One form per (cell, ending) of `declension`, in template order.
    ///
    /// An unknown declension falls back to the default template.
    pub fn generate_noun_paradigm(
        &self,
        stem: &str,
        declension: &str,
        gender: Option<Gender>,
        attested_forms: &[String],
    ) -> Vec<InflectedForm> {
        let template = match self.paradigms.declension(declension) {
            Some(t) => t,
            None => {
                let fallback = self.paradigms.default_declension();
                tracing::warn!(
                    requested = declension,
                    fallback = %fallback.name,
                    "unknown declension, using default"
                );
                fallback
            }
        };
        let attested = AttestedSet::new(attested_forms);

        let mut forms = Vec::new();
        for cell in &template.cells {
            for ending in &cell.endings {
                let features = Features::Nominal {
                    case: cell.cell.case,
                    number: cell.cell.number,
                    gender,
                    declension: template.name.clone(),
                };
                forms.push(build_form(stem, ending, features, &attested));
            }
        }
        forms
    }

    /// Present indicative active (three persons, two numbers) plus the
    /// future and aorist third singular.
    pub fn generate_verb_paradigm(&self, root: &str, attested_forms: &[String]) -> Vec<InflectedForm> {
        let conjugation = self.paradigms.default_conjugation();
        let attested = AttestedSet::new(attested_forms);

        let mut forms = Vec::new();
        for required in required_verb_cells() {
            let Some(cell) = conjugation.cells.iter().find(|c| c.cell == required) else {
                continue;
            };
            for ending in &cell.endings {
                let features = Features::Verbal {
                    tense: required.tense,
                    person: required.person,
                    number: required.number,
                    mood: Mood::Indicative,
                    voice: Voice::Active,
                };
                forms.push(build_form(root, ending, features, &attested));
            }
        }
        forms
    }

    /// Dispatch on part of speech. Parts of speech without a paradigm
    /// yield an empty list.
    pub fn generate_all_forms(
        &self,
        stem: &str,
        part_of_speech: PartOfSpeech,
        options: &GenerationOptions,
    ) -> Vec<InflectedForm> {
        if part_of_speech.is_nominal() {
            let declension = options
                .declension
                .as_deref()
                .unwrap_or(crate::tables::paradigms::DEFAULT_DECLENSION);
            return self.generate_noun_paradigm(
                stem,
                declension,
                options.gender,
                &options.attested_forms,
            );
        }
        if part_of_speech == PartOfSpeech::Verb {
            return self.generate_verb_paradigm(stem, &options.attested_forms);
        }
        tracing::warn!(%part_of_speech, "no paradigm for part of speech");
        Vec::new()
    }
}

/// Folded attested forms for membership tests.
struct AttestedSet(HashSet<String>);

impl AttestedSet {
    fn new(forms: &[String]) -> Self {
        Self(forms.iter().map(|f| fold_form(f)).collect())
    }

    fn contains(&self, surface_form: &str) -> bool {
        self.0.contains(&fold_form(surface_form))
    }
}

fn build_form(stem: &str, ending: &str, features: Features, attested: &AttestedSet) -> InflectedForm {
    let reconstruction = reconstruct(stem, ending);
    let surface_form = syllabify(&apply_orthography(&reconstruction));
    let is_attested = attested.contains(&surface_form);
    InflectedForm {
        notes: (!is_attested).then(|| "Reconstructed; no attestation supplied".to_string()),
        attested: is_attested,
        surface_form,
        features,
        reconstruction,
    }
}

/// `stem + ending` with separators removed; the null ending leaves the bare stem.
fn reconstruct(stem: &str, ending: &str) -> String {
    let ending: String = strip_separators(ending.trim())
        .chars()
        .filter(|&c| c != NULL_MARKER)
        .collect();
    format!("{}{ending}", strip_separators(stem.trim()))
}
