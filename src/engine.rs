//! Analyzer facade: top-level API over the five engines.
//!
//! The `Analyzer` owns one immutable [`Services`] bundle built from a
//! complete table set. Every call works on an `Arc` snapshot of that
//! bundle, so a concurrent [`Analyzer::reload`] swaps the whole set at
//! once and no reader ever sees a mix of old and new tables.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use rayon::prelude::*;
use serde::Serialize;

use crate::categories::{Gender, PartOfSpeech};
use crate::error::LinearBResult;
use crate::morphology::{EndingIndex, MorphologicalAnalysis, MorphologicalSegmenter};
use crate::paradigm::{GenerationOptions, InflectedForm, ParadigmGenerator};
use crate::phonology::{ChangeType, DiachronicPath, PhonologyEngine, SoundChangeRule};
use crate::script::{strip_separators, Transcriber, Transcription};
use crate::tables::{LexiconEntry, TableSet, TableSource};

/// Configuration for the analyzer.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Directory holding the four table files. `None` uses the bundled tables.
    pub data_dir: Option<PathBuf>,
}

impl AnalyzerConfig {
    fn load_tables(&self) -> LinearBResult<TableSet> {
        let tables = match &self.data_dir {
            Some(dir) => TableSet::load_dir(dir)?,
            None => TableSet::bundled()?,
        };
        Ok(tables)
    }
}

/// The engines wired to one table set.
#[derive(Debug)]
pub struct Services {
    pub tables: TableSet,
    pub transcriber: Transcriber,
    pub segmenter: MorphologicalSegmenter,
    pub generator: ParadigmGenerator,
    pub phonology: PhonologyEngine,
}

impl Services {
    pub fn new(tables: TableSet) -> Self {
        let endings = Arc::new(EndingIndex::build(&tables.paradigms));
        Self {
            transcriber: Transcriber::new(Arc::clone(&tables.signs)),
            segmenter: MorphologicalSegmenter::new(Arc::clone(&tables.lexicon), endings),
            generator: ParadigmGenerator::new(Arc::clone(&tables.paradigms)),
            phonology: PhonologyEngine::new(Arc::clone(&tables.sound_changes)),
            tables,
        }
    }
}

/// Per-word result of [`Analyzer::full_analysis`].
#[derive(Debug, Clone, Serialize)]
pub struct WordAnalysis {
    pub transcription: Transcription,
    pub analysis: MorphologicalAnalysis,
    /// Present when the lexicon gives a Classical form.
    pub diachronic: Option<DiachronicPath>,
}

/// Statistics about the loaded tables.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzerInfo {
    pub source: String,
    pub signs: usize,
    pub lexicon_entries: usize,
    pub declensions: usize,
    pub conjugations: usize,
    pub endings: usize,
    pub sound_rules: usize,
}

impl std::fmt::Display for AnalyzerInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tables: {}", self.source)?;
        writeln!(f, "  signs:           {}", self.signs)?;
        writeln!(f, "  lexicon entries: {}", self.lexicon_entries)?;
        writeln!(f, "  declensions:     {}", self.declensions)?;
        writeln!(f, "  conjugations:    {}", self.conjugations)?;
        writeln!(f, "  endings:         {}", self.endings)?;
        write!(f, "  sound rules:     {}", self.sound_rules)
    }
}

/// Linear B analyzer.
pub struct Analyzer {
    config: AnalyzerConfig,
    services: RwLock<Arc<Services>>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    /// Load the tables named by `config`. Any table failure is fatal.
    pub fn new(config: AnalyzerConfig) -> LinearBResult<Self> {
        let services = Services::new(config.load_tables()?);
        Ok(Self {
            config,
            services: RwLock::new(Arc::new(services)),
        })
    }

    /// Analyzer over the bundled tables.
    pub fn bundled() -> LinearBResult<Self> {
        Self::new(AnalyzerConfig::default())
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// A consistent view of the current tables and engines.
    pub fn snapshot(&self) -> Arc<Services> {
        Arc::clone(&self.services.read().expect("services lock poisoned"))
    }

    /// Rebuild every table from the configured source and swap the set in.
    ///
    /// On failure the previous set stays in place.
    pub fn reload(&self) -> LinearBResult<()> {
        let services = Arc::new(Services::new(self.config.load_tables()?));
        *self.services.write().expect("services lock poisoned") = services;
        tracing::info!("reloaded data tables");
        Ok(())
    }

    pub fn transcribe(&self, text: &str) -> Vec<Transcription> {
        self.snapshot().transcriber.transcribe_text(text)
    }

    pub fn analyze(&self, transliteration: &str) -> Vec<MorphologicalAnalysis> {
        self.snapshot().segmenter.segment(transliteration)
    }

    /// Segment many words in parallel. Output order matches input order.
    pub fn analyze_words<S: AsRef<str> + Sync>(&self, words: &[S]) -> Vec<Vec<MorphologicalAnalysis>> {
        let services = self.snapshot();
        words
            .par_iter()
            .map(|w| services.segmenter.segment(w.as_ref()))
            .collect()
    }

    /// Paradigm for a stem. A lexicon entry whose stem matches supplies
    /// defaults for declension, gender and attested forms. Attestations
    /// come from the lexicon only when `attested_forms` is `None`;
    /// `Some(&[])` asks for a paradigm with nothing attested.
    pub fn paradigm(
        &self,
        stem: &str,
        part_of_speech: PartOfSpeech,
        declension: Option<&str>,
        gender: Option<Gender>,
        attested_forms: Option<&[String]>,
    ) -> Vec<InflectedForm> {
        let services = self.snapshot();
        let entry = services
            .tables
            .lexicon
            .entries()
            .iter()
            .find(|e| e.stem == stem);

        let mut options = GenerationOptions {
            declension: declension.map(str::to_string),
            gender,
            attested_forms: attested_forms.map(<[String]>::to_vec).unwrap_or_default(),
        };
        if let Some(entry) = entry {
            if options.declension.is_none() {
                options.declension = entry.declension.clone();
            }
            if options.gender.is_none() {
                options.gender = entry.gender;
            }
            if attested_forms.is_none() {
                options.attested_forms = entry.attested_forms.clone();
            }
        }
        services
            .generator
            .generate_all_forms(stem, part_of_speech, &options)
    }

    pub fn diachronic(&self, mycenaean: &str, classical: &str) -> DiachronicPath {
        self.snapshot().phonology.diachronic_path(mycenaean, classical)
    }

    pub fn explain_divergence(&self, mycenaean: &str, classical: &str) -> Vec<String> {
        self.snapshot()
            .phonology
            .explain_divergence(mycenaean, classical)
    }

    /// Transcribe, take the best analysis of each word, and trace the
    /// sound changes of words the lexicon links to a Classical form.
    pub fn full_analysis(&self, text: &str) -> Vec<WordAnalysis> {
        let services = self.snapshot();
        services
            .transcriber
            .transcribe_text(text)
            .into_iter()
            .map(|transcription| {
                let analysis = services.segmenter.best(&transcription.transliteration);
                let diachronic = services
                    .tables
                    .lexicon
                    .resolve(&transcription.transliteration)
                    .and_then(|entry| {
                        let classical = entry.classical_form.as_deref()?;
                        let mycenaean = entry
                            .reconstruction
                            .clone()
                            .unwrap_or_else(|| strip_separators(&transcription.transliteration));
                        Some(services.phonology.diachronic_path(&mycenaean, classical))
                    });
                WordAnalysis {
                    transcription,
                    analysis,
                    diachronic,
                }
            })
            .collect()
    }

    pub fn lexicon(&self) -> Vec<LexiconEntry> {
        self.snapshot().tables.lexicon.entries().to_vec()
    }

    /// Sound-change rules in application order, optionally filtered by type.
    pub fn rules(&self, change_type: Option<ChangeType>) -> Vec<SoundChangeRule> {
        let services = self.snapshot();
        match change_type {
            Some(t) => services
                .phonology
                .changes_by_type(t)
                .into_iter()
                .cloned()
                .collect(),
            None => services.phonology.rules().to_vec(),
        }
    }

    pub fn info(&self) -> AnalyzerInfo {
        let services = self.snapshot();
        let tables = &services.tables;
        AnalyzerInfo {
            source: match &tables.source {
                TableSource::Bundled => "bundled".to_string(),
                TableSource::Directory(dir) => dir.display().to_string(),
            },
            signs: tables.signs.len(),
            lexicon_entries: tables.lexicon.len(),
            declensions: tables.paradigms.declensions().len(),
            conjugations: tables.paradigms.conjugations().len(),
            endings: services.segmenter.endings().distinct_endings(),
            sound_rules: tables.sound_changes.len(),
        }
    }
}
