//! Morphological segmentation: stem + ending with ranked readings.
//!
//! Two paths:
//! - **Known words** (lexicon key or attested form): every matching ending
//!   yields an analysis at [`CONFIDENCE_ATTESTED`]; with no match the word
//!   is taken as its citation form at [`CONFIDENCE_CITATION`].
//! - **Unknown words**: endings are tried longest first; stems shorter than
//!   two characters are rejected. If nothing fits, a single
//!   [`CONFIDENCE_FALLBACK`] analysis is returned.
//!
//! Segmentation never fails.

pub mod endings;

use std::sync::Arc;

use serde::Serialize;

pub use endings::{EndingIndex, EndingRule};

use crate::categories::{Case, Number};
use crate::script::fold_form;
use crate::tables::{Lexicon, LexiconEntry};

pub const CONFIDENCE_ATTESTED: f32 = 0.9;
pub const CONFIDENCE_CITATION: f32 = 0.8;
pub const CONFIDENCE_LONG_ENDING: f32 = 0.6;
pub const CONFIDENCE_SHORT_ENDING: f32 = 0.4;
pub const CONFIDENCE_FALLBACK: f32 = 0.1;

/// Shortest stem the unknown-word path will accept.
const MIN_STEM_CHARS: usize = 2;

/// One candidate segmentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MorphologicalAnalysis {
    pub stem: String,
    /// Empty for citation forms and unsegmentable words.
    pub ending: String,
    pub case: Option<Case>,
    pub number: Option<Number>,
    pub declension: Option<String>,
    pub confidence: f32,
    pub notes: Option<String>,
}

/// Splits transliterations against the ending index and the lexicon.
#[derive(Debug, Clone)]
pub struct MorphologicalSegmenter {
    lexicon: Arc<Lexicon>,
    endings: Arc<EndingIndex>,
}

impl MorphologicalSegmenter {
    pub fn new(lexicon: Arc<Lexicon>, endings: Arc<EndingIndex>) -> Self {
        Self { lexicon, endings }
    }

    pub fn endings(&self) -> &EndingIndex {
        &self.endings
    }

    /// All candidate analyses, highest confidence first.
    pub fn segment(&self, transliteration: &str) -> Vec<MorphologicalAnalysis> {
        let normalized = fold_form(transliteration);
        let mut analyses = match self.lexicon.resolve(transliteration) {
            Some(entry) => self.segment_known(&normalized, entry),
            None => self.segment_unknown(&normalized),
        };
        analyses.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        analyses
    }

    /// The top-ranked analysis.
    pub fn best(&self, transliteration: &str) -> MorphologicalAnalysis {
        let normalized = fold_form(transliteration);
        self.segment(transliteration)
            .into_iter()
            .next()
            .unwrap_or_else(|| fallback(&normalized))
    }

    fn segment_known(&self, normalized: &str, entry: &LexiconEntry) -> Vec<MorphologicalAnalysis> {
        let note = format!("Attested in lexicon: {}", entry.meaning);
        let analyses: Vec<_> = self
            .endings
            .longest_first()
            .filter_map(|rule| {
                let stem = normalized.strip_suffix(rule.ending.as_str())?;
                (!stem.is_empty()).then(|| MorphologicalAnalysis {
                    stem: stem.to_string(),
                    ending: rule.ending.clone(),
                    case: Some(rule.case),
                    number: Some(rule.number),
                    declension: Some(rule.declension.clone()),
                    confidence: CONFIDENCE_ATTESTED,
                    notes: Some(note.clone()),
                })
            })
            .collect();

        if !analyses.is_empty() {
            return analyses;
        }
        vec![MorphologicalAnalysis {
            stem: entry.stem.clone(),
            ending: String::new(),
            case: Some(Case::Nominative),
            number: Some(Number::Singular),
            declension: entry.declension.clone(),
            confidence: CONFIDENCE_CITATION,
            notes: Some(format!("Citation form: {}", entry.meaning)),
        }]
    }

    fn segment_unknown(&self, normalized: &str) -> Vec<MorphologicalAnalysis> {
        let analyses: Vec<_> = self
            .endings
            .longest_first()
            .filter_map(|rule| {
                let stem = normalized.strip_suffix(rule.ending.as_str())?;
                if stem.chars().count() < MIN_STEM_CHARS {
                    return None;
                }
                let confidence = if rule.ending.chars().count() >= 2 {
                    CONFIDENCE_LONG_ENDING
                } else {
                    CONFIDENCE_SHORT_ENDING
                };
                Some(MorphologicalAnalysis {
                    stem: stem.to_string(),
                    ending: rule.ending.clone(),
                    case: Some(rule.case),
                    number: Some(rule.number),
                    declension: Some(rule.declension.clone()),
                    confidence,
                    notes: Some(format!("Unattested; {} ending", rule.declension)),
                })
            })
            .collect();

        if analyses.is_empty() {
            vec![fallback(normalized)]
        } else {
            analyses
        }
    }
}

fn fallback(normalized: &str) -> MorphologicalAnalysis {
    MorphologicalAnalysis {
        stem: normalized.to_string(),
        ending: String::new(),
        case: None,
        number: None,
        declension: None,
        confidence: CONFIDENCE_FALLBACK,
        notes: Some("No known ending matched".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{Gender, PartOfSpeech};

    fn rule(ending: &str, case: Case, number: Number, declension: &str) -> EndingRule {
        EndingRule {
            ending: ending.into(),
            case,
            number,
            declension: declension.into(),
        }
    }

    fn segmenter() -> MorphologicalSegmenter {
        let lexicon = Lexicon::from_entries(vec![LexiconEntry {
            key: "wa-na-ka".into(),
            stem: "wanak".into(),
            part_of_speech: PartOfSpeech::Noun,
            declension: Some("consonant_stem".into()),
            gender: Some(Gender::Masculine),
            meaning: "king".into(),
            classical_form: Some("anax".into()),
            reconstruction: Some("wanaks".into()),
            pie_root: None,
            pie_meaning: None,
            cognates: Vec::new(),
            attested_forms: vec!["wa-na-ka".into(), "wa-na-ka-te".into()],
        }])
        .unwrap();
        let endings = EndingIndex::from_rules(vec![
            rule("os", Case::Nominative, Number::Singular, "o_stem_masculine"),
            rule("o", Case::Genitive, Number::Singular, "o_stem_masculine"),
            rule("o", Case::Instrumental, Number::Singular, "o_stem_masculine"),
            rule("e", Case::Dative, Number::Singular, "consonant_stem"),
            rule("te", Case::Dative, Number::Singular, "consonant_stem"),
            rule("ja", Case::Nominative, Number::Singular, "a_stem_feminine"),
        ]);
        MorphologicalSegmenter::new(Arc::new(lexicon), Arc::new(endings))
    }

    fn assert_non_increasing(analyses: &[MorphologicalAnalysis]) {
        for pair in analyses.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence, "{analyses:?}");
        }
    }

    #[test]
    fn attested_form_takes_the_lexicon_path() {
        let analyses = segmenter().segment("wa-na-ka-te");
        let top = &analyses[0];
        assert_eq!(top.ending, "te");
        assert_eq!(top.stem, "wanaka");
        assert_eq!(top.case, Some(Case::Dative));
        assert_eq!(top.confidence, CONFIDENCE_ATTESTED);
        assert_eq!(top.notes.as_deref(), Some("Attested in lexicon: king"));
        assert_eq!(analyses[1].ending, "e");
        assert_non_increasing(&analyses);
    }

    #[test]
    fn known_word_without_ending_is_citation_form() {
        let analyses = segmenter().segment("wa-na-ka");
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].stem, "wanak");
        assert_eq!(analyses[0].ending, "");
        assert_eq!(analyses[0].case, Some(Case::Nominative));
        assert_eq!(analyses[0].number, Some(Number::Singular));
        assert_eq!(analyses[0].confidence, CONFIDENCE_CITATION);
    }

    #[test]
    fn unknown_word_ranks_long_endings_first() {
        let analyses = segmenter().segment("do-e-ro-os");
        assert_eq!(analyses[0].ending, "os");
        assert_eq!(analyses[0].confidence, CONFIDENCE_LONG_ENDING);
        let short: Vec<_> = analyses.iter().filter(|a| a.ending == "o").collect();
        assert!(short.is_empty());
        assert_non_increasing(&analyses);
    }

    #[test]
    fn ambiguous_ending_keeps_every_reading() {
        let analyses = segmenter().segment("do-e-ro");
        let cases: Vec<_> = analyses.iter().map(|a| a.case).collect();
        assert_eq!(cases, [Some(Case::Genitive), Some(Case::Instrumental)]);
        assert!(analyses.iter().all(|a| a.confidence == CONFIDENCE_SHORT_ENDING));
    }

    #[test]
    fn short_stems_are_rejected() {
        // "ko" would leave "k" before -o.
        let analyses = segmenter().segment("ko");
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].confidence, CONFIDENCE_FALLBACK);
        assert_eq!(analyses[0].stem, "ko");
    }

    #[test]
    fn unsegmentable_and_empty_input_fall_back() {
        let s = segmenter();
        assert_eq!(s.segment("pa-ka")[0].confidence, CONFIDENCE_FALLBACK);
        let empty = s.segment("");
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].confidence, CONFIDENCE_FALLBACK);
        assert_eq!(s.best("").confidence, CONFIDENCE_FALLBACK);
    }

    #[test]
    fn ranking_is_non_increasing_for_many_inputs() {
        let s = segmenter();
        for word in ["wa-na-ka-te", "po-ti-ni-ja", "a-ja", "te-o", "e-ke", "", "x"] {
            assert_non_increasing(&s.segment(word));
        }
    }
}
