//! Lexicon: attested Mycenaean words keyed by transliteration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::{TableError, TableResult};
use crate::categories::{Gender, PartOfSpeech};
use crate::script::fold_form;

const TABLE: &str = "lexicon";

/// One dictionary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Hyphenated transliteration, e.g. `wa-na-ka`.
    pub key: String,
    pub stem: String,
    pub part_of_speech: PartOfSpeech,
    #[serde(default)]
    pub declension: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub meaning: String,
    #[serde(default, rename = "classical")]
    pub classical_form: Option<String>,
    /// Phonological reconstruction of the Mycenaean form.
    #[serde(default)]
    pub reconstruction: Option<String>,
    #[serde(default)]
    pub pie_root: Option<String>,
    #[serde(default)]
    pub pie_meaning: Option<String>,
    #[serde(default)]
    pub cognates: Vec<String>,
    #[serde(default, rename = "attested")]
    pub attested_forms: Vec<String>,
}

/// Immutable lexicon with a literal key index and a folded
/// attested-form index.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    by_key: HashMap<String, usize>,
    by_form: HashMap<String, usize>,
}

impl Lexicon {
    pub fn from_entries(entries: Vec<LexiconEntry>) -> TableResult<Self> {
        let mut by_key = HashMap::with_capacity(entries.len());
        let mut by_form = HashMap::new();

        for (i, entry) in entries.iter().enumerate() {
            if entry.key.trim().is_empty() || entry.stem.trim().is_empty() {
                return Err(TableError::invalid(
                    TABLE,
                    format!("entry #{} needs a non-empty key and stem", i + 1),
                ));
            }
            if by_key.insert(entry.key.clone(), i).is_some() {
                return Err(TableError::invalid(
                    TABLE,
                    format!("duplicate key \"{}\"", entry.key),
                ));
            }
            // The first entry to claim a spelling keeps it.
            for form in std::iter::once(&entry.key).chain(&entry.attested_forms) {
                by_form.entry(fold_form(form)).or_insert(i);
            }
        }

        Ok(Self {
            entries,
            by_key,
            by_form,
        })
    }

    /// Exact lookup by transliteration key.
    pub fn get(&self, key: &str) -> Option<&LexiconEntry> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    /// Literal key first, then any entry listing the form as attested.
    pub fn resolve(&self, transliteration: &str) -> Option<&LexiconEntry> {
        self.get(transliteration).or_else(|| {
            self.by_form
                .get(&fold_form(transliteration))
                .map(|&i| &self.entries[i])
        })
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, stem: &str, attested: &[&str]) -> LexiconEntry {
        LexiconEntry {
            key: key.into(),
            stem: stem.into(),
            part_of_speech: PartOfSpeech::Noun,
            declension: Some("consonant_stem".into()),
            gender: Some(Gender::Masculine),
            meaning: "king".into(),
            classical_form: Some("anax".into()),
            reconstruction: None,
            pie_root: None,
            pie_meaning: None,
            cognates: Vec::new(),
            attested_forms: attested.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn literal_and_attested_lookup() {
        let lexicon =
            Lexicon::from_entries(vec![entry("wa-na-ka", "wanak", &["wa-na-ka-te"])]).unwrap();
        assert_eq!(lexicon.get("wa-na-ka").unwrap().stem, "wanak");
        assert!(lexicon.get("wanaka").is_none());
        assert_eq!(lexicon.resolve("wanaka").unwrap().key, "wa-na-ka");
        assert_eq!(lexicon.resolve("WA-NA-KA-TE").unwrap().key, "wa-na-ka");
        assert!(lexicon.resolve("po-ti-ni-ja").is_none());
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = Lexicon::from_entries(vec![
            entry("wa-na-ka", "wanak", &[]),
            entry("wa-na-ka", "wanak", &[]),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::Invalid { .. }));
    }

    #[test]
    fn blank_stem_is_rejected() {
        assert!(Lexicon::from_entries(vec![entry("wa-na-ka", " ", &[])]).is_err());
    }

    #[test]
    fn deserializes_with_table_field_names() {
        #[derive(Deserialize)]
        struct Doc {
            word: Vec<LexiconEntry>,
        }
        let doc: Doc = toml::from_str(
            r#"
            [[word]]
            key = "te-o"
            stem = "the"
            part_of_speech = "noun"
            gender = "masculine"
            classical = "theos"
            attested = ["te-o"]
            "#,
        )
        .unwrap();
        assert_eq!(doc.word[0].classical_form.as_deref(), Some("theos"));
        assert_eq!(doc.word[0].attested_forms, vec!["te-o"]);
        assert!(doc.word[0].declension.is_none());
    }

    #[test]
    fn unknown_part_of_speech_fails_to_parse() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Doc {
            word: Vec<LexiconEntry>,
        }
        let result: Result<Doc, _> = toml::from_str(
            r#"
            [[word]]
            key = "x"
            stem = "x"
            part_of_speech = "conjunction"
            "#,
        );
        assert!(result.is_err());
    }
}
