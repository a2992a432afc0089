//! Transcriber: segmented words → hyphenated Latin transliteration.

use std::sync::Arc;

use serde::Serialize;

use super::signs::SignTable;
use super::tokenizer::{TokenKind, Tokenizer, Word};
use super::{strip_separators, SEPARATOR};

/// Sound-value digraphs, applied left to right in this order.
const PHONETIC_DIGRAPHS: [(&str, &str); 6] = [
    ("nw", "nʷ"),
    ("kw", "kʷ"),
    ("qu", "kʷ"),
    ("ph", "pʰ"),
    ("th", "tʰ"),
    ("kh", "kʰ"),
];

/// One transcribed word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcription {
    /// The word as written on the tablet.
    pub original: String,
    /// Hyphen-joined transliteration, e.g. `wa-na-ka`.
    pub transliteration: String,
    /// Approximate phonetic rendering, e.g. `wanaka`.
    pub phonetic: String,
    /// Number of syllabograms in the word.
    pub syllable_count: usize,
}

/// Maps syllabograms to their transliteration via the sign table.
#[derive(Debug, Clone)]
pub struct Transcriber {
    signs: Arc<SignTable>,
    tokenizer: Tokenizer,
}

impl Transcriber {
    pub fn new(signs: Arc<SignTable>) -> Self {
        Self {
            signs,
            tokenizer: Tokenizer::new(),
        }
    }

    pub fn signs(&self) -> &SignTable {
        &self.signs
    }

    /// Transliterate one sign. Unknown signs render as `[?<glyph>]`.
    pub fn transliterate(&self, sign: char) -> String {
        match self.signs.get(sign) {
            Some(value) => value.to_string(),
            None => format!("[?{sign}]"),
        }
    }

    /// Transliterate a word. Logograms render as their code point, `*10080`;
    /// numerals are not part of the transliteration.
    pub fn transcribe_word(&self, word: &Word) -> String {
        let parts: Vec<String> = word
            .tokens()
            .iter()
            .filter_map(|token| match token.kind {
                TokenKind::Syllabogram => Some(self.transliterate(token.character)),
                TokenKind::Logogram => Some(format!("*{:04X}", token.character as u32)),
                _ => None,
            })
            .collect();
        parts.join(&SEPARATOR.to_string())
    }

    /// Normalize, segment and transcribe a whole text.
    ///
    /// Words that produce no transliteration (bare numerals) are dropped.
    pub fn transcribe_text(&self, text: &str) -> Vec<Transcription> {
        let normalized = self.tokenizer.normalize(text);
        let words = self.tokenizer.segment_words(&normalized);
        tracing::debug!(words = words.len(), "segmented text");

        words
            .iter()
            .filter_map(|word| {
                let transliteration = self.transcribe_word(word);
                tracing::debug!(original = %word.text(), %transliteration, "transcribed word");
                if transliteration.is_empty() {
                    return None;
                }
                Some(Transcription {
                    original: word.text(),
                    phonetic: phonetic_form(&transliteration),
                    transliteration,
                    syllable_count: word.syllable_count(),
                })
            })
            .collect()
    }
}

/// Approximate phonetic form: strip separators, then mark labialization
/// and aspiration (`qu` → `kʷ`, `ph` → `pʰ`, ...).
pub fn phonetic_form(transliteration: &str) -> String {
    PHONETIC_DIGRAPHS
        .iter()
        .fold(strip_separators(transliteration), |form, (from, to)| {
            form.replace(from, to)
        })
}
