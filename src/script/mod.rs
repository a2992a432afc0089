//! Linear B script handling: tokenization, sign lookup, transcription.
//!
//! ```text
//! text ──→ Tokenizer ──→ Words ──→ Transcriber ──→ "wa-na-ka"
//!                                      │
//!                                  SignTable
//! ```
//!
//! The helpers in this module define the single notion of form equality
//! used across the crate: separators stripped, NFC-composed, lowercased.

pub mod signs;
pub mod tokenizer;
pub mod transcriber;

use unicode_normalization::UnicodeNormalization;

pub use signs::SignTable;
pub use tokenizer::{Token, TokenKind, Tokenizer, Word};
pub use transcriber::{Transcriber, Transcription};

/// Syllable separator used in transliterations.
pub const SEPARATOR: char = '-';

/// Marker for a null ending or a deletion target in the data tables.
pub const NULL_MARKER: char = '∅';

/// Remove syllable separators: `"wa-na-ka"` → `"wanaka"`.
pub fn strip_separators(form: &str) -> String {
    form.chars().filter(|&c| c != SEPARATOR).collect()
}

/// Canonical comparison key for a transliterated or phonological form.
///
/// Strips separators, composes to NFC (so `ā` typed as `a` + macron
/// compares equal to the precomposed letter), and lowercases.
pub fn fold_form(form: &str) -> String {
    strip_separators(form.trim()).nfc().collect::<String>().to_lowercase()
}

/// Whether `c` is a vowel of the Latin transliteration alphabet.
pub fn is_vowel(c: char) -> bool {
    matches!(
        c.to_lowercase().next().unwrap_or(c),
        'a' | 'e' | 'i' | 'o' | 'u' | 'ā' | 'ē' | 'ī' | 'ō' | 'ū'
    )
}

/// Anything that is not a vowel counts as a consonant, including the
/// modifier letters `ʷ` and `ʰ`.
pub fn is_consonant(c: char) -> bool {
    !is_vowel(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_removes_only_separators() {
        assert_eq!(strip_separators("wa-na-ka"), "wanaka");
        assert_eq!(strip_separators("wanaka"), "wanaka");
        assert_eq!(strip_separators(""), "");
    }

    #[test]
    fn fold_is_case_and_composition_insensitive() {
        assert_eq!(fold_form("Wa-Na-Ka"), "wanaka");
        assert_eq!(fold_form("do\u{304}"), fold_form("dō"));
        assert_eq!(fold_form("  te-o "), "teo");
    }

    #[test]
    fn vowel_classification() {
        for v in ['a', 'e', 'i', 'o', 'u', 'ō', 'ē', 'A'] {
            assert!(is_vowel(v), "{v} should be a vowel");
        }
        for c in ['k', 'w', 's', 'ʷ', 'ʰ'] {
            assert!(is_consonant(c), "{c} should be a consonant");
        }
    }
}
