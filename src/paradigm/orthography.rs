//! Spelling rules of the syllabary.
//!
//! Linear B never writes a consonant twice in a row, and only `s`, `n` and
//! `r` can survive at the end of a word. Medial clusters are left to the
//! syllabifier; nothing else is simplified here.

use crate::script::{is_consonant, strip_separators};

/// Consonants that may stand at the end of a word.
pub const PERMITTED_FINALS: [char; 3] = ['s', 'n', 'r'];

pub fn is_permitted_final(c: char) -> bool {
    PERMITTED_FINALS.contains(&c.to_lowercase().next().unwrap_or(c))
}

/// Collapse geminates, then drop a final consonant the script cannot write.
pub fn apply_orthography(form: &str) -> String {
    let mut out = String::with_capacity(form.len());
    let mut previous: Option<char> = None;
    for c in strip_separators(form).chars() {
        if previous == Some(c) && is_consonant(c) {
            continue;
        }
        out.push(c);
        previous = Some(c);
    }

    if let Some(last) = out.chars().next_back() {
        if is_consonant(last) && !is_permitted_final(last) {
            out.pop();
        }
    }
    out
}
