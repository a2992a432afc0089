//! Sign table: syllabogram → transliteration.

use std::collections::HashMap;

use serde::Serialize;

use super::tokenizer::SYLLABARY_RANGE;
use crate::tables::error::{TableError, TableResult};

const TABLE: &str = "signs";

/// One syllabogram and its conventional transliteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignEntry {
    pub syllabogram: char,
    pub transliteration: String,
}

/// Read-only syllabogram lookup, built once at load.
#[derive(Debug, Clone, Default)]
pub struct SignTable {
    entries: Vec<SignEntry>,
    index: HashMap<char, usize>,
}

impl SignTable {
    /// Build a table from raw code points, rejecting anything outside the
    /// syllabary block, blank values and duplicate signs.
    pub fn from_codepoints(
        rows: impl IntoIterator<Item = (u32, String)>,
    ) -> TableResult<Self> {
        let mut table = Self::default();
        for (code, value) in rows {
            let syllabogram = char::from_u32(code)
                .filter(|_| (SYLLABARY_RANGE.0..=SYLLABARY_RANGE.1).contains(&code))
                .ok_or_else(|| {
                    TableError::invalid(TABLE, format!("U+{code:04X} is not a syllabogram"))
                })?;
            let value = value.trim().to_string();
            if value.is_empty() {
                return Err(TableError::invalid(
                    TABLE,
                    format!("U+{code:04X} has an empty transliteration"),
                ));
            }
            if table.index.contains_key(&syllabogram) {
                return Err(TableError::invalid(
                    TABLE,
                    format!("U+{code:04X} is listed twice"),
                ));
            }
            table.index.insert(syllabogram, table.entries.len());
            table.entries.push(SignEntry {
                syllabogram,
                transliteration: value,
            });
        }
        Ok(table)
    }

    pub fn get(&self, sign: char) -> Option<&str> {
        self.index
            .get(&sign)
            .map(|&i| self.entries[i].transliteration.as_str())
    }

    /// Entries in authored order.
    pub fn entries(&self) -> &[SignEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
