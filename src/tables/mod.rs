//! Data tables: signs, lexicon, paradigm templates and sound changes.
//!
//! The four tables are loaded together and validated as one unit. Either
//! the whole set loads or the load fails; there is no partial table set.
//! A copy of each table is bundled into the binary via `include_str!`;
//! an external directory may replace all four at once.

pub mod error;
pub mod lexicon;
pub mod paradigms;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

pub use error::{TableError, TableResult};
pub use lexicon::{Lexicon, LexiconEntry};
pub use paradigms::{
    ConjugationTemplate, DeclensionTemplate, NounCellEndings, ParadigmTables, VerbCellEndings,
};

use crate::phonology::SoundChangeTable;
use crate::script::SignTable;

/// File names expected in a data directory, in load order.
pub const TABLE_FILES: [(&str, &str); 4] = [
    ("signs", "signs.toml"),
    ("lexicon", "lexicon.toml"),
    ("paradigms", "paradigms.toml"),
    ("sound_changes", "sound_changes.toml"),
];

// ── Bundled tables ──────────────────────────────────────────────────────

const SIGNS_TOML: &str = include_str!("../../data/signs.toml");
const LEXICON_TOML: &str = include_str!("../../data/lexicon.toml");
const PARADIGMS_TOML: &str = include_str!("../../data/paradigms.toml");
const SOUND_CHANGES_TOML: &str = include_str!("../../data/sound_changes.toml");

/// Where a table set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// Compiled into the binary.
    Bundled,
    /// Loaded from an external directory.
    Directory(PathBuf),
}

/// A complete, validated set of tables. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TableSet {
    pub signs: Arc<SignTable>,
    pub lexicon: Arc<Lexicon>,
    pub paradigms: Arc<ParadigmTables>,
    pub sound_changes: Arc<SoundChangeTable>,
    pub source: TableSource,
}

// ── TOML deserialization helpers ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SignsToml {
    #[serde(default)]
    sign: Vec<SignToml>,
}

#[derive(Debug, Deserialize)]
struct SignToml {
    codepoint: u32,
    value: String,
}

#[derive(Debug, Deserialize)]
struct LexiconToml {
    #[serde(default)]
    word: Vec<LexiconEntry>,
}

fn parse_error(table: &str, err: toml::de::Error) -> TableError {
    TableError::Parse {
        table: table.to_string(),
        message: err.to_string(),
    }
}

fn parse_signs(text: &str) -> TableResult<SignTable> {
    let parsed: SignsToml = toml::from_str(text).map_err(|e| parse_error("signs", e))?;
    SignTable::from_codepoints(parsed.sign.into_iter().map(|s| (s.codepoint, s.value)))
}

fn parse_lexicon(text: &str) -> TableResult<Lexicon> {
    let parsed: LexiconToml = toml::from_str(text).map_err(|e| parse_error("lexicon", e))?;
    Lexicon::from_entries(parsed.word)
}

impl TableSet {
    /// The tables compiled into the binary.
    pub fn bundled() -> TableResult<Self> {
        Self::from_sources(
            SIGNS_TOML,
            LEXICON_TOML,
            PARADIGMS_TOML,
            SOUND_CHANGES_TOML,
            TableSource::Bundled,
        )
    }

    /// Load all four tables from `dir`. A missing file is fatal.
    pub fn load_dir(dir: &Path) -> TableResult<Self> {
        let mut texts = Vec::with_capacity(TABLE_FILES.len());
        for (table, file) in TABLE_FILES {
            let path = dir.join(file);
            if !path.is_file() {
                return Err(TableError::MissingTable {
                    table: table.to_string(),
                    path: path.display().to_string(),
                });
            }
            let text = std::fs::read_to_string(&path).map_err(|source| TableError::Io {
                path: path.display().to_string(),
                source,
            })?;
            texts.push(text);
        }
        let [signs, lexicon, paradigms, sound_changes] = <[String; 4]>::try_from(texts)
            .map_err(|_| TableError::invalid("tables", "expected exactly four table files"))?;

        Self::from_sources(
            &signs,
            &lexicon,
            &paradigms,
            &sound_changes,
            TableSource::Directory(dir.to_path_buf()),
        )
    }

    /// Parse and cross-validate a table set from raw TOML text.
    pub fn from_sources(
        signs: &str,
        lexicon: &str,
        paradigms: &str,
        sound_changes: &str,
        source: TableSource,
    ) -> TableResult<Self> {
        let signs = parse_signs(signs)?;
        let lexicon = parse_lexicon(lexicon)?;
        let paradigms = ParadigmTables::from_toml(paradigms)?;
        let sound_changes = SoundChangeTable::from_toml(sound_changes)?;

        validate_declensions(&lexicon, &paradigms)?;

        tracing::info!(
            ?source,
            signs = signs.len(),
            lexicon = lexicon.len(),
            declensions = paradigms.declensions().len(),
            rules = sound_changes.len(),
            "loaded data tables"
        );

        Ok(Self {
            signs: Arc::new(signs),
            lexicon: Arc::new(lexicon),
            paradigms: Arc::new(paradigms),
            sound_changes: Arc::new(sound_changes),
            source,
        })
    }
}

/// Every declension a lexicon entry names must exist in the templates.
fn validate_declensions(lexicon: &Lexicon, paradigms: &ParadigmTables) -> TableResult<()> {
    for entry in lexicon.entries() {
        let Some(name) = entry.declension.as_deref() else {
            continue;
        };
        if paradigms.declension(name).is_none() && paradigms.conjugation(name).is_none() {
            return Err(TableError::invalid(
                "lexicon",
                format!("\"{}\" names unknown declension \"{name}\"", entry.key),
            ));
        }
    }
    Ok(())
}
