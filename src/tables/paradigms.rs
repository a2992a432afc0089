//! Declension and conjugation templates.
//!
//! Each template maps grammatical cells to one or more surface endings.
//! Composite cell keys are validated into [`NounCell`] / [`VerbCell`] here,
//! so a malformed key fails the load instead of being skipped at runtime.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::{TableError, TableResult};
use crate::categories::{NounCell, Number, Person, Tense, VerbCell};

const TABLE: &str = "paradigms";

/// Declension used when a requested one is unknown.
pub const DEFAULT_DECLENSION: &str = "o_stem_masculine";
/// Conjugation used for verb paradigms.
pub const DEFAULT_CONJUGATION: &str = "thematic";

/// Endings for one declension cell, in authored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NounCellEndings {
    pub cell: NounCell,
    pub endings: Vec<String>,
}

/// Endings for one conjugation cell, in authored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerbCellEndings {
    pub cell: VerbCell,
    pub endings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclensionTemplate {
    pub name: String,
    pub description: String,
    pub cells: Vec<NounCellEndings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConjugationTemplate {
    pub name: String,
    pub description: String,
    pub cells: Vec<VerbCellEndings>,
}

/// All loaded templates.
#[derive(Debug, Clone)]
pub struct ParadigmTables {
    declensions: Vec<DeclensionTemplate>,
    conjugations: Vec<ConjugationTemplate>,
}

// ── TOML schema ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ParadigmsToml {
    #[serde(default)]
    declension: Vec<TemplateToml>,
    #[serde(default)]
    conjugation: Vec<TemplateToml>,
}

#[derive(Debug, Deserialize)]
struct TemplateToml {
    name: String,
    #[serde(default)]
    description: String,
    cells: Vec<CellToml>,
}

#[derive(Debug, Deserialize)]
struct CellToml {
    cell: String,
    endings: Vec<String>,
}

impl ParadigmTables {
    /// Parse and validate `paradigms.toml`.
    pub fn from_toml(text: &str) -> TableResult<Self> {
        let parsed: ParadigmsToml = toml::from_str(text).map_err(|e| TableError::Parse {
            table: TABLE.into(),
            message: e.to_string(),
        })?;

        let declensions = parsed
            .declension
            .into_iter()
            .map(|t| -> TableResult<DeclensionTemplate> {
                let cells = convert_cells(&t, |cell, endings| NounCellEndings { cell, endings })?;
                Ok(DeclensionTemplate {
                    name: t.name,
                    description: t.description,
                    cells,
                })
            })
            .collect::<TableResult<Vec<_>>>()?;

        let conjugations = parsed
            .conjugation
            .into_iter()
            .map(|t| -> TableResult<ConjugationTemplate> {
                let cells = convert_cells(&t, |cell, endings| VerbCellEndings { cell, endings })?;
                Ok(ConjugationTemplate {
                    name: t.name,
                    description: t.description,
                    cells,
                })
            })
            .collect::<TableResult<Vec<_>>>()?;

        Self::new(declensions, conjugations)
    }

    /// Assemble templates, checking name uniqueness and that the defaults exist.
    pub fn new(
        declensions: Vec<DeclensionTemplate>,
        conjugations: Vec<ConjugationTemplate>,
    ) -> TableResult<Self> {
        ensure_unique(declensions.iter().map(|d| d.name.as_str()), "declension")?;
        ensure_unique(conjugations.iter().map(|c| c.name.as_str()), "conjugation")?;

        let tables = Self {
            declensions,
            conjugations,
        };

        if tables.declension(DEFAULT_DECLENSION).is_none() {
            return Err(TableError::invalid(
                TABLE,
                format!("default declension \"{DEFAULT_DECLENSION}\" is missing"),
            ));
        }
        let thematic = tables.conjugation(DEFAULT_CONJUGATION).ok_or_else(|| {
            TableError::invalid(
                TABLE,
                format!("default conjugation \"{DEFAULT_CONJUGATION}\" is missing"),
            )
        })?;
        for required in required_verb_cells() {
            if !thematic.cells.iter().any(|c| c.cell == required) {
                return Err(TableError::invalid(
                    TABLE,
                    format!(
                        "conjugation \"{DEFAULT_CONJUGATION}\" lacks the {} {} {} cell",
                        required.tense,
                        required.person,
                        required.number
                    ),
                ));
            }
        }

        Ok(tables)
    }

    pub fn declension(&self, name: &str) -> Option<&DeclensionTemplate> {
        self.declensions.iter().find(|d| d.name == name)
    }

    /// The fallback declension. Its presence is checked at load.
    pub fn default_declension(&self) -> &DeclensionTemplate {
        self.declension(DEFAULT_DECLENSION)
            .expect("default declension validated at load")
    }

    pub fn conjugation(&self, name: &str) -> Option<&ConjugationTemplate> {
        self.conjugations.iter().find(|c| c.name == name)
    }

    pub fn default_conjugation(&self) -> &ConjugationTemplate {
        self.conjugation(DEFAULT_CONJUGATION)
            .expect("default conjugation validated at load")
    }

    pub fn declensions(&self) -> &[DeclensionTemplate] {
        &self.declensions
    }

    pub fn conjugations(&self) -> &[ConjugationTemplate] {
        &self.conjugations
    }
}

/// Six present-indicative cells plus future and aorist third singular.
pub fn required_verb_cells() -> Vec<VerbCell> {
    let mut cells = Vec::with_capacity(8);
    for number in [Number::Singular, Number::Plural] {
        for person in [Person::First, Person::Second, Person::Third] {
            cells.push(VerbCell {
                tense: Tense::Present,
                person,
                number,
            });
        }
    }
    for tense in [Tense::Future, Tense::Aorist] {
        cells.push(VerbCell {
            tense,
            person: Person::Third,
            number: Number::Singular,
        });
    }
    cells
}

fn convert_cells<C, T>(
    template: &TemplateToml,
    build: impl Fn(C, Vec<String>) -> T,
) -> TableResult<Vec<T>>
where
    C: std::str::FromStr<Err = String>,
{
    if template.name.trim().is_empty() {
        return Err(TableError::invalid(TABLE, "template with an empty name"));
    }
    template
        .cells
        .iter()
        .map(|raw| -> TableResult<T> {
            let cell = raw.cell.parse::<C>().map_err(|message| {
                TableError::invalid(TABLE, format!("{}: {message}", template.name))
            })?;
            if raw.endings.is_empty() {
                return Err(TableError::invalid(
                    TABLE,
                    format!("{}: cell \"{}\" lists no endings", template.name, raw.cell),
                ));
            }
            Ok(build(cell, raw.endings.clone()))
        })
        .collect()
}

fn ensure_unique<'a>(names: impl Iterator<Item = &'a str>, what: &str) -> TableResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(TableError::invalid(
                TABLE,
                format!("{what} \"{name}\" is defined twice"),
            ));
        }
    }
    Ok(())
}
