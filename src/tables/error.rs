//! Error types for data-table loading.
//!
//! Every variant is fatal: a table set either loads completely or not at
//! all, so no engine ever sees a partially initialized table.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced while loading and validating the data tables.
#[derive(Debug, Error, Diagnostic)]
pub enum TableError {
    #[error("required table \"{table}\" not found at {path}")]
    #[diagnostic(
        code(linear_b::tables::missing),
        help(
            "A data directory must contain all four tables: signs.toml, lexicon.toml, \
             paradigms.toml and sound_changes.toml. Omit --data-dir to use the bundled tables."
        )
    )]
    MissingTable { table: String, path: String },

    #[error("failed to read table file: {path}")]
    #[diagnostic(
        code(linear_b::tables::io),
        help("Ensure the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse table \"{table}\": {message}")]
    #[diagnostic(
        code(linear_b::tables::parse),
        help("Check the TOML syntax and that every required field is present.")
    )]
    Parse { table: String, message: String },

    #[error("invalid entry in table \"{table}\": {message}")]
    #[diagnostic(
        code(linear_b::tables::invalid),
        help(
            "The table parsed but violates its schema. Cell keys must read \
             <case>_<number> for declensions and <tense>_<person>_<number> for conjugations; \
             sign code points must lie in U+10000-U+1007F."
        )
    )]
    Invalid { table: String, message: String },
}

impl TableError {
    pub(crate) fn invalid(table: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            table: table.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for table operations.
pub type TableResult<T> = std::result::Result<T, TableError>;
