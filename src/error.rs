//! Top-level error type for the analyzer.
//!
//! Core engine operations are total and never return errors; failures come
//! from loading the data tables or from malformed requests at the boundary.

use miette::Diagnostic;
use thiserror::Error;

use crate::tables::TableError;

#[derive(Debug, Error, Diagnostic)]
pub enum LinearBError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Table(#[from] TableError),

    #[error("invalid request: \"{field}\" must not be empty")]
    #[diagnostic(
        code(linear_b::request::invalid),
        help("Provide Linear B text or a transliteration such as wa-na-ka.")
    )]
    InvalidRequest { field: String },
}

pub type LinearBResult<T> = std::result::Result<T, LinearBError>;

impl LinearBError {
    pub fn invalid_request(field: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field: field.into(),
        }
    }
}
