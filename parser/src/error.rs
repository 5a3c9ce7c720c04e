//! Error types for table compilation.
//!
//! Parsing itself never fails: data-shape problems come back as `None`.
//! These errors only surface when a table definition is turned into a
//! runnable [`Table`](crate::table::Table).

use netscreen_core::TableValidationError;
use thiserror::Error;

/// Errors raised while compiling a table definition.
#[derive(Debug, Error)]
pub enum TableError {
    /// A region marker or layout pattern does not compile.
    #[error("invalid {field} pattern: {source}")]
    Pattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The definition failed structural validation.
    #[error("invalid table '{table}': {}", format_errors(.errors))]
    Invalid {
        table: String,
        errors: Vec<TableValidationError>,
    },
}

fn format_errors(errors: &[TableValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
