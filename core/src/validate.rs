//! Table definition validation.
//!
//! Catches structural mistakes in table definitions before they reach the
//! engine: empty names, duplicate columns, key columns the layout never
//! produces, regexes that do not compile, and pattern layouts whose capture
//! groups do not line up with their column names.
//!
//! # Examples
//!
//! ```
//! use netscreen_core::*;
//!
//! let table = TableDefinition::new(
//!     "arp",
//!     RecordLayout::fixed(vec![
//!         FixedColumn::new("Protocol", 0, 10),
//!         FixedColumn::to_end("Address", 10),
//!     ]),
//!     KeyColumns::single("Address"),
//! );
//! assert!(validate_table(&table).is_empty());
//!
//! // Invalid: key column is not produced by the layout
//! let bad = TableDefinition::new(
//!     "arp",
//!     RecordLayout::fixed(vec![FixedColumn::to_end("Protocol", 0)]),
//!     KeyColumns::single("Address"),
//! );
//! assert!(!validate_table(&bad).is_empty());
//! ```

use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

use crate::{RecordLayout, RegionMarkers, TableDefinition};

/// Table definition validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableValidationError {
    /// Table name is empty or whitespace-only.
    #[error("table name cannot be empty")]
    EmptyTableName,
    /// Two tables in the same set share a name.
    #[error("duplicate table: {0}")]
    DuplicateTable(String),
    /// Layout declares no columns.
    #[error("layout must declare at least one column")]
    NoColumns,
    /// A column name is empty or whitespace-only.
    #[error("column name cannot be empty")]
    EmptyColumnName,
    /// Two columns share a name.
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),
    /// A key column is not produced by the layout.
    #[error("key column not in layout: {0}")]
    UnknownKeyColumn(String),
    /// A regex source does not compile.
    #[error("invalid {field} pattern: {message}")]
    InvalidPattern { field: String, message: String },
    /// Pattern capture groups do not match the declared column count.
    #[error("pattern has {found} capture groups but {expected} columns")]
    CaptureCountMismatch { expected: usize, found: usize },
}

/// Validates a set of tables, such as everything one vendor module exposes.
///
/// Checks for duplicate table names and validates each table individually.
/// Stops at the first failing table.
pub fn validate_tables(tables: &[TableDefinition]) -> Vec<TableValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for table in tables {
        if !seen.insert(table.name.as_str()) {
            errors.push(TableValidationError::DuplicateTable(table.name.clone()));
            return errors;
        }
        errors.extend(validate_table(table));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

/// Validates one table definition.
pub fn validate_table(table: &TableDefinition) -> Vec<TableValidationError> {
    let mut errors = Vec::new();

    if table.name.trim().is_empty() {
        errors.push(TableValidationError::EmptyTableName);
        return errors;
    }

    errors.extend(validate_region(&table.region));
    if !errors.is_empty() {
        return errors;
    }

    errors.extend(validate_layout(&table.layout));
    if !errors.is_empty() {
        return errors;
    }

    let columns = table.layout.column_names();
    for key in table.keys.names() {
        if !columns.contains(&key) {
            errors.push(TableValidationError::UnknownKeyColumn(key.to_string()));
            return errors;
        }
    }

    errors
}

fn validate_region(region: &RegionMarkers) -> Vec<TableValidationError> {
    let markers = [
        ("start", &region.start),
        ("continuation", &region.continuation),
        ("end", &region.end),
    ];

    let mut errors = Vec::new();
    for (field, source) in markers {
        if let Some(source) = source {
            if let Err(err) = Regex::new(source) {
                errors.push(TableValidationError::InvalidPattern {
                    field: field.to_string(),
                    message: err.to_string(),
                });
                return errors;
            }
        }
    }
    errors
}

fn validate_layout(layout: &RecordLayout) -> Vec<TableValidationError> {
    let mut errors = Vec::new();
    let names = layout.column_names();

    if names.is_empty() {
        errors.push(TableValidationError::NoColumns);
        return errors;
    }

    let mut seen = HashSet::new();
    for name in &names {
        if name.trim().is_empty() {
            errors.push(TableValidationError::EmptyColumnName);
            return errors;
        }
        if !seen.insert(*name) {
            errors.push(TableValidationError::DuplicateColumn(name.to_string()));
            return errors;
        }
    }

    if let RecordLayout::Pattern { pattern, columns, .. } = layout {
        match Regex::new(pattern) {
            Ok(regex) => {
                let found = regex.captures_len() - 1;
                if found != columns.len() {
                    errors.push(TableValidationError::CaptureCountMismatch {
                        expected: columns.len(),
                        found,
                    });
                }
            }
            Err(err) => errors.push(TableValidationError::InvalidPattern {
                field: "layout".to_string(),
                message: err.to_string(),
            }),
        }
    }

    errors
}
