//! Record matchers: turn one line into a named-field record.

use netscreen_core::{FixedColumn, Record, RecordLayout};
use regex::Regex;

use crate::TableError;

/// Line-to-record strategy, selected by table configuration.
#[derive(Debug, Clone)]
pub enum RecordMatcher {
    /// Slice at fixed byte offsets and trim each field.
    FixedColumn(Vec<FixedColumn>),
    /// Bind regex capture groups positionally to column names.
    Pattern {
        regex: Regex,
        columns: Vec<String>,
        trim: bool,
    },
}

impl RecordMatcher {
    /// Builds a matcher from a layout, compiling its pattern if any.
    pub fn compile(layout: &RecordLayout) -> Result<Self, TableError> {
        match layout {
            RecordLayout::Fixed { columns } => Ok(RecordMatcher::FixedColumn(columns.clone())),
            RecordLayout::Pattern {
                pattern,
                columns,
                trim,
            } => {
                let regex = Regex::new(pattern).map_err(|source| TableError::Pattern {
                    field: "layout",
                    source,
                })?;
                Ok(RecordMatcher::Pattern {
                    regex,
                    columns: columns.clone(),
                    trim: *trim,
                })
            }
        }
    }

    /// Matches one line.
    ///
    /// Fixed-column matching always yields a record. Pattern matching yields
    /// `None` when the line does not match; unmatched optional groups bind
    /// to an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use netscreen_core::FixedColumn;
    /// use netscreen_parser::matcher::RecordMatcher;
    ///
    /// let matcher = RecordMatcher::FixedColumn(vec![
    ///     FixedColumn::new("Port", 0, 10),
    ///     FixedColumn::to_end("Name", 10),
    /// ]);
    /// let record = matcher.match_line("Gi0/1     uplink").unwrap();
    /// assert_eq!(record.get("Port").map(String::as_str), Some("Gi0/1"));
    /// assert_eq!(record.get("Name").map(String::as_str), Some("uplink"));
    /// ```
    pub fn match_line(&self, line: &str) -> Option<Record> {
        match self {
            RecordMatcher::FixedColumn(columns) => Some(
                columns
                    .iter()
                    .map(|column| (column.name.clone(), slice_column(line, column)))
                    .collect(),
            ),
            RecordMatcher::Pattern {
                regex,
                columns,
                trim,
            } => {
                let subject = if *trim { line.trim() } else { line };
                let captures = regex.captures(subject)?;
                Some(
                    columns
                        .iter()
                        .enumerate()
                        .map(|(idx, name)| {
                            let value = captures.get(idx + 1).map_or("", |m| m.as_str());
                            (name.clone(), value.to_string())
                        })
                        .collect(),
                )
            }
        }
    }
}

/// Byte-offset slice of `line` for `column`, trimmed.
///
/// Offsets past the end of the line produce an empty string. Device screens
/// are ASCII in practice; a slice that cuts through a multi-byte character is
/// decoded lossily instead of panicking.
fn slice_column(line: &str, column: &FixedColumn) -> String {
    let bytes = line.as_bytes();
    let start = column.offset.min(bytes.len());
    let end = column
        .end()
        .map_or(bytes.len(), |end| end.min(bytes.len()));
    if start >= end {
        return String::new();
    }
    match line.get(start..end) {
        Some(slice) => slice.trim().to_string(),
        None => String::from_utf8_lossy(&bytes[start..end]).trim().to_string(),
    }
}
