//! Declarative table definitions.
//!
//! A [`TableDefinition`] is pure data: where a table sits inside a screen
//! ([`RegionMarkers`]), how to split one line into fields ([`RecordLayout`]),
//! which columns identify a row ([`KeyColumns`]) and which rows to reject
//! ([`RowFilter`]). Vendor modules describe every supported command this way
//! and a single engine interprets them. The types are serializable so the
//! built-in tables can be dumped and reviewed as YAML or JSON.

use serde::{Deserialize, Serialize};

use crate::Record;

/// Separator every component splits on once text has been normalized.
pub const LINE_SEPARATOR: &str = "\n";

/// One fixed-width column: `line[offset .. offset + length]`, or
/// `line[offset ..]` when `length` is `None`.
///
/// # Examples
///
/// ```
/// use netscreen_core::FixedColumn;
///
/// let port = FixedColumn::new("Port", 0, 10);
/// assert_eq!(port.end(), Some(10));
///
/// let rest = FixedColumn::to_end("Type", 67);
/// assert_eq!(rest.end(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedColumn {
    /// Field name bound in the produced record.
    pub name: String,
    /// Byte offset of the first character.
    pub offset: usize,
    /// Width in bytes; `None` runs to the end of the line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

impl FixedColumn {
    /// Creates a column of fixed width.
    pub fn new(name: &str, offset: usize, length: usize) -> Self {
        Self {
            name: name.to_string(),
            offset,
            length: Some(length),
        }
    }

    /// Creates a column that runs to the end of the line.
    pub fn to_end(name: &str, offset: usize) -> Self {
        Self {
            name: name.to_string(),
            offset,
            length: None,
        }
    }

    /// Exclusive end offset, if bounded.
    pub fn end(&self) -> Option<usize> {
        self.length.map(|length| self.offset + length)
    }
}

fn default_trim() -> bool {
    true
}

/// How one line is turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RecordLayout {
    /// Slice the line at fixed byte offsets. Never fails to match.
    Fixed {
        /// Columns in output order.
        columns: Vec<FixedColumn>,
    },
    /// Apply a regular expression; capture group `n` binds to `columns[n - 1]`.
    /// Lines that do not match produce no record.
    Pattern {
        /// Regex source.
        pattern: String,
        /// Names for the capture groups, in order.
        columns: Vec<String>,
        /// Trim surrounding whitespace from the line before matching.
        #[serde(default = "default_trim")]
        trim: bool,
    },
}

impl RecordLayout {
    /// Creates a fixed-column layout.
    pub fn fixed(columns: Vec<FixedColumn>) -> Self {
        RecordLayout::Fixed { columns }
    }

    /// Creates a pattern layout that matches against the trimmed line.
    pub fn pattern(pattern: &str, columns: &[&str]) -> Self {
        RecordLayout::Pattern {
            pattern: pattern.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            trim: true,
        }
    }

    /// Names of all columns this layout produces, in order.
    pub fn column_names(&self) -> Vec<&str> {
        match self {
            RecordLayout::Fixed { columns } => columns.iter().map(|c| c.name.as_str()).collect(),
            RecordLayout::Pattern { columns, .. } => columns.iter().map(String::as_str).collect(),
        }
    }
}

/// Line markers that delimit a table inside a screen.
///
/// Each marker is an optional regex source. See the region extractor for the
/// exact precedence rules: `start` includes its own line, `continuation`
/// excludes its line and resumes on the next one, `end` excludes its line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMarkers {
    /// Activates extraction, including the matching line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Header marker: excluded itself, extraction starts on the next line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
    /// Footer marker: stops extraction, excluded itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl RegionMarkers {
    /// Creates markers with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start marker.
    pub fn with_start(mut self, pattern: &str) -> Self {
        self.start = Some(pattern.to_string());
        self
    }

    /// Sets the continuation (header) marker.
    pub fn with_continuation(mut self, pattern: &str) -> Self {
        self.continuation = Some(pattern.to_string());
        self
    }

    /// Sets the end (footer) marker.
    pub fn with_end(mut self, pattern: &str) -> Self {
        self.end = Some(pattern.to_string());
        self
    }

    /// Returns `true` when no marker is set.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.continuation.is_none() && self.end.is_none()
    }
}

/// Columns identifying a row, in nesting order.
///
/// Serialized as `null`, a single string, or a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyColumns {
    /// No natural key; records are grouped anonymously in one bucket.
    #[default]
    Anonymous,
    /// One key column: a flat `value -> record` tree.
    Single(String),
    /// Several key columns: one tree level per column.
    Composite(Vec<String>),
}

impl KeyColumns {
    /// Single key column.
    pub fn single(name: &str) -> Self {
        KeyColumns::Single(name.to_string())
    }

    /// Composite key in nesting order.
    pub fn composite(names: &[&str]) -> Self {
        KeyColumns::Composite(names.iter().map(|n| n.to_string()).collect())
    }

    /// Key column names, in nesting order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            KeyColumns::Anonymous => Vec::new(),
            KeyColumns::Single(name) => vec![name.as_str()],
            KeyColumns::Composite(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Derives the key tuple for `record`.
    ///
    /// A column missing from the record yields a `None` component. A table
    /// without key columns yields the one-component anonymous tuple, so the
    /// tuple is never empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use netscreen_core::{KeyColumns, Record};
    ///
    /// let record: Record = [("Vlan", "100"), ("MacAddress", "0102.0304.0506")]
    ///     .into_iter()
    ///     .map(|(k, v)| (k.to_string(), v.to_string()))
    ///     .collect();
    ///
    /// let single = KeyColumns::single("Vlan").key_tuple(&record);
    /// assert_eq!(single.single(), Some("100"));
    ///
    /// let both = KeyColumns::composite(&["Vlan", "MacAddress"]).key_tuple(&record);
    /// assert_eq!(both.components().len(), 2);
    /// assert!(!both.is_single());
    /// ```
    pub fn key_tuple(&self, record: &Record) -> KeyTuple {
        let lookup = |name: &str| record.get(name).cloned();
        match self {
            KeyColumns::Single(name) => KeyTuple {
                components: vec![lookup(name.as_str())],
                single: true,
            },
            KeyColumns::Composite(names) if !names.is_empty() => KeyTuple {
                components: names.iter().map(|name| lookup(name.as_str())).collect(),
                single: false,
            },
            KeyColumns::Anonymous | KeyColumns::Composite(_) => KeyTuple {
                components: vec![None],
                single: false,
            },
        }
    }
}

/// Values of a record's key columns, in declared order.
///
/// Validity predicates receive the tuple; single-key tables read it through
/// [`KeyTuple::single`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyTuple {
    components: Vec<Option<String>>,
    single: bool,
}

impl KeyTuple {
    /// Tuple for a single-key table.
    pub fn from_single(value: Option<String>) -> Self {
        Self {
            components: vec![value],
            single: true,
        }
    }

    /// Tuple for a composite or anonymous table.
    pub fn from_components(components: Vec<Option<String>>) -> Self {
        Self {
            components,
            single: false,
        }
    }

    /// Components in nesting order. `None` means anonymous at that level.
    pub fn components(&self) -> &[Option<String>] {
        &self.components
    }

    /// Whether the table declared exactly one key column.
    pub fn is_single(&self) -> bool {
        self.single
    }

    /// First component as a string slice.
    pub fn single(&self) -> Option<&str> {
        self.components.first().and_then(|c| c.as_deref())
    }
}

/// Declarative validity predicate for rows that structurally match a layout
/// but are not data (headers, banners, short fragments).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFilter {
    /// Minimum raw line length in bytes.
    #[serde(default)]
    pub min_line_length: usize,
    /// Key values that mark a non-data row (e.g. a repeated `Port` header).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reject_keys: Vec<String>,
}

impl RowFilter {
    /// Returns `true` when the row should be kept.
    pub fn accepts(&self, line: &str, key: &KeyTuple) -> bool {
        if line.len() < self.min_line_length {
            return false;
        }
        !key.components()
            .iter()
            .flatten()
            .any(|value| self.reject_keys.iter().any(|rejected| rejected == value))
    }
}

/// Complete description of one table in a command's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table name, usually the command it belongs to.
    pub name: String,
    /// Markers delimiting the table in the screen.
    #[serde(default)]
    pub region: RegionMarkers,
    /// Line-to-record layout.
    pub layout: RecordLayout,
    /// Identifying columns.
    #[serde(default)]
    pub keys: KeyColumns,
    /// Optional validity predicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<RowFilter>,
}

impl TableDefinition {
    /// Creates a definition with no region markers and no filter.
    pub fn new(name: &str, layout: RecordLayout, keys: KeyColumns) -> Self {
        Self {
            name: name.to_string(),
            region: RegionMarkers::default(),
            layout,
            keys,
            filter: None,
        }
    }

    /// Sets the region markers.
    pub fn with_region(mut self, region: RegionMarkers) -> Self {
        self.region = region;
        self
    }

    /// Sets the validity predicate.
    pub fn with_filter(mut self, filter: RowFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}
