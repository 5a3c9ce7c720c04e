//! Keyed aggregation of per-line records into result trees.
//!
//! Every non-empty line goes through the matcher; matched records are keyed
//! by their key columns and inserted into the primary tree. A record whose key
//! path is already taken is never dropped or overwritten: it goes to the
//! first overflow slot where the path is still free. Overflow slots only show
//! up in the output when at least one collision happened.

use indexmap::IndexMap;
use netscreen_core::{KeyColumns, KeyTuple, ParseOutput, Record, ResultNode, ResultTree};
use tracing::{debug, trace};

use crate::matcher::RecordMatcher;

/// Accumulates records into a primary tree plus overflow slots.
#[derive(Debug, Default)]
pub struct Aggregator {
    primary: ResultTree,
    overflow: Vec<ResultTree>,
    inserted: usize,
}

impl Aggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` at `key`, spilling into overflow slots on collision.
    ///
    /// Returns the slot index the record landed in (0 is the primary tree).
    pub fn insert(&mut self, key: &KeyTuple, record: Record) -> usize {
        let path = key.components();
        let mut record = match self.primary.insert_at_path(path, record) {
            Ok(()) => {
                self.inserted += 1;
                return 0;
            }
            Err(record) => record,
        };

        for (idx, slot) in self.overflow.iter_mut().enumerate() {
            match slot.insert_at_path(path, record) {
                Ok(()) => {
                    self.inserted += 1;
                    return idx + 1;
                }
                Err(rejected) => record = rejected,
            }
        }

        let mut slot = ResultTree::new();
        // A fresh tree accepts any non-empty path; KeyTuple is never empty.
        if slot.insert_at_path(path, record).is_ok() {
            self.inserted += 1;
        }
        self.overflow.push(slot);
        self.overflow.len()
    }

    /// Number of records inserted so far.
    pub fn len(&self) -> usize {
        self.inserted
    }

    /// Returns `true` when nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.inserted == 0
    }

    /// Finishes aggregation.
    ///
    /// `None` when nothing was inserted, the primary tree alone when there
    /// were no collisions, otherwise the slot sequence with the primary tree
    /// at index 0.
    pub fn finish(self) -> Option<ParseOutput> {
        if self.inserted == 0 {
            return None;
        }
        if self.overflow.is_empty() {
            return Some(ParseOutput::Tree(self.primary));
        }
        let mut slots = Vec::with_capacity(self.overflow.len() + 1);
        slots.push(self.primary);
        slots.extend(self.overflow);
        Some(ParseOutput::Slots(slots))
    }
}

/// Parses every non-empty line of `text` with `matcher` and aggregates the
/// records by `keys`.
///
/// `validity` receives the raw line and the record's key tuple; returning
/// `false` skips the record. Returns `None` if no record was inserted.
///
/// # Examples
///
/// ```
/// use netscreen_core::{FixedColumn, KeyColumns, ParseOutput};
/// use netscreen_parser::aggregate::aggregate;
/// use netscreen_parser::matcher::RecordMatcher;
///
/// let matcher = RecordMatcher::FixedColumn(vec![
///     FixedColumn::new("Port", 0, 6),
///     FixedColumn::to_end("Vlan", 6),
/// ]);
/// let keys = KeyColumns::single("Port");
///
/// let output = aggregate("Gi0/1 10\nGi0/2 20\n", &matcher, &keys, None, "\n").unwrap();
/// assert_eq!(output.as_tree().unwrap().len(), 2);
///
/// // A repeated key spills into slot 1.
/// let output = aggregate("Gi0/1 10\nGi0/1 20", &matcher, &keys, None, "\n").unwrap();
/// assert!(matches!(output, ParseOutput::Slots(ref slots) if slots.len() == 2));
/// ```
pub fn aggregate(
    text: &str,
    matcher: &RecordMatcher,
    keys: &KeyColumns,
    validity: Option<&dyn Fn(&str, &KeyTuple) -> bool>,
    separator: &str,
) -> Option<ParseOutput> {
    let mut aggregator = Aggregator::new();
    let mut skipped = 0usize;
    let mut collisions = 0usize;

    for line in text.split(separator) {
        if line.is_empty() {
            continue;
        }

        let Some(record) = matcher.match_line(line) else {
            trace!(line, "No record for line");
            skipped += 1;
            continue;
        };

        let key = keys.key_tuple(&record);
        if let Some(is_valid) = validity {
            if !is_valid(line, &key) {
                trace!(line, "Rejected by validity predicate");
                skipped += 1;
                continue;
            }
        }

        if aggregator.insert(&key, record) > 0 {
            collisions += 1;
        }
    }

    debug!(
        records = aggregator.len(),
        skipped, collisions, "Aggregated records"
    );
    aggregator.finish()
}

/// Merges flat single-key trees from several passes into one record per key.
///
/// Each pass is `(prefix, tree)`. Every field except `key_column` is renamed
/// to `prefix + field`; the key column is kept once, unprefixed. Keys keep the
/// order in which they were first seen across passes, so a key present only in
/// a later pass is still reported.
pub fn merge_passes(passes: &[(&str, &ResultTree)], key_column: &str) -> ResultTree {
    let mut merged: IndexMap<String, Record> = IndexMap::new();

    for (prefix, tree) in passes {
        for (key, node) in tree.iter() {
            let Some(record) = node.as_record() else {
                continue;
            };
            if !merged.contains_key(key) {
                let mut fresh = Record::new();
                let value = record.get(key_column).map_or(key, String::as_str);
                fresh.insert(key_column.to_string(), value.to_string());
                merged.insert(key.to_string(), fresh);
            }
            let Some(target) = merged.get_mut(key) else {
                continue;
            };
            for (field, value) in record.iter().filter(|(field, _)| *field != key_column) {
                target.insert(format!("{prefix}{field}"), value.clone());
            }
        }
    }

    debug!(records = merged.len(), passes = passes.len(), "Merged passes");
    merged
        .into_iter()
        .map(|(key, record)| (key, ResultNode::Record(record)))
        .collect()
}
