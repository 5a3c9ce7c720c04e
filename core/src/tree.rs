//! Records, result trees and parse outputs.
//!
//! A [`Record`] is one parsed line. Records are assembled into a
//! [`ResultTree`], nested once per key column, with the record as the leaf.
//! When two records share the same key path the second one cannot overwrite
//! the first; the aggregator moves it into an overflow tree instead, and the
//! final [`ParseOutput`] becomes a sequence of slots.

use indexmap::IndexMap;
use serde::Serialize;

/// One parsed line: column name to trimmed value, in column order.
pub type Record = IndexMap<String, String>;

/// A node in a [`ResultTree`]: either a leaf record or a nested level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultNode {
    /// Leaf holding a parsed record.
    Record(Record),
    /// Nested level keyed by the next key component.
    Branch(ResultTree),
}

impl ResultNode {
    /// Returns the leaf record, if this node is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            ResultNode::Record(record) => Some(record),
            ResultNode::Branch(_) => None,
        }
    }

    /// Returns the nested level, if this node is one.
    pub fn as_branch(&self) -> Option<&ResultTree> {
        match self {
            ResultNode::Branch(tree) => Some(tree),
            ResultNode::Record(_) => None,
        }
    }
}

/// Nested mapping from key tuple components to records.
///
/// For a single key column this is a flat `key -> record` map; for two key
/// columns it is `first -> second -> record`, and so on.
///
/// # Examples
///
/// ```
/// use netscreen_core::{Record, ResultTree};
///
/// let record: Record = [("Vlan", "100"), ("MacAddress", "0102.0304.0506")]
///     .into_iter()
///     .map(|(k, v)| (k.to_string(), v.to_string()))
///     .collect();
///
/// let mut tree = ResultTree::new();
/// let path = [Some("100".to_string()), Some("0102.0304.0506".to_string())];
/// assert!(tree.insert_at_path(&path, record.clone()).is_ok());
///
/// // Same path again is rejected and the record handed back.
/// assert_eq!(tree.insert_at_path(&path, record.clone()), Err(record));
/// assert!(tree.get_path(&["100", "0102.0304.0506"]).is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultTree {
    nodes: IndexMap<String, ResultNode>,
    /// One past the largest integer key at this level.
    #[serde(skip)]
    next_index: usize,
}

impl ResultTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries at this level.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when this level holds no entries.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node at this level.
    pub fn get(&self, key: &str) -> Option<&ResultNode> {
        self.nodes.get(key)
    }

    /// Looks up a leaf record at this level.
    pub fn record(&self, key: &str) -> Option<&Record> {
        self.get(key).and_then(ResultNode::as_record)
    }

    /// Walks `keys` level by level and returns the node at the end.
    pub fn get_path(&self, keys: &[&str]) -> Option<&ResultNode> {
        let (first, rest) = keys.split_first()?;
        let node = self.get(first)?;
        if rest.is_empty() {
            return Some(node);
        }
        node.as_branch()?.get_path(rest)
    }

    /// Iterates over `(key, node)` pairs at this level in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResultNode)> {
        self.nodes.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Keys at this level in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Iterates over every leaf record in depth-first insertion order.
    pub fn records(&self) -> Vec<&Record> {
        let mut out = Vec::new();
        self.collect_records(&mut out);
        out
    }

    fn collect_records<'a>(&'a self, out: &mut Vec<&'a Record>) {
        for node in self.nodes.values() {
            match node {
                ResultNode::Record(record) => out.push(record),
                ResultNode::Branch(tree) => tree.collect_records(out),
            }
        }
    }

    /// Inserts `record` at `path`, creating intermediate levels as needed.
    ///
    /// A `None` component appends under the next free integer key at that
    /// level, so records without a natural key are grouped anonymously.
    ///
    /// Returns the record back as `Err` when the path is already occupied
    /// (a leaf exists at the final key, or a leaf sits where a level is
    /// needed). An empty path is always occupied: the root cannot be a leaf.
    pub fn insert_at_path(&mut self, path: &[Option<String>], record: Record) -> Result<(), Record> {
        let Some((head, rest)) = path.split_first() else {
            return Err(record);
        };

        let key = match head {
            Some(key) => key.clone(),
            None => self.next_index.to_string(),
        };

        if rest.is_empty() {
            if self.nodes.contains_key(&key) {
                return Err(record);
            }
            self.insert_node(key, ResultNode::Record(record));
            return Ok(());
        }

        match self.nodes.get_mut(&key) {
            Some(ResultNode::Branch(child)) => child.insert_at_path(rest, record),
            Some(ResultNode::Record(_)) => Err(record),
            None => {
                let mut child = ResultTree::new();
                child.insert_at_path(rest, record)?;
                self.insert_node(key, ResultNode::Branch(child));
                Ok(())
            }
        }
    }

    fn insert_node(&mut self, key: String, node: ResultNode) {
        if let Ok(index) = key.parse::<usize>() {
            self.next_index = self.next_index.max(index.saturating_add(1));
        }
        self.nodes.insert(key, node);
    }
}

impl FromIterator<(String, ResultNode)> for ResultTree {
    fn from_iter<I: IntoIterator<Item = (String, ResultNode)>>(iter: I) -> Self {
        let mut tree = ResultTree::new();
        for (key, node) in iter {
            tree.insert_node(key, node);
        }
        tree
    }
}

/// Structured result of parsing one command response.
///
/// Callers receive `Option<ParseOutput>`: `None` means nothing was found,
/// which is distinct from an empty structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParseOutput {
    /// Every record found a free key path.
    Tree(ResultTree),
    /// At least one key collision happened: slot 0 is the primary tree,
    /// slots 1.. are overflow trees.
    Slots(Vec<ResultTree>),
    /// Whitespace-split tokens per line, from the generic fallback parser.
    Tokens(Vec<Vec<String>>),
}

impl ParseOutput {
    /// Returns the tree when no collision happened.
    pub fn as_tree(&self) -> Option<&ResultTree> {
        match self {
            ParseOutput::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Returns the slot sequence when collisions happened.
    pub fn as_slots(&self) -> Option<&[ResultTree]> {
        match self {
            ParseOutput::Slots(slots) => Some(slots),
            _ => None,
        }
    }

    /// Returns the token lines from the generic fallback parser.
    pub fn as_tokens(&self) -> Option<&[Vec<String>]> {
        match self {
            ParseOutput::Tokens(lines) => Some(lines),
            _ => None,
        }
    }

    /// The primary tree: the tree itself, or slot 0.
    pub fn primary(&self) -> Option<&ResultTree> {
        match self {
            ParseOutput::Tree(tree) => Some(tree),
            ParseOutput::Slots(slots) => slots.first(),
            ParseOutput::Tokens(_) => None,
        }
    }

    /// Consumes the output and returns the primary tree.
    pub fn into_primary(self) -> Option<ResultTree> {
        match self {
            ParseOutput::Tree(tree) => Some(tree),
            ParseOutput::Slots(slots) => slots.into_iter().next(),
            ParseOutput::Tokens(_) => None,
        }
    }

    /// Consumes the output and returns every tree as a slot list.
    ///
    /// A plain tree becomes a single slot; token output has no slots.
    pub fn into_slots(self) -> Vec<ResultTree> {
        match self {
            ParseOutput::Tree(tree) => vec![tree],
            ParseOutput::Slots(slots) => slots,
            ParseOutput::Tokens(_) => Vec::new(),
        }
    }
}
