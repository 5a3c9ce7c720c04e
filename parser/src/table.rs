//! Compiled table definitions.

use netscreen_core::{
    KeyColumns, KeyTuple, ParseOutput, RowFilter, TableDefinition, validate_table,
};
use tracing::debug;

use crate::TableError;
use crate::aggregate::aggregate;
use crate::matcher::RecordMatcher;
use crate::region::{Region, extract_region};

/// A [`TableDefinition`] with its regexes compiled, ready to parse text.
#[derive(Debug, Clone)]
pub struct Table {
    definition: TableDefinition,
    region: Region,
    matcher: RecordMatcher,
}

impl Table {
    /// Validates and compiles a definition.
    pub fn compile(definition: TableDefinition) -> Result<Self, TableError> {
        let errors = validate_table(&definition);
        if !errors.is_empty() {
            return Err(TableError::Invalid {
                table: definition.name.clone(),
                errors,
            });
        }

        let region = Region::compile(&definition.region)?;
        let matcher = RecordMatcher::compile(&definition.layout)?;
        Ok(Self {
            definition,
            region,
            matcher,
        })
    }

    /// The source definition.
    pub fn definition(&self) -> &TableDefinition {
        &self.definition
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Key columns.
    pub fn keys(&self) -> &KeyColumns {
        &self.definition.keys
    }

    /// Extracts this table's region from a full screen.
    ///
    /// A table without region markers covers the whole text.
    pub fn extract(&self, text: &str, separator: &str) -> Option<String> {
        if self.region.is_unbounded() {
            return (!text.is_empty()).then(|| text.to_string());
        }
        extract_region(text, &self.region, separator)
    }

    /// Extracts the region from `text` and aggregates its records.
    pub fn parse(&self, text: &str, separator: &str) -> Option<ParseOutput> {
        let Some(region) = self.extract(text, separator) else {
            debug!(table = %self.name(), "Table region not found");
            return None;
        };
        self.parse_region(&region, separator)
    }

    /// Aggregates records from text that is already the table region.
    pub fn parse_region(&self, region: &str, separator: &str) -> Option<ParseOutput> {
        match &self.definition.filter {
            Some(filter) => {
                let validity = |line: &str, key: &KeyTuple| filter.accepts(line, key);
                aggregate(
                    region,
                    &self.matcher,
                    &self.definition.keys,
                    Some(&validity),
                    separator,
                )
            }
            None => aggregate(region, &self.matcher, &self.definition.keys, None, separator),
        }
    }

    /// The validity predicate, if the definition declares one.
    pub fn filter(&self) -> Option<&RowFilter> {
        self.definition.filter.as_ref()
    }
}
