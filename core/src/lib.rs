//! Core value types for structured network CLI output.
//!
//! This crate defines the data that flows through the parsing engine:
//!
//! - [`Record`] is one parsed line, column name to trimmed value.
//! - [`ResultTree`] is records nested by their key columns.
//! - [`ParseOutput`] is a tree, a sequence of overflow slots, or generic
//!   token lines.
//! - [`TableDefinition`] is a declarative description of one table: region
//!   markers, fixed-column or pattern layout, key columns, row filter.
//!
//! Validation ([`validate_table`], [`validate_tables`]) catches structural
//! errors such as duplicate columns, unknown key columns and regexes that do
//! not compile.
//!
//! # Example
//!
//! ```
//! use netscreen_core::*;
//!
//! let table = TableDefinition::new(
//!     "lldp neighbors",
//!     RecordLayout::fixed(vec![
//!         FixedColumn::new("DeviceID", 0, 20),
//!         FixedColumn::new("LocalIntf", 20, 15),
//!         FixedColumn::to_end("PortID", 35),
//!     ]),
//!     KeyColumns::single("LocalIntf"),
//! )
//! .with_region(RegionMarkers::new().with_continuation("^Device ID .*").with_end("^$"));
//!
//! assert_eq!(table.layout.column_names(), vec!["DeviceID", "LocalIntf", "PortID"]);
//! assert!(validate_table(&table).is_empty());
//! ```

mod tree;
mod types;
mod validate;

pub use tree::{ParseOutput, Record, ResultNode, ResultTree};
pub use types::*;
pub use validate::{TableValidationError, validate_table, validate_tables};
