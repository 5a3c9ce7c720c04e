//! Parsing engine for network equipment `show` command screens.
//!
//! A device screen goes through these stages:
//!
//! 1. [`Dispatcher`] maps the command text (abbreviations included) to a
//!    vendor parse function, or to the generic tokenizer.
//! 2. [`region::extract_region`] cuts the table out of the screen.
//! 3. [`matcher::RecordMatcher`] turns each line into a named-field record.
//! 4. [`aggregate::aggregate`] keys the records into a result tree, spilling
//!    colliding keys into overflow slots.
//!
//! Data-shape problems never error: a missing table, an empty response or an
//! unparseable line just yields `None` or is skipped.
//!
//! # Example
//!
//! ```
//! use netscreen_parser::parse_response;
//!
//! let screen = "show arp\r\n\
//!     Protocol  Address          Age (min)  Hardware Addr   Type   Interface\r\n\
//!     Internet  10.0.0.2                0   ffff.ffff.ffff  ARPA   Vlan1\r\n";
//!
//! let output = parse_response("sh arp", screen).unwrap();
//! let arp = output.as_tree().unwrap().record("10.0.0.2").unwrap();
//! assert_eq!(arp.get("HardwareAddr").map(String::as_str), Some("ffff.ffff.ffff"));
//! ```

pub mod aggregate;
pub mod dispatch;
mod error;
pub mod generic;
pub mod matcher;
pub mod output;
pub mod region;
pub mod response;
pub mod session;
pub mod table;
pub mod vendor;

pub use dispatch::{DEFAULT_DISPATCHER, Dispatch, Dispatcher};
pub use error::TableError;
pub use netscreen_core::{LINE_SEPARATOR, ParseOutput, Record, ResultNode, ResultTree};
pub use output::{OutputFormat, format_output};
pub use response::ParsedResponse;
pub use session::{CommandSession, SessionError, SessionResponse};
pub use table::Table;
pub use vendor::{CommandInfo, CommandParser, VendorModule};

/// Parses raw device output for `command` with the built-in vendor modules.
///
/// Line endings are normalized first, so text straight from a socket is fine.
pub fn parse_response(command: &str, text: &str) -> Option<ParseOutput> {
    let text = session::normalize_line_endings(text);
    DEFAULT_DISPATCHER.parse(command, &text)
}
