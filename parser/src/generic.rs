//! Fallback parser for commands no vendor module recognizes.

use std::sync::LazyLock;

use netscreen_core::ParseOutput;
use regex::Regex;
use tracing::debug;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex must compile"));

/// Splits every line of `text` on runs of whitespace.
///
/// Unlike table parsers, blank lines are kept (as `[""]`) and surrounding
/// whitespace yields empty leading/trailing tokens. Only the empty segment
/// after a trailing separator is dropped. Empty text yields `None`.
///
/// # Examples
///
/// ```
/// use netscreen_parser::generic::tokenize;
///
/// let output = tokenize("dummy response\n123 abc xyz\n", "\n").unwrap();
/// assert_eq!(
///     output.as_tokens().unwrap(),
///     &[vec!["dummy", "response"], vec!["123", "abc", "xyz"]]
/// );
/// ```
pub fn tokenize(text: &str, separator: &str) -> Option<ParseOutput> {
    if text.is_empty() {
        return None;
    }

    let body = text.strip_suffix(separator).unwrap_or(text);
    let lines: Vec<Vec<String>> = body
        .split(separator)
        .map(|line| WHITESPACE_RE.split(line).map(str::to_string).collect())
        .collect();

    debug!(lines = lines.len(), "Tokenized generic output");
    Some(ParseOutput::Tokens(lines))
}
