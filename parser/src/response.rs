//! Response adapter: one command plus its normalized output.

use std::fmt;
use std::sync::Arc;

use netscreen_core::{LINE_SEPARATOR, ParseOutput};

use crate::dispatch::{DEFAULT_DISPATCHER, Dispatcher};
use crate::session::{SessionResponse, normalize_line_endings};

/// A command's response, with line endings normalized once at construction.
///
/// Parsing is not memoized: every [`ParsedResponse::structured`] call runs the
/// dispatcher again over the same immutable fields.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    command: String,
    response_text: Option<String>,
    is_error: bool,
    prompt_matches: Vec<String>,
    dispatcher: Arc<Dispatcher>,
}

impl ParsedResponse {
    /// Wraps a successful response with no prompt information.
    pub fn new(command: impl Into<String>, response_text: impl AsRef<str>) -> Self {
        Self::from_session(
            command,
            SessionResponse::new(false, response_text.as_ref(), Vec::new()),
        )
    }

    /// Wraps what the session layer returned for `command`.
    pub fn from_session(command: impl Into<String>, response: SessionResponse) -> Self {
        Self {
            command: command.into(),
            response_text: response
                .response_text
                .as_deref()
                .map(normalize_line_endings),
            is_error: response.is_error,
            prompt_matches: response.prompt_matches,
            dispatcher: DEFAULT_DISPATCHER.clone(),
        }
    }

    /// Uses `dispatcher` instead of the built-in one.
    pub fn with_dispatcher(mut self, dispatcher: Arc<Dispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Normalized response text, if the session returned any.
    pub fn response_text(&self) -> Option<&str> {
        self.response_text.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn prompt_matches(&self) -> &[String] {
        &self.prompt_matches
    }

    /// Parses the response with this response's dispatcher.
    ///
    /// `None` when there is no text or nothing was found.
    pub fn structured(&self) -> Option<ParseOutput> {
        self.structured_with(&self.dispatcher)
    }

    /// Parses the response with an explicit dispatcher.
    pub fn structured_with(&self, dispatcher: &Dispatcher) -> Option<ParseOutput> {
        let text = self.response_text.as_deref()?;
        dispatcher.parse_with_separator(&self.command, text, LINE_SEPARATOR)
    }
}

impl fmt::Display for ParsedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.response_text.as_deref().unwrap_or_default())
    }
}
