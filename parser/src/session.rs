//! Contract with the interactive session layer.
//!
//! The transport (connection, prompt detection, login/enable/configure state
//! machine) lives outside this crate. It hands over one [`SessionResponse`] per
//! executed command; everything here is a pure function of that value.

use thiserror::Error;

use crate::response::ParsedResponse;

/// Raw result of one command as reported by a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResponse {
    /// Whether the session matched its error prompt.
    pub is_error: bool,
    /// Text echoed by the device, line endings not yet normalized.
    pub response_text: Option<String>,
    /// Capture groups of the prompt that ended the response.
    pub prompt_matches: Vec<String>,
}

impl SessionResponse {
    pub fn new(is_error: bool, response_text: impl Into<String>, prompt_matches: Vec<String>) -> Self {
        Self {
            is_error,
            response_text: Some(response_text.into()),
            prompt_matches,
        }
    }
}

/// Errors a session layer reports instead of a response.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("attempt to execute without a connection")]
    NotConnected,
    #[error("session I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("login failed after {attempts} attempts")]
    LoginFailed { attempts: u32 },
    #[error("cannot enter privileged mode after {attempts} attempts")]
    PrivilegeDenied { attempts: u32 },
    #[error("cannot enter configuration mode")]
    ConfigureModeUnavailable,
}

/// Anything that can run a command on a device and return its output.
pub trait CommandSession {
    fn execute(&mut self, command: &str) -> Result<SessionResponse, SessionError>;
}

/// Executes `command` on `session` and wraps the result for parsing.
pub fn execute_parsed<S: CommandSession + ?Sized>(
    session: &mut S,
    command: &str,
) -> Result<ParsedResponse, SessionError> {
    let response = session.execute(command)?;
    Ok(ParsedResponse::from_session(command, response))
}

/// Rewrites `\r\n` and lone `\r` to `\n`.
///
/// # Examples
///
/// ```
/// use netscreen_parser::session::normalize_line_endings;
///
/// assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
/// ```
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
