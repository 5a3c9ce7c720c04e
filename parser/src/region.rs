//! Region extraction: locate one table inside a device screen.
//!
//! A single forward pass over the lines with two flags, `active` and
//! `pending`. For each line, in this order:
//!
//! 1. `start` matches: `active = true` (the line is included).
//! 2. `continuation` matches: `pending = true`, `active = false` (the line,
//!    typically a header, is excluded).
//! 3. `end` matches: `active = false` (the line is excluded).
//! 4. The line is appended if `active`.
//! 5. If `pending`: clear it and set `active`, so extraction resumes on the
//!    next line.
//!
//! The order matters: it lets a header marker and a footer marker be
//! exclusive while the first data line after the header is still included.

use netscreen_core::RegionMarkers;
use regex::Regex;
use tracing::{debug, trace};

use crate::TableError;

/// Compiled region markers.
#[derive(Debug, Clone, Default)]
pub struct Region {
    start: Option<Regex>,
    continuation: Option<Regex>,
    end: Option<Regex>,
}

impl Region {
    /// Compiles the regex sources in `markers`.
    pub fn compile(markers: &RegionMarkers) -> Result<Self, TableError> {
        let compile = |field: &'static str, source: &Option<String>| {
            source
                .as_deref()
                .map(Regex::new)
                .transpose()
                .map_err(|source| TableError::Pattern { field, source })
        };

        Ok(Self {
            start: compile("start", &markers.start)?,
            continuation: compile("continuation", &markers.continuation)?,
            end: compile("end", &markers.end)?,
        })
    }

    /// Returns `true` when no marker is set; such a region is the whole text.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.continuation.is_none() && self.end.is_none()
    }
}

fn matches(marker: &Option<Regex>, line: &str) -> bool {
    marker.as_ref().is_some_and(|regex| regex.is_match(line))
}

/// Returns the lines of `text` that belong to `region`, joined by `separator`.
///
/// Returns `None` when no line was selected. Without any marker nothing can
/// ever activate extraction, so the result is always `None`; callers that
/// want the whole text should check [`Region::is_unbounded`] first.
///
/// # Examples
///
/// ```
/// use netscreen_core::RegionMarkers;
/// use netscreen_parser::region::{Region, extract_region};
///
/// let region = Region::compile(
///     &RegionMarkers::new().with_continuation("^header").with_end("^$"),
/// )
/// .unwrap();
///
/// let extracted = extract_region("header\nA\nB\n\n", &region, "\n");
/// assert_eq!(extracted.as_deref(), Some("A\nB"));
/// ```
pub fn extract_region(text: &str, region: &Region, separator: &str) -> Option<String> {
    let mut active = false;
    let mut pending = false;
    let mut extracted: Vec<&str> = Vec::new();

    for line in text.split(separator) {
        if matches(&region.start, line) {
            active = true;
        }
        if matches(&region.continuation, line) {
            pending = true;
            active = false;
        }
        if matches(&region.end, line) {
            active = false;
        }
        if active {
            extracted.push(line);
        } else {
            trace!(line, "Outside region");
        }
        if pending {
            pending = false;
            active = true;
        }
    }

    debug!(lines = extracted.len(), "Extracted region");
    if extracted.is_empty() {
        None
    } else {
        Some(extracted.join(separator))
    }
}
