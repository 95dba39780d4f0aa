//! The three sink kinds a router can own: console, rotating plain-text file,
//! and rotating browser-viewable HTML document.
//!
//! A closed enum instead of a trait object: the set of facilities is fixed by
//! design, matching on it is exhaustive, and callers never need downcasts to
//! describe or reconfigure a sink.

mod console;
mod file;
mod html;
mod rotate;

pub use console::ConsoleFacility;
pub use file::FileFacility;
pub use html::{HtmlFacility, HtmlTheme};
pub(crate) use rotate::rotate_files;

use crate::error::Error;
use crate::level::{Level, Nature};
use chrono::{DateTime, Local};
use regex::Regex;
use std::sync::LazyLock;

/// Handles are used in file-adjacent contexts (diagnostics, future file
/// naming), so the charset is deliberately restrictive.
static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,64}$").expect("invalid handle regex"));

/// Checks `[A-Za-z0-9_]{1,64}` handle syntax.
#[must_use]
pub fn is_valid_handle(handle: &str) -> bool {
    HANDLE_RE.is_match(handle)
}

/// Validates handle syntax for facility creation.
///
/// # Errors
/// [`Error::Validation`] on empty, overlong, or non-alphanumeric/underscore handles.
pub fn validate_handle(handle: &str) -> Result<(), Error> {
    if is_valid_handle(handle) {
        Ok(())
    } else {
        Err(Error::Validation(
            "log handle must be 1-64 alphanumeric or underscore characters".to_string(),
        ))
    }
}

/// One routed log event, built once per call and shared read-only across the
/// selected facilities.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub message: String,
    pub level: Level,
    pub nature: Nature,
    pub timestamp: DateTime<Local>,
}

/// A single named sink.
#[derive(Debug)]
pub enum Facility {
    Console(ConsoleFacility),
    File(FileFacility),
    Html(HtmlFacility),
}

impl Facility {
    /// Renders and persists one record.
    ///
    /// # Errors
    /// Sanitization, unsafe-target, and I/O failures; the router isolates
    /// these per facility.
    pub fn write(&mut self, record: &LogRecord) -> Result<(), Error> {
        match self {
            Self::Console(f) => f.write(record),
            Self::File(f) => f.write(record),
            Self::Html(f) => f.write(record),
        }
    }

    /// One human-readable line describing the sink behind `handle`.
    #[must_use]
    pub fn describe(&self, handle: &str) -> String {
        match self {
            Self::Console(_) => format!("{handle}: stdout/stderr"),
            Self::File(f) => format!("{handle}: {}", f.path().display()),
            Self::Html(f) => {
                let refresh = f.auto_refresh_seconds().map_or_else(
                    || "auto_refresh=off".to_string(),
                    |secs| format!("auto_refresh={secs}s"),
                );
                format!(
                    "{handle}: file://{} (title='{}', theme='{}', {refresh})",
                    f.path().display(),
                    f.title(),
                    f.theme(),
                )
            }
        }
    }
}
