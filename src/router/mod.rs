//! The routing engine: validates, normalizes, throttles, and dispatches each
//! log call to its selected facilities.
//!
//! One `Router` instance is intended per process. Every mutating operation —
//! registration, logging, stats reads — is serialized under a single mutex so
//! a throttle-window reset, a rotation step, and a facility-map mutation can
//! never interleave.

mod preview;

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::Local;

use crate::config::RouterConfig;
use crate::error::Error;
use crate::facility::{ConsoleFacility, Facility, FileFacility, HtmlFacility, HtmlTheme, LogRecord};
use crate::fmt::normalize_newlines;
use crate::level::{Level, Nature};
use crate::throttle::{Throttle, ThrottleStats};

/// The reserved handle of the always-present console facility.
pub const HANDLE_CONSOLE: &str = "console";

struct RouterInner {
    min_level: Level,
    config: RouterConfig,
    /// Insertion-ordered handle→facility map; `resolve` depends on the order
    /// and the console sits at index 0 for diagnostics.
    facilities: Vec<(String, Facility)>,
    throttle: Throttle,
    sample_index: usize,
}

/// Log routing engine with strict defensive fences.
///
/// Construct one per process and share it freely: all methods take `&self`
/// and serialize internally.
pub struct Router {
    inner: Mutex<RouterInner>,
}

impl Default for Router {
    /// Default configuration is valid by construction, so this cannot fail.
    fn default() -> Self {
        Self::from_validated(RouterConfig::default(), Level::Info)
    }
}

impl Router {
    /// Creates a router from a validated configuration.
    ///
    /// # Errors
    /// [`Error::Validation`] when a limit is non-positive or the level string
    /// is not a known level.
    pub fn new(config: RouterConfig) -> Result<Self, Error> {
        config.validate()?;
        let min_level = config.parse_level()?;
        Ok(Self::from_validated(config, min_level))
    }

    fn from_validated(config: RouterConfig, min_level: Level) -> Self {
        let console = ConsoleFacility::new(
            config.general.color,
            config.limits.max_line_length,
            config.colorize.timeout_ms,
        );
        let throttle = Throttle::new(
            config.throttle.max_writes_per_second,
            Duration::from_secs(config.throttle.window_seconds),
        );
        Self {
            inner: Mutex::new(RouterInner {
                min_level,
                config,
                facilities: vec![(HANDLE_CONSOLE.to_string(), Facility::Console(console))],
                throttle,
                sample_index: 0,
            }),
        }
    }

    /// A panic in one logging call must not silence every later one; the
    /// poisoned state is still structurally sound, so it is recovered.
    fn lock(&self) -> MutexGuard<'_, RouterInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_level(&self, level: Level) {
        self.lock().min_level = level;
    }

    /// Toggles ANSI color on the live console facility.
    pub fn set_color(&self, enabled: bool) {
        let mut inner = self.lock();
        if let Some((_, Facility::Console(console))) = inner.facilities.first_mut() {
            console.set_color(enabled);
        }
    }

    /// Registers a rotating plain-text file facility under `handle`.
    ///
    /// Returns `Ok(false)` when construction failed unexpectedly (a diagnostic
    /// line is emitted instead); replaces any facility already at `handle`.
    ///
    /// # Errors
    /// Validation errors (handle syntax, reserved handle) and unsafe-target
    /// rejections always raise.
    pub fn add_log_file(
        &self,
        handle: &str,
        file_path: &str,
        rotate_on_start: bool,
        rotations_to_keep: u32,
    ) -> Result<bool, Error> {
        let mut inner = self.lock();
        validate_registration_handle(handle)?;
        let max_file_size = inner.config.file.max_file_size_bytes;
        match FileFacility::create(
            handle,
            file_path,
            rotate_on_start,
            rotations_to_keep,
            max_file_size,
        ) {
            Ok(facility) => {
                inner.register(handle, Facility::File(facility));
                Ok(true)
            }
            Err(err @ (Error::Validation(_) | Error::UnsafeTarget(_))) => Err(err),
            Err(err) => {
                inner.console_diagnostic(&format!(
                    "Failed to initialize file facility '{handle}' at '{file_path}': {err}"
                ));
                Ok(false)
            }
        }
    }

    /// Registers a rotating HTML document facility under `handle`.
    ///
    /// # Errors
    /// Validation errors (handle syntax, reserved handle, overlong title,
    /// zero refresh interval) and unsafe-target rejections always raise;
    /// unexpected construction failures recover into `Ok(false)`.
    #[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
    pub fn add_html_log_file(
        &self,
        handle: &str,
        file_path: &str,
        title: &str,
        theme: HtmlTheme,
        auto_refresh_enabled: bool,
        auto_refresh_seconds: u32,
        rotate_on_start: bool,
        rotations_to_keep: u32,
    ) -> Result<bool, Error> {
        let mut inner = self.lock();
        validate_registration_handle(handle)?;
        if auto_refresh_seconds == 0 {
            return Err(Error::Validation(
                "auto_refresh_seconds must be > 0".to_string(),
            ));
        }
        let max_title = inner.config.html.max_title_length;
        if title.chars().count() > max_title {
            return Err(Error::Validation(format!(
                "title is too long (max {max_title} chars)"
            )));
        }
        let limits = &inner.config.limits;
        match HtmlFacility::create(
            handle,
            file_path,
            title,
            theme,
            auto_refresh_enabled,
            auto_refresh_seconds,
            limits.max_line_length,
            inner.config.colorize.timeout_ms,
            inner.config.html.max_document_bytes,
            rotate_on_start,
            rotations_to_keep,
        ) {
            Ok(facility) => {
                inner.register(handle, Facility::Html(facility));
                Ok(true)
            }
            Err(err @ (Error::Validation(_) | Error::UnsafeTarget(_))) => Err(err),
            Err(err) => {
                inner.console_diagnostic(&format!(
                    "Failed to initialize HTML facility '{handle}' at '{file_path}': {err}"
                ));
                Ok(false)
            }
        }
    }

    /// Routes one message to the selected facilities.
    ///
    /// `handles = None` targets every registered facility in registration
    /// order. Per-facility write failures are isolated into console
    /// diagnostics and never propagate here.
    ///
    /// # Errors
    /// [`Error::Validation`] when the explicit handle list is too long or
    /// names an unregistered handle — raised before any write.
    pub fn log(
        &self,
        message: &str,
        level: Level,
        nature: Nature,
        handles: Option<&[&str]>,
    ) -> Result<(), Error> {
        let mut inner = self.lock();
        if level < inner.min_level {
            return Ok(());
        }

        let selected = inner.resolve_handles(handles)?;
        let record = LogRecord {
            message: inner.prepare_message(message),
            level,
            nature,
            timestamp: Local::now(),
        };

        for (index, handle) in selected {
            let admission = inner.throttle.admit(&handle, Instant::now());
            if let Some(drops) = admission.expired_window_drops {
                let window = inner.throttle.window_secs();
                inner.console_diagnostic(&format!(
                    "Throttling activated: dropped {drops} write(s) in last {window}s window."
                ));
            }
            if !admission.admitted {
                continue;
            }
            match inner.facilities[index].1.write(&record) {
                Ok(()) => {}
                Err(err @ (Error::Sanitization(_) | Error::UnsafeTarget(_))) => {
                    inner.console_diagnostic(&format!(
                        "Security incident in facility '{handle}': {err}"
                    ));
                }
                Err(err) => {
                    inner.console_diagnostic(&format!(
                        "Failed to write log into facility '{handle}': {err}"
                    ));
                }
            }
        }
        Ok(())
    }

    /// Debug-level routine message.
    ///
    /// # Errors
    /// Same handle-selection errors as [`Router::log`].
    pub fn debug(&self, message: &str, handles: Option<&[&str]>) -> Result<(), Error> {
        self.log(message, Level::Debug, Nature::Info, handles)
    }

    /// Info-level routine message.
    ///
    /// # Errors
    /// Same handle-selection errors as [`Router::log`].
    pub fn info(&self, message: &str, handles: Option<&[&str]>) -> Result<(), Error> {
        self.log(message, Level::Info, Nature::Info, handles)
    }

    /// Info-level warning-nature message.
    ///
    /// # Errors
    /// Same handle-selection errors as [`Router::log`].
    pub fn warning(&self, message: &str, handles: Option<&[&str]>) -> Result<(), Error> {
        self.log(message, Level::Info, Nature::Warning, handles)
    }

    /// Info-level error-nature message.
    ///
    /// # Errors
    /// Same handle-selection errors as [`Router::log`].
    pub fn error(&self, message: &str, handles: Option<&[&str]>) -> Result<(), Error> {
        self.log(message, Level::Info, Nature::Error, handles)
    }

    /// Registered handles in registration order.
    #[must_use]
    pub fn handles(&self) -> Vec<String> {
        self.lock()
            .facilities
            .iter()
            .map(|(handle, _)| handle.clone())
            .collect()
    }

    /// Snapshot of throttle drop counters, taken under the instance lock so
    /// it is consistent with window state.
    #[must_use]
    pub fn throttle_stats(&self) -> ThrottleStats {
        self.lock().throttle.stats()
    }

    /// Logs one descriptor line per registered facility.
    ///
    /// # Errors
    /// Same handle-selection errors as [`Router::log`].
    pub fn log_available_facilities(&self) -> Result<(), Error> {
        let listing = {
            let inner = self.lock();
            inner
                .facilities
                .iter()
                .map(|(handle, facility)| format!("- {}", facility.describe(handle)))
                .collect::<Vec<_>>()
                .join("\n")
        };
        self.info(&format!("Available logging facilities:\n{listing}"), None)
    }
}

impl RouterInner {
    fn register(&mut self, handle: &str, facility: Facility) {
        if let Some(slot) = self.facilities.iter_mut().find(|(h, _)| h == handle) {
            slot.1 = facility;
        } else {
            self.facilities.push((handle.to_string(), facility));
        }
    }

    /// Maps the requested handles to facility indices, in request order
    /// (registration order for `None`), failing before any write when the
    /// list is too long or names an unknown handle.
    fn resolve_handles(&self, handles: Option<&[&str]>) -> Result<Vec<(usize, String)>, Error> {
        let Some(requested) = handles else {
            return Ok(self
                .facilities
                .iter()
                .enumerate()
                .map(|(index, (handle, _))| (index, handle.clone()))
                .collect());
        };

        let max = self.config.limits.max_handles_per_call;
        if requested.len() > max {
            return Err(Error::Validation(format!(
                "too many log handles: {} > {max}",
                requested.len()
            )));
        }

        let mut selected = Vec::with_capacity(requested.len());
        let mut unknown = Vec::new();
        for &handle in requested {
            match self.facilities.iter().position(|(h, _)| h == handle) {
                Some(index) => selected.push((index, handle.to_string())),
                None => unknown.push(handle),
            }
        }
        if !unknown.is_empty() {
            return Err(Error::Validation(format!(
                "unknown log handles: {}",
                unknown.join(", ")
            )));
        }
        Ok(selected)
    }

    /// Normalizes line endings, then clips total length, line count, and
    /// per-line length, each with an explicit marker.
    fn prepare_message(&self, message: &str) -> String {
        let limits = &self.config.limits;
        let mut normalized = normalize_newlines(message);

        if normalized.chars().count() > limits.max_message_length {
            let clipped: String = normalized.chars().take(limits.max_message_length).collect();
            normalized = format!(
                "{clipped} ...[message clipped at {} chars]",
                limits.max_message_length
            );
        }

        let mut lines: Vec<String> = normalized.split('\n').map(str::to_string).collect();
        if lines.len() > limits.max_message_lines {
            let dropped = lines.len() - limits.max_message_lines;
            lines.truncate(limits.max_message_lines);
            lines.push(format!("...[dropped {dropped} line(s)]"));
        }

        let clipped_lines: Vec<String> = lines
            .into_iter()
            .map(|line| {
                if line.chars().count() > limits.max_line_length {
                    let clipped: String = line.chars().take(limits.max_line_length).collect();
                    format!("{clipped} ...[line clipped at {} chars]", limits.max_line_length)
                } else {
                    line
                }
            })
            .collect();
        clipped_lines.join("\n")
    }

    /// Renders a diagnostic straight to the console facility, bypassing
    /// throttle and level gates — diagnostics must not be droppable.
    fn console_diagnostic(&mut self, message: &str) {
        let record = LogRecord {
            message: message.to_string(),
            level: Level::Info,
            nature: Nature::Error,
            timestamp: Local::now(),
        };
        if let Some((_, facility)) = self.facilities.first_mut() {
            // Console writes can only fail on closed stdio; nowhere left to report.
            let _ = facility.write(&record);
        }
    }
}

/// Registration-time handle rules beyond facility syntax checks.
fn validate_registration_handle(handle: &str) -> Result<(), Error> {
    if handle == HANDLE_CONSOLE {
        return Err(Error::Validation(format!(
            "log handle '{HANDLE_CONSOLE}' is reserved"
        )));
    }
    Ok(())
}
