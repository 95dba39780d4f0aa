//! Rotating HTML document sink: a self-contained browser-viewable log, one
//! strictly validated `<div class="log-row">` block appended per record.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

use super::{LogRecord, rotate_files, validate_handle};
use crate::error::Error;
use crate::fmt::colorize::LineScan;
use crate::fmt::{escape_html, normalize_for_html, split_lines};
use crate::guard::{absolutize, assert_safe_target};
use crate::level::{Level, Nature};
use crate::sanitize::validate_row;

/// Document color scheme, selected at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlTheme {
    #[default]
    Dark,
    Light,
}

impl HtmlTheme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Dark => "theme-dark",
            Self::Light => "theme-light",
        }
    }
}

impl fmt::Display for HtmlTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HtmlTheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(Error::Validation(format!("unsupported HTML theme: '{s}'"))),
        }
    }
}

/// Static document shell with an insertion marker; rows are appended after it.
/// The shell deliberately has no closing `</html>` so appends stay inside the
/// stream container.
const DOCUMENT_TEMPLATE: &str = include_str!("document.html");

const STREAM_MARKER: &str = "<!-- LOGFENCE_STREAM_ENTRIES -->";

const ROW_MARKER: &str = "<div class=\"log-row\">";

#[derive(Debug)]
pub struct HtmlFacility {
    path: PathBuf,
    title: String,
    theme: HtmlTheme,
    auto_refresh_enabled: bool,
    auto_refresh_seconds: u32,
    max_line_length: usize,
    colorize_timeout: Duration,
    max_document_bytes: u64,
    line_number: u64,
}

impl HtmlFacility {
    /// Creates the facility: validates the handle, creates parent directories,
    /// safety-checks, optionally rotates, writes or reuses the template
    /// document, and recovers the row counter from existing content.
    ///
    /// # Errors
    /// Validation errors for a malformed handle, unsafe-target rejections,
    /// and I/O failures.
    #[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
    pub fn create(
        handle: &str,
        file_path: &str,
        title: &str,
        theme: HtmlTheme,
        auto_refresh_enabled: bool,
        auto_refresh_seconds: u32,
        max_line_length: usize,
        colorize_timeout_ms: u64,
        max_document_bytes: u64,
        rotate_on_start: bool,
        rotations_to_keep: u32,
    ) -> Result<Self, Error> {
        validate_handle(handle)?;
        let expanded = shellexpand::tilde(file_path);
        let path = absolutize(Path::new(expanded.as_ref()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        assert_safe_target(&path)?;
        if rotate_on_start {
            rotate_files(&path, rotations_to_keep)?;
        }

        let mut facility = Self {
            path,
            title: title.to_string(),
            theme,
            auto_refresh_enabled,
            auto_refresh_seconds,
            max_line_length,
            colorize_timeout: Duration::from_millis(colorize_timeout_ms),
            max_document_bytes,
            line_number: 0,
        };
        facility.ensure_document()?;
        facility.line_number = facility.detect_existing_row_count()?;
        Ok(facility)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn theme(&self) -> HtmlTheme {
        self.theme
    }

    /// Refresh interval when auto-refresh is enabled.
    #[must_use]
    pub const fn auto_refresh_seconds(&self) -> Option<u32> {
        if self.auto_refresh_enabled {
            Some(self.auto_refresh_seconds)
        } else {
            None
        }
    }

    const fn badge_icon(record: &LogRecord) -> &'static str {
        if matches!(record.nature, Nature::Error) {
            "⛔"
        } else if matches!(record.nature, Nature::Warning) {
            "⚠️"
        } else if matches!(record.level, Level::Debug) {
            "🐞"
        } else {
            "ℹ️"
        }
    }

    const fn badge_css_class(record: &LogRecord) -> &'static str {
        if matches!(record.nature, Nature::Error) {
            "badge-error"
        } else if matches!(record.level, Level::Debug) {
            "badge-debug"
        } else if matches!(record.nature, Nature::Warning) {
            "badge-warning"
        } else {
            "badge-info"
        }
    }

    /// Writes the template shell if the document is missing or empty.
    ///
    /// The title is substituted last so escaped user text can never be
    /// re-expanded as a placeholder.
    fn ensure_document(&self) -> Result<(), Error> {
        if fs::metadata(&self.path).is_ok_and(|meta| meta.len() > 0) {
            return Ok(());
        }
        assert_safe_target(&self.path)?;
        let refresh_meta = if self.auto_refresh_enabled {
            format!(
                "<meta http-equiv=\"refresh\" content=\"{}\" />",
                self.auto_refresh_seconds
            )
        } else {
            String::new()
        };
        let document = DOCUMENT_TEMPLATE
            .replace("{refresh_meta}", &refresh_meta)
            .replace("{theme_class}", self.theme.css_class())
            .replace("{stream_marker}", STREAM_MARKER)
            .replace("{title}", &escape_html(&self.title));
        fs::write(&self.path, document)?;
        Ok(())
    }

    /// Recovers the running row counter when attaching to a document that
    /// already holds rows, so line numbers continue instead of restarting.
    fn detect_existing_row_count(&self) -> Result<u64, Error> {
        if !self.path.exists() {
            return Ok(0);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(content.matches(ROW_MARKER).count() as u64)
    }

    fn clip_line(&self, line: &str) -> String {
        if line.chars().count() <= self.max_line_length {
            return line.to_string();
        }
        let clipped: String = line.chars().take(self.max_line_length).collect();
        format!("{clipped} …[line clipped]")
    }

    /// Renders the message as per-character `<span class="syn-*">` runs, each
    /// line under its own colorizer deadline. On expiry the line is rendered
    /// once, escaped and uncolored; partial span output is discarded.
    fn render_message(&self, message: &str) -> String {
        let lines = split_lines(&normalize_for_html(message));
        let mut html_lines = Vec::with_capacity(lines.len());
        for (line_index, raw_line) in lines.iter().enumerate() {
            let line = self.clip_line(raw_line);
            let prefix = if line_index > 0 { "\t" } else { "" };
            let deadline = Instant::now() + self.colorize_timeout.max(Duration::from_millis(1));
            let rendered = Self::render_line_spans(&line, deadline)
                .unwrap_or_else(|| escape_html(&line));
            html_lines.push(format!("{prefix}{rendered}"));
        }
        html_lines.join("\n")
    }

    /// `None` when the deadline expires before the line is fully rendered.
    fn render_line_spans(line: &str, deadline: Instant) -> Option<String> {
        let chars: Vec<char> = line.chars().collect();
        let scan = LineScan::scan(&chars, deadline).ok()?;
        let mut rendered = String::with_capacity(line.len() * 8);
        for (idx, &ch) in chars.iter().enumerate() {
            if Instant::now() >= deadline {
                return None;
            }
            let css = scan.classify(idx, ch).css_class();
            let escaped = escape_html(&ch.to_string());
            rendered.push_str(&format!("<span class=\"{css}\">{escaped}</span>"));
        }
        Some(rendered)
    }

    /// Renders, validates, and appends one row.
    ///
    /// # Errors
    /// Sanitization rejection (schema violation or document byte cap),
    /// unsafe-target rejection, or I/O failure. A rejected row leaves the
    /// document byte-identical.
    pub fn write(&mut self, record: &LogRecord) -> Result<(), Error> {
        self.ensure_document()?;
        assert_safe_target(&self.path)?;

        let timestamp = record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        let (date_part, clock_part) = timestamp.split_once(' ').unwrap_or((timestamp.as_str(), ""));
        let badge = Self::badge_icon(record);
        let badge_class = Self::badge_css_class(record);
        let rendered_message = self.render_message(&record.message);
        self.line_number += 1;
        let line_no = format!("{:06}", self.line_number);

        let row = format!(
            "<div class=\"log-row\">\n  \
             <div class=\"log-line-no\"><pre>{}</pre></div>\n  \
             <div class=\"log-time\"><pre><span class=\"log-date\">{}</span> <span class=\"log-clock\">{}</span></pre></div>\n  \
             <div class=\"{badge_class}\"><pre>{}</pre></div>\n  \
             <div><pre>{rendered_message}</pre></div>\n\
             </div>\n",
            escape_html(&line_no),
            escape_html(date_part),
            escape_html(clock_part),
            escape_html(badge),
        );

        validate_row(&row)?;

        let current_size = fs::metadata(&self.path).map_or(0, |meta| meta.len());
        let next_size = current_size + row.len() as u64;
        if next_size > self.max_document_bytes {
            return Err(Error::Sanitization(format!(
                "HTML log size limit exceeded ({next_size} > {} bytes)",
                self.max_document_bytes
            )));
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(row.as_bytes())?;
        Ok(())
    }
}
