//! Console sink: `[HH:MM:SS] <icon> <message>` with optional per-character
//! syntax coloring, ERROR-nature records routed to stderr.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use super::LogRecord;
use crate::error::Error;
use crate::fmt::color::{Color, colorize};
use crate::fmt::colorize::{LineScan, TokenClass};
use crate::fmt::{normalize_for_terminal, split_lines};
use crate::level::{Level, Nature};

/// Console rendering state; the sink itself is the process's stdout/stderr.
#[derive(Debug)]
pub struct ConsoleFacility {
    color: bool,
    max_line_length: usize,
    colorize_timeout: Duration,
}

impl ConsoleFacility {
    #[must_use]
    pub const fn new(color: bool, max_line_length: usize, colorize_timeout_ms: u64) -> Self {
        Self {
            color,
            max_line_length,
            colorize_timeout: Duration::from_millis(colorize_timeout_ms),
        }
    }

    pub const fn set_color(&mut self, enabled: bool) {
        self.color = enabled;
    }

    /// Reconfiguration path: a rebuilt router reuses the live console sink.
    pub const fn set_limits(&mut self, max_line_length: usize, colorize_timeout_ms: u64) {
        self.max_line_length = max_line_length;
        self.colorize_timeout = Duration::from_millis(colorize_timeout_ms);
    }

    const fn badge_icon(record: &LogRecord) -> &'static str {
        if matches!(record.nature, Nature::Error) {
            "×"
        } else if matches!(record.level, Level::Debug) || matches!(record.nature, Nature::Warning) {
            "›"
        } else {
            "»"
        }
    }

    const fn badge_color(record: &LogRecord) -> Color {
        if matches!(record.nature, Nature::Error) {
            Color::red()
        } else if matches!(record.level, Level::Debug) {
            Color::gray()
        } else {
            Color::green()
        }
    }

    const fn base_color(record: &LogRecord) -> Color {
        if matches!(record.level, Level::Debug) {
            Color::gray()
        } else {
            Color::white()
        }
    }

    const fn token_color(token: TokenClass, base: Color) -> Color {
        match token {
            TokenClass::QuoteMark | TokenClass::Punct => Color::green(),
            TokenClass::QuoteContent => Color::yellow(),
            TokenClass::Lhs => Color::pink(),
            TokenClass::Number => Color::cyan(),
            TokenClass::Base => base,
        }
    }

    /// Per-character ANSI coloring under the wall-clock budget; on expiry the
    /// whole line is emitted once in the base color.
    fn colorize_line(&self, line: &str, record: &LogRecord) -> String {
        let base = Self::base_color(record);
        let deadline = Instant::now() + self.colorize_timeout.max(Duration::from_millis(1));
        let chars: Vec<char> = line.chars().collect();

        let Ok(scan) = LineScan::scan(&chars, deadline) else {
            return colorize(line, base);
        };

        let mut rendered = String::with_capacity(line.len() * 2);
        let mut current: Option<Color> = None;
        for (idx, &ch) in chars.iter().enumerate() {
            if Instant::now() >= deadline {
                return colorize(line, base);
            }
            let color = Self::token_color(scan.classify(idx, ch), base);
            if current != Some(color) {
                rendered.push_str(&color.fg_ansi());
                current = Some(color);
            }
            rendered.push(ch);
        }
        rendered.push_str(Color::RESET);
        rendered
    }

    fn clip_line(&self, line: &str) -> String {
        if line.chars().count() <= self.max_line_length {
            return line.to_string();
        }
        let clipped: String = line.chars().take(self.max_line_length).collect();
        format!("{clipped} …[line clipped]")
    }

    /// Writes one record: first line prefixed with time and icon, continuation
    /// lines tab-indented, all terminal-normalized and clipped.
    ///
    /// # Errors
    /// I/O errors from stdout/stderr.
    pub fn write(&self, record: &LogRecord) -> Result<(), Error> {
        let time_text = record.timestamp.format("%H:%M:%S").to_string();
        let icon = Self::badge_icon(record);
        let lines = split_lines(&normalize_for_terminal(&record.message));
        let clipped: Vec<String> = lines.iter().map(|line| self.clip_line(line)).collect();

        let mut out_lines = Vec::with_capacity(clipped.len());
        if self.color {
            let green = Color::green().fg_ansi();
            let blue = Color::blue().fg_ansi();
            let colored_time = format!("{green}[{blue}{time_text}{green}]{}", Color::RESET);
            let colored_icon = colorize(icon, Self::badge_color(record));
            out_lines.push(format!(
                "{colored_time} {colored_icon} {}",
                self.colorize_line(&clipped[0], record)
            ));
            for line in &clipped[1..] {
                out_lines.push(format!("\t{}", self.colorize_line(line, record)));
            }
        } else {
            out_lines.push(format!("[{time_text}] {icon} {}", clipped[0]));
            for line in &clipped[1..] {
                out_lines.push(format!("\t{line}"));
            }
        }

        let text = out_lines.join("\n");
        if matches!(record.nature, Nature::Error) {
            let mut stderr = io::stderr().lock();
            writeln!(stderr, "{text}")?;
            stderr.flush()?;
        } else {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}")?;
            stdout.flush()?;
        }
        Ok(())
    }
}
