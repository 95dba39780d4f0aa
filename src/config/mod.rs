//! TOML configuration loading and validation.
//!
//! Separated from struct definitions so the loading logic stays independent
//! of the serde schema.

mod structs;

pub use structs::{
    ColorizeConfig, FileConfig, GeneralConfig, HtmlConfig, LimitsConfig, ThrottleConfig,
};

use crate::error::Error;
use crate::level::Level;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A completely empty config file must still produce a working router —
/// `#[serde(default)]` on every section ensures zero-config works out of the box.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Severity gate and console color apply to all routing — they belong above any facility.
    pub general: GeneralConfig,
    /// Message clipping caps defend every facility, so they are not per-sink settings.
    pub limits: LimitsConfig,
    /// The colorizer budget is shared by the console and HTML facilities.
    pub colorize: ColorizeConfig,
    /// Document and title caps only matter to HTML facilities.
    pub html: HtmlConfig,
    /// Write-admission control spans all facilities of one router.
    pub throttle: ThrottleConfig,
    /// Size-based rotation threshold for plain-file facilities.
    pub file: FileConfig,
}

impl RouterConfig {
    /// Loads configuration from an explicit TOML file path.
    ///
    /// A missing file yields the defaults, mirroring zero-config startup.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if a limit
    /// fails validation.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error on TOML syntax problems or invalid limit values.
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Every recognized limit must be positive; zero would disable a defense
    /// silently rather than explicitly.
    ///
    /// # Errors
    /// [`Error::Validation`] naming the offending option.
    pub fn validate(&self) -> Result<(), Error> {
        self.parse_level()?;
        let checks = [
            ("limits.max_message_length", self.limits.max_message_length == 0),
            ("limits.max_message_lines", self.limits.max_message_lines == 0),
            ("limits.max_line_length", self.limits.max_line_length == 0),
            ("limits.max_handles_per_call", self.limits.max_handles_per_call == 0),
            ("colorize.timeout_ms", self.colorize.timeout_ms == 0),
            ("html.max_document_bytes", self.html.max_document_bytes == 0),
            ("html.max_title_length", self.html.max_title_length == 0),
            ("throttle.max_writes_per_second", self.throttle.max_writes_per_second == 0),
            ("throttle.window_seconds", self.throttle.window_seconds == 0),
            ("file.max_file_size_bytes", self.file.max_file_size_bytes == 0),
        ];
        for (name, is_zero) in checks {
            if is_zero {
                return Err(Error::Validation(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }

    /// Parses the configured minimum level string.
    ///
    /// # Errors
    /// [`Error::Validation`] for anything other than "DEBUG" or "INFO".
    pub fn parse_level(&self) -> Result<Level, Error> {
        self.general.level.parse()
    }
}
