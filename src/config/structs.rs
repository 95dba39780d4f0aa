//! Configuration struct definitions.

use serde::Deserialize;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum log level ("DEBUG" or "INFO").
    pub level: String,
    /// Enable ANSI color formatting for console output.
    pub color: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            color: true,
        }
    }
}

/// Message preparation limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum message length in characters before clipping.
    pub max_message_length: usize,
    /// Maximum lines kept per message before dropping the excess.
    pub max_message_lines: usize,
    /// Maximum characters per line before clipping.
    pub max_line_length: usize,
    /// Maximum explicit handles accepted per log call.
    pub max_handles_per_call: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_message_length: 32_768,
            max_message_lines: 500,
            max_line_length: 4_096,
            max_handles_per_call: 64,
        }
    }
}

/// Syntax colorizer budget.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorizeConfig {
    /// Wall-clock budget per line in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ColorizeConfig {
    fn default() -> Self {
        Self { timeout_ms: 15 }
    }
}

/// HTML document limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Document size cap in bytes; a row that would exceed it is rejected.
    pub max_document_bytes: u64,
    /// Title length cap in characters.
    pub max_title_length: usize,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: 10 * 1024 * 1024,
            max_title_length: 256,
        }
    }
}

/// Write-admission throttle settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Admitted writes per window, shared across all handles.
    pub max_writes_per_second: u64,
    /// Fixed window length in seconds.
    pub window_seconds: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_writes_per_second: 200,
            window_seconds: 1,
        }
    }
}

/// Plain-file facility settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// File size in bytes beyond which an append triggers rotation first.
    pub max_file_size_bytes: u64,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 200 * 1024 * 1024,
        }
    }
}
