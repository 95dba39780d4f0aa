//! Unified error type for all logfence operations.

/// Error type for logfence operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Invalid handle, enum value, limit, or handle selection.
    Validation(String),
    /// Log target path is unsafe (symlink or non-regular file).
    UnsafeTarget(String),
    /// Rendered HTML failed strict validation, or the document cap would be exceeded.
    Sanitization(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::Validation(s) => write!(f, "validation error: {s}"),
            Self::UnsafeTarget(s) => write!(f, "unsafe log target: {s}"),
            Self::Sanitization(s) => write!(f, "sanitization error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
