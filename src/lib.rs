#![forbid(unsafe_code)]

//! `logfence` - Defensive log routing to console, rotating files and HTML.
//!
//! Routes structured log events to multiple heterogeneous sinks — a terminal,
//! a rotating plain-text file, and a self-contained browser-viewable HTML
//! document — behind strict defensive fences:
//! - Message normalization and clipping (control/bidi codepoint stripping)
//! - A bounded-time syntax colorizer with graceful uncolored fallback
//! - A strict allow-list validator re-checking every HTML row before commit
//! - A symlink-aware path safety guard on every filesystem touch
//! - Size/count-based file rotation
//! - A fixed-window write throttle shared across facilities
//!
//! # Example
//!
//! ```no_run
//! use logfence::{HtmlTheme, Router, RouterConfig};
//!
//! let router = Router::new(RouterConfig::default())?;
//! router.add_log_file("app", "logs/app.log", true, 3)?;
//! router.add_html_log_file("web", "logs/app.log.html", "App Log",
//!     HtmlTheme::Dark, false, 10, false, 0)?;
//!
//! router.info("service started port=8080", None)?;
//! router.warning("cache miss rate elevated: rate=0.42", Some(&["app"]))?;
//! # Ok::<(), logfence::Error>(())
//! ```

pub mod config;
pub mod facility;
pub mod fmt;
pub mod global;
pub mod guard;
pub mod level;
pub mod router;
pub mod sanitize;
pub mod throttle;

mod error;

// Re-exports for convenience
pub use config::RouterConfig;
pub use error::Error;
pub use facility::{Facility, HtmlTheme, LogRecord, is_valid_handle};
pub use level::{Level, Nature};
pub use router::{HANDLE_CONSOLE, Router};
pub use throttle::ThrottleStats;
