//! Fixed-window write-admission control shared across facilities.
//!
//! One window spans all handles: every admitted write counts against the same
//! per-window cap, while drops are additionally attributed to the handle that
//! suffered them. Drops are not errors — they surface only through counters
//! and a single diagnostic summary when a window closes with drops in it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Outcome of one admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// Whether the write may proceed.
    pub admitted: bool,
    /// Drop count of the window that just expired, when it expired with drops.
    /// The router turns this into exactly one diagnostic line.
    pub expired_window_drops: Option<u64>,
}

/// Snapshot of the drop counters, taken under the router lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThrottleStats {
    pub dropped_total: u64,
    pub dropped_by_handle: HashMap<String, u64>,
}

#[derive(Debug)]
pub struct Throttle {
    max_writes_per_window: u64,
    window: Duration,
    window_started_at: Option<Instant>,
    writes_in_window: u64,
    dropped_in_window: u64,
    dropped_total: u64,
    dropped_by_handle: HashMap<String, u64>,
}

impl Throttle {
    #[must_use]
    pub fn new(max_writes_per_window: u64, window: Duration) -> Self {
        Self {
            max_writes_per_window,
            window,
            window_started_at: None,
            writes_in_window: 0,
            dropped_in_window: 0,
            dropped_total: 0,
            dropped_by_handle: HashMap::new(),
        }
    }

    /// Window length in whole seconds, for the router's diagnostic summary.
    #[must_use]
    pub const fn window_secs(&self) -> u64 {
        self.window.as_secs()
    }

    /// Checks one (record, handle) pair against the current window.
    ///
    /// The window opens on the first check after construction or expiry;
    /// an expired window resets the in-window counters before this check
    /// is evaluated against the fresh window.
    pub fn admit(&mut self, handle: &str, now: Instant) -> Admission {
        let mut expired_window_drops = None;

        let started_at = *self.window_started_at.get_or_insert(now);
        if now.duration_since(started_at) >= self.window {
            if self.dropped_in_window > 0 {
                expired_window_drops = Some(self.dropped_in_window);
            }
            self.window_started_at = Some(now);
            self.writes_in_window = 0;
            self.dropped_in_window = 0;
        }

        if self.writes_in_window >= self.max_writes_per_window {
            self.dropped_in_window += 1;
            self.dropped_total += 1;
            *self.dropped_by_handle.entry(handle.to_string()).or_insert(0) += 1;
            return Admission {
                admitted: false,
                expired_window_drops,
            };
        }

        self.writes_in_window += 1;
        Admission {
            admitted: true,
            expired_window_drops,
        }
    }

    #[must_use]
    pub fn stats(&self) -> ThrottleStats {
        ThrottleStats {
            dropped_total: self.dropped_total,
            dropped_by_handle: self.dropped_by_handle.clone(),
        }
    }
}
