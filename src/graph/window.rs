//! Time window bookkeeping
//!
//! Tracks the union of all processed time ranges and picks the next range to
//! fetch, either forward to the present or backward into history.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default lookback for the very first forward window
pub const INITIAL_WINDOW_SECS: i64 = 3600;

/// Half-open time range `(after_secs, before_secs)` in unix seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub after_secs: i64,
    pub before_secs: i64,
}

impl TimeWindow {
    pub fn new(after_secs: i64, before_secs: i64) -> Self {
        Self { after_secs, before_secs }
    }

    /// Whether both bounds are valid calendar timestamps
    pub fn is_representable(&self) -> bool {
        DateTime::<Utc>::from_timestamp(self.after_secs, 0).is_some()
            && DateTime::<Utc>::from_timestamp(self.before_secs, 0).is_some()
    }
}

/// Covered time span. Zero on either bound means "not yet initialized".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeWindowTracker {
    earliest_after_secs: i64,
    latest_before_secs: i64,
}

impl TimeWindowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn earliest_after_secs(&self) -> i64 {
        self.earliest_after_secs
    }

    pub fn latest_before_secs(&self) -> i64 {
        self.latest_before_secs
    }

    /// Widen coverage to include `window`
    pub fn record_window(&mut self, window: TimeWindow) {
        if self.latest_before_secs == 0 || window.before_secs > self.latest_before_secs {
            self.latest_before_secs = window.before_secs;
        }
        if self.earliest_after_secs == 0 || window.after_secs < self.earliest_after_secs {
            self.earliest_after_secs = window.after_secs;
        }
    }

    /// Window from the newest covered point (or an hour ago) up to `now_secs`
    pub fn next_latest_window(&self, now_secs: i64) -> TimeWindow {
        let after_secs = if self.latest_before_secs == 0 {
            now_secs.saturating_sub(INITIAL_WINDOW_SECS)
        } else {
            self.latest_before_secs
        };
        TimeWindow::new(after_secs, now_secs)
    }

    /// Window of `interval_secs` ending at the oldest covered point (or `now_secs`).
    ///
    /// `None` if the interval is not positive or the window would start
    /// outside the calendar range.
    pub fn next_earlier_window(&self, interval_secs: i64, now_secs: i64) -> Option<TimeWindow> {
        if interval_secs <= 0 {
            return None;
        }
        let before_secs = if self.earliest_after_secs == 0 {
            now_secs
        } else {
            self.earliest_after_secs
        };
        let window = TimeWindow::new(before_secs.checked_sub(interval_secs)?, before_secs);
        window.is_representable().then_some(window)
    }
}

/// Current unix time in seconds
pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}

/// RFC 3339 rendering of a unix timestamp, the epoch if out of range
pub fn format_secs(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .unwrap_or_default()
        .to_rfc3339()
}
