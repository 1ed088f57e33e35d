//! The (start, end) range that scopes every time-series query.

use std::time::{SystemTime, UNIX_EPOCH};

/// One day in milliseconds, the default window span.
pub const DAY_MS: i64 = 24 * 3600 * 1000;

/// A query window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    /// Create a window; the bounds are swapped if given in reverse.
    pub fn new(start: i64, end: i64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// The `span_ms` milliseconds ending at `end`.
    pub fn ending_at(end: i64, span_ms: i64) -> Self {
        Self::new(end.saturating_sub(span_ms.max(0)), end)
    }

    /// The `span_ms` milliseconds ending now.
    pub fn last(span_ms: i64) -> Self {
        Self::ending_at(now_millis(), span_ms)
    }

    /// Now minus 24 hours through now.
    pub fn last_day() -> Self {
        Self::last(DAY_MS)
    }

    pub fn span_ms(&self) -> i64 {
        self.end - self.start
    }

    /// Move both bounds by `delta_ms` (negative moves back in time).
    pub fn shift(self, delta_ms: i64) -> Self {
        Self {
            start: self.start.saturating_add(delta_ms),
            end: self.end.saturating_add(delta_ms),
        }
    }

    /// Keep the end, replace the span.
    pub fn with_span(self, span_ms: i64) -> Self {
        Self::ending_at(self.end, span_ms)
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::last_day()
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
