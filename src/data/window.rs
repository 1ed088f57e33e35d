//! Interactive control of the query window.
//!
//! The window is either *live* (a fixed span that always ends at the moment
//! of the fetch) or *pinned* to explicit bounds after the user pans back in
//! time. Shifting forward past "now" snaps back to live.

use sirona_types::{now_millis, TimeWindow, DAY_MS};

/// Smallest span zooming in will produce.
pub const MIN_SPAN_MS: i64 = 60 * 1000;

/// Largest span zooming out will produce.
pub const MAX_SPAN_MS: i64 = 30 * DAY_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowControl {
    /// The last `span_ms` milliseconds, recomputed at every fetch.
    Live { span_ms: i64 },
    /// Explicit bounds.
    Pinned(TimeWindow),
}

impl Default for WindowControl {
    fn default() -> Self {
        WindowControl::Live { span_ms: DAY_MS }
    }
}

impl WindowControl {
    pub fn live(span_ms: i64) -> Self {
        WindowControl::Live {
            span_ms: clamp_span(span_ms),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, WindowControl::Live { .. })
    }

    pub fn span_ms(&self) -> i64 {
        match self {
            WindowControl::Live { span_ms } => *span_ms,
            WindowControl::Pinned(window) => window.span_ms(),
        }
    }

    /// The concrete window for a fetch happening at `now`.
    pub fn resolve_at(&self, now: i64) -> TimeWindow {
        match self {
            WindowControl::Live { span_ms } => TimeWindow::ending_at(now, *span_ms),
            WindowControl::Pinned(window) => *window,
        }
    }

    pub fn resolve(&self) -> TimeWindow {
        self.resolve_at(now_millis())
    }

    /// Move by half a span; `forward` moves toward now.
    pub fn shift_at(self, forward: bool, now: i64) -> Self {
        let current = self.resolve_at(now);
        let half = current.span_ms() / 2;
        if forward {
            if self.is_live() {
                return self;
            }
            let moved = current.shift(half);
            if moved.end >= now {
                WindowControl::Live {
                    span_ms: current.span_ms(),
                }
            } else {
                WindowControl::Pinned(moved)
            }
        } else {
            WindowControl::Pinned(current.shift(-half))
        }
    }

    pub fn shift(self, forward: bool) -> Self {
        self.shift_at(forward, now_millis())
    }

    /// Halve (`zoom_in`) or double the span, keeping the end bound.
    pub fn zoom(self, zoom_in: bool) -> Self {
        let span = self.span_ms();
        let span = clamp_span(if zoom_in { span / 2 } else { span.saturating_mul(2) });
        match self {
            WindowControl::Live { .. } => WindowControl::Live { span_ms: span },
            WindowControl::Pinned(window) => WindowControl::Pinned(window.with_span(span)),
        }
    }

    /// Back to live, keeping the span.
    pub fn snap_to_now(self) -> Self {
        WindowControl::Live {
            span_ms: self.span_ms(),
        }
    }
}

fn clamp_span(span_ms: i64) -> i64 {
    span_ms.clamp(MIN_SPAN_MS, MAX_SPAN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_default_is_last_day() {
        let window = WindowControl::default().resolve_at(NOW);
        assert_eq!(window, TimeWindow::new(NOW - DAY_MS, NOW));
    }

    #[test]
    fn test_shift_back_then_forward_returns_to_live() {
        let live = WindowControl::live(4 * 3600 * 1000);
        let back = live.shift_at(false, NOW);
        assert_eq!(
            back,
            WindowControl::Pinned(TimeWindow::new(NOW - 6 * 3600 * 1000, NOW - 2 * 3600 * 1000))
        );

        let forward = back.shift_at(true, NOW);
        assert_eq!(forward, WindowControl::live(4 * 3600 * 1000));
    }

    #[test]
    fn test_shift_forward_while_live_is_noop() {
        let live = WindowControl::default();
        assert_eq!(live.shift_at(true, NOW), live);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut control = WindowControl::live(2 * MIN_SPAN_MS);
        control = control.zoom(true);
        assert_eq!(control.span_ms(), MIN_SPAN_MS);
        control = control.zoom(true);
        assert_eq!(control.span_ms(), MIN_SPAN_MS);

        let wide = WindowControl::live(MAX_SPAN_MS).zoom(false);
        assert_eq!(wide.span_ms(), MAX_SPAN_MS);
    }

    #[test]
    fn test_zoom_pinned_keeps_end() {
        let pinned = WindowControl::Pinned(TimeWindow::new(NOW - 1000 - DAY_MS, NOW - 1000));
        let zoomed = pinned.zoom(true);
        assert_eq!(
            zoomed,
            WindowControl::Pinned(TimeWindow::new(NOW - 1000 - DAY_MS / 2, NOW - 1000))
        );
        assert!(zoomed.snap_to_now().is_live());
    }
}
