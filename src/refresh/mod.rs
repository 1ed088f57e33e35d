//! Fetching page data and merging it into displayable state.
//!
//! Every fetch takes a number from a [`RequestSequence`]. A page only
//! accepts the outcome of the most recently dispatched fetch, so a slow
//! response can never overwrite a newer one, whichever arrives last.
//!
//! ```text
//!  RefreshLoop task ──(seq, results)──▶ mpsc ──▶ App::tick ──▶ PageState::apply
//!        ▲                                                        │
//!        └────────── watch<WindowControl> ◀── key handlers        ▼
//!                                                              render
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use sirona_types::{
    ApplicationStatuses, CounterRow, GaugeInfo, JmxNode, MBeanInformations, MemoryInfo,
    NodeStatusInfo, OsInfo, Series, ThreadDump, ThreadInfo, TimeWindow,
};

use crate::controller::{Panel, PanelData, PanelResult};
use crate::route::Route;

mod poller;

pub use poller::RefreshLoop;

/// Monotonic numbering of dispatched fetches, shared by polling and
/// manual refreshes of one page.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence(Arc<AtomicU64>);

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next number. The first is 1.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The most recently taken number, 0 before any.
    pub fn latest(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything one fetch produced.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub seq: u64,
    pub route: Route,
    pub window: TimeWindow,
    pub results: Vec<PanelResult>,
}

/// Displayable state of the current page.
///
/// A panel whose fetch fails keeps the value from its last successful
/// fetch; the failure is logged and shown in the status bar.
#[derive(Debug)]
pub struct PageState {
    route: Route,
    sequence: RequestSequence,
    applied: u64,
    panels: BTreeMap<Panel, PanelData>,
    errors: BTreeMap<Panel, String>,
    /// Window of the last applied fetch.
    pub window: Option<TimeWindow>,
    pub last_update: Option<Instant>,
    pub last_error: Option<String>,
}

impl PageState {
    pub fn new(route: Route, sequence: RequestSequence) -> Self {
        Self {
            route,
            sequence,
            applied: 0,
            panels: BTreeMap::new(),
            errors: BTreeMap::new(),
            window: None,
            last_update: None,
            last_error: None,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn sequence(&self) -> &RequestSequence {
        &self.sequence
    }

    /// Whether any fetch has been applied yet.
    pub fn is_loaded(&self) -> bool {
        self.applied > 0
    }

    /// Sequence number of the last applied fetch, 0 before any.
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Merge an outcome. Returns `false` if it was discarded as stale.
    pub fn apply(&mut self, outcome: RefreshOutcome) -> bool {
        if outcome.route != self.route {
            tracing::debug!(route = %outcome.route, "discarding outcome for another page");
            return false;
        }
        if outcome.seq < self.sequence.latest() || outcome.seq <= self.applied {
            tracing::debug!(
                seq = outcome.seq,
                latest = self.sequence.latest(),
                "discarding stale outcome"
            );
            return false;
        }

        self.applied = outcome.seq;
        self.window = Some(outcome.window);
        self.last_update = Some(Instant::now());

        let mut failure = None;
        for (panel, result) in outcome.results {
            match result {
                Ok(data) => {
                    self.panels.insert(panel, data);
                    self.errors.remove(&panel);
                }
                Err(e) => {
                    tracing::warn!(route = %self.route, ?panel, error = %e, "panel refresh failed");
                    let message = e.to_string();
                    failure.get_or_insert_with(|| format!("{}: {}", panel.title(), message));
                    self.errors.insert(panel, message);
                }
            }
        }
        self.last_error = failure;
        true
    }

    pub fn data(&self, panel: Panel) -> Option<&PanelData> {
        self.panels.get(&panel)
    }

    pub fn error(&self, panel: Panel) -> Option<&str> {
        self.errors.get(&panel).map(String::as_str)
    }

    pub fn series(&self, panel: Panel) -> Option<&Series> {
        match self.data(panel)? {
            PanelData::Series(series) => Some(series),
            _ => None,
        }
    }

    pub fn os(&self) -> Option<&OsInfo> {
        match self.data(Panel::Os)? {
            PanelData::Os(os) => Some(os),
            _ => None,
        }
    }

    pub fn memory(&self) -> Option<&MemoryInfo> {
        match self.data(Panel::Memory)? {
            PanelData::Memory(memory) => Some(memory),
            _ => None,
        }
    }

    pub fn statuses(&self) -> &[ApplicationStatuses] {
        match self.data(Panel::Statuses) {
            Some(PanelData::Statuses(statuses)) => statuses,
            _ => &[],
        }
    }

    pub fn threads(&self) -> &[ThreadInfo] {
        match self.data(Panel::Threads) {
            Some(PanelData::Threads(threads)) => threads,
            _ => &[],
        }
    }

    pub fn thread_dump(&self) -> Option<&ThreadDump> {
        match self.data(Panel::ThreadDump)? {
            PanelData::ThreadDump(dump) => dump.as_ref(),
            _ => None,
        }
    }

    pub fn counters(&self) -> &[CounterRow] {
        match self.data(Panel::Counters) {
            Some(PanelData::Counters(rows)) => rows,
            _ => &[],
        }
    }

    pub fn gauges(&self) -> &[GaugeInfo] {
        match self.data(Panel::Gauges) {
            Some(PanelData::Gauges(gauges)) => gauges,
            _ => &[],
        }
    }

    pub fn node_status(&self) -> Option<&NodeStatusInfo> {
        match self.data(Panel::NodeStatus)? {
            PanelData::NodeStatus(node) => node.as_ref(),
            _ => None,
        }
    }

    pub fn jmx_tree(&self) -> Option<&JmxNode> {
        match self.data(Panel::JmxTree)? {
            PanelData::JmxTree(tree) => tree.as_ref(),
            _ => None,
        }
    }

    pub fn mbean(&self) -> Option<&MBeanInformations> {
        match self.data(Panel::MBean)? {
            PanelData::MBean(info) => info.as_ref(),
            _ => None,
        }
    }

    pub fn sessions(&self) -> &[Series] {
        match self.data(Panel::Sessions) {
            Some(PanelData::Sessions(series)) => series,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sirona_client::{ClientError, GraphReport};
    use sirona_types::TimeSeriesPoint;

    const CPU: Panel = Panel::Graph(GraphReport::Cpu);

    fn cpu_outcome(seq: u64, value: f64) -> RefreshOutcome {
        RefreshOutcome {
            seq,
            route: Route::Jvm,
            window: TimeWindow::new(0, 10),
            results: vec![(
                CPU,
                Ok(PanelData::Series(Series {
                    label: "CPU".into(),
                    points: vec![TimeSeriesPoint::new(1, value)],
                })),
            )],
        }
    }

    fn failed_outcome(seq: u64) -> RefreshOutcome {
        RefreshOutcome {
            seq,
            route: Route::Jvm,
            window: TimeWindow::new(0, 10),
            results: vec![(CPU, Err(ClientError::Timeout))],
        }
    }

    #[test]
    fn test_sequence_is_monotonic_and_shared() {
        let sequence = RequestSequence::new();
        let clone = sequence.clone();
        assert_eq!(sequence.latest(), 0);
        assert_eq!(sequence.next(), 1);
        assert_eq!(clone.next(), 2);
        assert_eq!(sequence.latest(), 2);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_values() {
        let sequence = RequestSequence::new();
        let mut state = PageState::new(Route::Jvm, sequence.clone());

        sequence.next();
        assert!(state.apply(cpu_outcome(1, 0.5)));
        assert_eq!(state.series(CPU).unwrap().last_value(), Some(0.5));

        sequence.next();
        assert!(state.apply(failed_outcome(2)));
        assert_eq!(state.series(CPU).unwrap().last_value(), Some(0.5));
        assert_eq!(state.error(CPU), Some("Request timed out"));
        assert_eq!(
            state.last_error.as_deref(),
            Some("CPU Usage: Request timed out")
        );

        sequence.next();
        assert!(state.apply(cpu_outcome(3, 0.7)));
        assert_eq!(state.error(CPU), None);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_older_outcome_is_discarded() {
        let sequence = RequestSequence::new();
        let mut state = PageState::new(Route::Jvm, sequence.clone());

        // A poll (1) is overtaken by a manual refresh (2)
        let poll = sequence.next();
        let manual = sequence.next();

        assert!(state.apply(cpu_outcome(manual, 0.9)));
        assert!(!state.apply(cpu_outcome(poll, 0.1)));
        assert_eq!(state.series(CPU).unwrap().last_value(), Some(0.9));

        // Even when the older one lands first
        let mut state = PageState::new(Route::Jvm, sequence.clone());
        let poll = sequence.next();
        let manual = sequence.next();
        assert!(!state.apply(cpu_outcome(poll, 0.1)));
        assert!(state.apply(cpu_outcome(manual, 0.9)));
        assert!(state.is_loaded());
    }

    #[test]
    fn test_outcome_for_other_route_is_discarded() {
        let sequence = RequestSequence::new();
        let mut state = PageState::new(Route::Jta, sequence.clone());
        sequence.next();
        assert!(!state.apply(cpu_outcome(1, 0.5)));
        assert!(!state.is_loaded());
        assert!(state.series(CPU).is_none());
    }

    #[test]
    fn test_empty_accessors() {
        let state = PageState::new(Route::Home, RequestSequence::new());
        assert!(state.counters().is_empty());
        assert!(state.statuses().is_empty());
        assert!(state.os().is_none());
        assert!(state.jmx_tree().is_none());
        assert!(state.sessions().is_empty());
    }
}
