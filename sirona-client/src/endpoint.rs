//! REST resources exposed by the reporting API.

use std::fmt;

use reqwest::Url;
use sirona_types::TimeWindow;

use crate::ClientError;

/// The time-series reports that answer with a `{label, data}` graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GraphReport {
    Cpu,
    Memory,
    NonHeapMemory,
    ActiveThreads,
    JtaCommits,
    JtaRollbacks,
    JtaActives,
}

impl GraphReport {
    /// Default chart title, used until the server's label is known.
    pub fn title(&self) -> &'static str {
        match self {
            GraphReport::Cpu => "CPU Usage",
            GraphReport::Memory => "Used Memory",
            GraphReport::NonHeapMemory => "Used Non Heap Memory",
            GraphReport::ActiveThreads => "Active Thread Count",
            GraphReport::JtaCommits => "Commits",
            GraphReport::JtaRollbacks => "Rollbacks",
            GraphReport::JtaActives => "Actives",
        }
    }

    fn segments(&self) -> [&'static str; 2] {
        match self {
            GraphReport::Cpu => ["jvmreports", "cpu"],
            GraphReport::Memory => ["jvmreports", "memory"],
            GraphReport::NonHeapMemory => ["jvmreports", "nonheapmemory"],
            GraphReport::ActiveThreads => ["jvmreports", "activethreads"],
            GraphReport::JtaCommits => ["jtareports", "commits"],
            GraphReport::JtaRollbacks => ["jtareports", "rollbacks"],
            GraphReport::JtaActives => ["jtareports", "actives"],
        }
    }
}

/// One REST resource, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Graph(GraphReport, TimeWindow),
    Os,
    MemoryInfo,
    Threads,
    Thread(String),
    Counters { unit: Option<String> },
    Gauges,
    Gauge(String, TimeWindow),
    Statuses,
    NodeStatus(String),
    JmxTree,
    MBean(String),
    /// `POST /jmx`
    Invoke,
    Sessions(TimeWindow),
}

impl Endpoint {
    /// Raw (unencoded) path segments below the API base.
    pub fn segments(&self) -> Vec<String> {
        fn window_segments(base: &[&str], window: &TimeWindow) -> Vec<String> {
            let mut out: Vec<String> = base.iter().map(|s| s.to_string()).collect();
            out.push(window.start.to_string());
            out.push(window.end.to_string());
            out
        }

        match self {
            Endpoint::Graph(report, window) => window_segments(&report.segments(), window),
            Endpoint::Os => vec!["environment".into(), "os".into()],
            Endpoint::MemoryInfo => vec!["environment".into(), "memory".into()],
            Endpoint::Threads => vec!["threads".into()],
            Endpoint::Thread(name) => vec!["threads".into(), name.clone()],
            Endpoint::Counters { .. } => vec!["counters".into()],
            Endpoint::Gauges => vec!["gauges".into()],
            Endpoint::Gauge(name, window) => window_segments(&["gauges", name], window),
            Endpoint::Statuses => vec!["status".into()],
            Endpoint::NodeStatus(node) => vec!["status".into(), node.clone()],
            Endpoint::JmxTree | Endpoint::Invoke => vec!["jmx".into()],
            Endpoint::MBean(encoded) => vec!["jmx".into(), encoded.clone()],
            Endpoint::Sessions(window) => window_segments(&["sessions"], window),
        }
    }

    /// Query parameters, if any.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Counters { unit: Some(unit) } => vec![("unit", unit.clone())],
            _ => Vec::new(),
        }
    }

    /// Resolve against the API base URL, percent-encoding each segment.
    pub fn url(&self, base: &Url) -> Result<Url, ClientError> {
        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidEndpoint(base.to_string()))?;
            path.pop_if_empty();
            path.extend(self.segments());
        }
        let query = self.query();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments().join("/"))?;
        for (i, (key, value)) in self.query().iter().enumerate() {
            write!(f, "{}{}={}", if i == 0 { '?' } else { '&' }, key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:8080/sirona/restServices/sironaServices").unwrap()
    }

    #[test]
    fn test_graph_paths() {
        let window = TimeWindow::new(100, 200);
        assert_eq!(
            Endpoint::Graph(GraphReport::Cpu, window).to_string(),
            "/jvmreports/cpu/100/200"
        );
        assert_eq!(
            Endpoint::Graph(GraphReport::NonHeapMemory, window).to_string(),
            "/jvmreports/nonheapmemory/100/200"
        );
        assert_eq!(
            Endpoint::Graph(GraphReport::JtaRollbacks, window).to_string(),
            "/jtareports/rollbacks/100/200"
        );
        assert_eq!(Endpoint::Sessions(window).to_string(), "/sessions/100/200");
    }

    #[test]
    fn test_counters_query() {
        assert_eq!(Endpoint::Counters { unit: None }.to_string(), "/counters");
        let url = Endpoint::Counters {
            unit: Some("ms".into()),
        }
        .url(&base())
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/sirona/restServices/sironaServices/counters?unit=ms"
        );
    }

    #[test]
    fn test_url_with_trailing_slash() {
        let base = Url::parse("http://host/api/").unwrap();
        let url = Endpoint::JmxTree.url(&base).unwrap();
        assert_eq!(url.as_str(), "http://host/api/jmx");
    }

    #[test]
    fn test_segments_are_encoded() {
        let window = TimeWindow::new(1, 2);
        let url = Endpoint::Gauge("sessions-/shop x".into(), window).url(&base()).unwrap();
        assert_eq!(
            url.path(),
            "/sirona/restServices/sironaServices/gauges/sessions-%2Fshop%20x/1/2"
        );
    }

    #[test]
    fn test_invalid_base() {
        let base = Url::parse("mailto:ops@example.com").unwrap();
        assert!(matches!(
            Endpoint::Statuses.url(&base),
            Err(ClientError::InvalidEndpoint(_))
        ));
    }
}
