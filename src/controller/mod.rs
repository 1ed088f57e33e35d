//! View-models, one per page.
//!
//! A controller knows which reports its page shows and how to fetch them.
//! It holds no display state: [`Controller::refresh`] fetches every panel
//! concurrently and hands back one result per panel, which
//! [`PageState`](crate::refresh::PageState) merges.
//!
//! ```
//! use std::sync::Arc;
//! use sirona_client::SironaClient;
//! use sirona_console::controller::{Controller, JvmController};
//!
//! let api = Arc::new(SironaClient::builder().build().unwrap());
//! let jvm = JvmController::new(api);
//! assert!(jvm.is_live());
//! ```

use std::fmt::Debug;

use async_trait::async_trait;
use sirona_client::{ClientError, GraphReport};
use sirona_types::{
    ApplicationStatuses, CounterRow, GaugeInfo, JmxNode, MBeanInformations, MemoryInfo,
    NodeStatusInfo, OsInfo, Series, ThreadDump, ThreadInfo, TimeWindow,
};

use crate::route::Route;

mod counters;
mod gauges;
mod home;
mod jmx;
mod jta;
mod jvm;
mod sessions;
mod status;
mod threads;

#[cfg(test)]
pub(crate) mod fake;

pub use counters::CountersController;
pub use gauges::GaugesController;
pub use home::HomeController;
pub use jmx::JmxController;
pub use jta::{JtaController, JTA_REPORTS};
pub use jvm::{JvmController, JVM_REPORTS};
pub use sessions::SessionsController;
pub use status::StatusController;
pub use threads::ThreadsController;

/// One independently fetched piece of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Panel {
    Os,
    Memory,
    Statuses,
    Graph(GraphReport),
    Threads,
    ThreadDump,
    Counters,
    Gauges,
    Gauge,
    NodeStatus,
    JmxTree,
    MBean,
    Sessions,
}

impl Panel {
    pub fn title(&self) -> &'static str {
        match self {
            Panel::Os => "Operating System",
            Panel::Memory => "Memory",
            Panel::Statuses => "Statuses",
            Panel::Graph(report) => report.title(),
            Panel::Threads => "Threads",
            Panel::ThreadDump => "Thread Dump",
            Panel::Counters => "Counters",
            Panel::Gauges => "Gauges",
            Panel::Gauge => "Gauge",
            Panel::NodeStatus => "Node Status",
            Panel::JmxTree => "MBeans",
            Panel::MBean => "MBean",
            Panel::Sessions => "Sessions",
        }
    }
}

/// Fetched content of a panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelData {
    Os(OsInfo),
    Memory(MemoryInfo),
    Statuses(Vec<ApplicationStatuses>),
    Series(Series),
    Threads(Vec<ThreadInfo>),
    ThreadDump(Option<ThreadDump>),
    Counters(Vec<CounterRow>),
    Gauges(Vec<GaugeInfo>),
    NodeStatus(Option<NodeStatusInfo>),
    JmxTree(Option<JmxNode>),
    MBean(Option<MBeanInformations>),
    Sessions(Vec<Series>),
}

pub type PanelResult = (Panel, Result<PanelData, ClientError>);

/// Fetch logic of a page.
#[async_trait]
pub trait Controller: Send + Sync + Debug {
    /// The route this controller serves.
    fn route(&self) -> Route;

    /// Live pages poll on a timer; the others load once and on demand.
    fn is_live(&self) -> bool {
        false
    }

    /// Fetch every panel of the page for `window`.
    async fn refresh(&self, window: TimeWindow) -> Vec<PanelResult>;
}

/// Map a time-series fetch into a panel result, `None` becoming an empty
/// series titled after the report.
pub(crate) fn graph_result(
    report: GraphReport,
    result: Result<Option<sirona_types::Graph>, ClientError>,
) -> PanelResult {
    let data = result.map(|graph| {
        let mut series = Series::from_graph(graph);
        if series.label.is_empty() {
            series.label = report.title().to_string();
        }
        PanelData::Series(series)
    });
    (Panel::Graph(report), data)
}
