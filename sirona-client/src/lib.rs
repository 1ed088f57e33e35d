//! # sirona-client
//!
//! Async access to the Sirona reporting REST API.
//!
//! The console never talks HTTP directly; it goes through the
//! [`ReportingApi`] trait so pages can be driven by any source of reports.
//! [`SironaClient`] is the real implementation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sirona_client::{GraphReport, ReportingApi, SironaClient};
//! use sirona_types::{Series, TimeWindow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SironaClient::builder().build()?;
//!
//!     let cpu = client.graph(GraphReport::Cpu, TimeWindow::last_day()).await?;
//!     let series = Series::from_graph(cpu);
//!     println!("{}: {} points", series.label, series.len());
//!     Ok(())
//! }
//! ```

use std::fmt::Debug;

use async_trait::async_trait;

use sirona_types::{
    ApplicationStatuses, CounterRow, GaugeInfo, GaugeResult, Graph, JmxInvocationRequest,
    JmxInvocationResult, JmxNode, MBeanInformations, MemoryInfo, NodeStatusInfo, OsInfo,
    ThreadDump, ThreadInfo, TimeWindow,
};

mod endpoint;
pub mod error;
mod http;

pub use endpoint::{Endpoint, GraphReport};
pub use error::ClientError;
pub use http::{SironaClient, SironaClientBuilder, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

/// Every report the console can ask for.
///
/// Methods returning `Option` map a `null` answer to `None`; list-valued
/// methods map it to an empty list.
#[async_trait]
pub trait ReportingApi: Send + Sync + Debug {
    /// Human-readable description of where reports come from.
    fn description(&self) -> String;

    /// One of the JVM or JTA time-series reports.
    async fn graph(
        &self,
        report: GraphReport,
        window: TimeWindow,
    ) -> Result<Option<Graph>, ClientError>;

    async fn os_info(&self) -> Result<OsInfo, ClientError>;

    async fn memory_info(&self) -> Result<MemoryInfo, ClientError>;

    async fn threads(&self) -> Result<Vec<ThreadInfo>, ClientError>;

    /// Dump of a single thread, addressed by its encoded name.
    async fn thread(&self, encoded_name: &str) -> Result<Option<ThreadDump>, ClientError>;

    /// Counters, optionally converted to `unit` server-side.
    async fn counters(&self, unit: Option<&str>) -> Result<Vec<CounterRow>, ClientError>;

    async fn gauges(&self) -> Result<Vec<GaugeInfo>, ClientError>;

    async fn gauge(
        &self,
        encoded_name: &str,
        window: TimeWindow,
    ) -> Result<Option<GaugeResult>, ClientError>;

    async fn statuses(&self) -> Result<Vec<ApplicationStatuses>, ClientError>;

    async fn node_status(&self, node: &str) -> Result<Option<NodeStatusInfo>, ClientError>;

    async fn jmx_tree(&self) -> Result<Option<JmxNode>, ClientError>;

    async fn mbean(&self, encoded_name: &str) -> Result<Option<MBeanInformations>, ClientError>;

    /// Invoke an MBean operation. A server-side fault is an `Ok` result
    /// carrying an error message; only transport failures are `Err`.
    async fn invoke(&self, request: &JmxInvocationRequest)
        -> Result<JmxInvocationResult, ClientError>;

    async fn sessions(&self, window: TimeWindow) -> Result<Vec<Graph>, ClientError>;

    async fn cpu(&self, window: TimeWindow) -> Result<Option<Graph>, ClientError> {
        self.graph(GraphReport::Cpu, window).await
    }

    async fn memory(&self, window: TimeWindow) -> Result<Option<Graph>, ClientError> {
        self.graph(GraphReport::Memory, window).await
    }

    async fn non_heap_memory(&self, window: TimeWindow) -> Result<Option<Graph>, ClientError> {
        self.graph(GraphReport::NonHeapMemory, window).await
    }

    async fn active_threads(&self, window: TimeWindow) -> Result<Option<Graph>, ClientError> {
        self.graph(GraphReport::ActiveThreads, window).await
    }

    async fn jta_commits(&self, window: TimeWindow) -> Result<Option<Graph>, ClientError> {
        self.graph(GraphReport::JtaCommits, window).await
    }

    async fn jta_rollbacks(&self, window: TimeWindow) -> Result<Option<Graph>, ClientError> {
        self.graph(GraphReport::JtaRollbacks, window).await
    }

    async fn jta_actives(&self, window: TimeWindow) -> Result<Option<Graph>, ClientError> {
        self.graph(GraphReport::JtaActives, window).await
    }
}
