//! In-memory [`ReportingApi`] for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use sirona_client::{ClientError, GraphReport, ReportingApi};
use sirona_types::{
    ApplicationStatuses, CounterRow, GaugeInfo, GaugeResult, Graph, JmxInvocationRequest,
    JmxInvocationResult, JmxNode, MBeanInformations, MemoryInfo, NodeStatusInfo, OsInfo, Samples,
    ThreadDump, ThreadInfo, TimeWindow,
};

#[derive(Debug, Default)]
pub struct FakeApi {
    pub graphs: Mutex<HashMap<GraphReport, Graph>>,
    pub os: Mutex<OsInfo>,
    pub memory: Mutex<MemoryInfo>,
    pub threads: Mutex<Vec<ThreadInfo>>,
    pub dumps: Mutex<HashMap<String, ThreadDump>>,
    pub counters: Mutex<Vec<CounterRow>>,
    pub gauges: Mutex<Vec<GaugeInfo>>,
    pub gauge_results: Mutex<HashMap<String, GaugeResult>>,
    pub statuses: Mutex<Vec<ApplicationStatuses>>,
    pub nodes: Mutex<HashMap<String, NodeStatusInfo>>,
    pub tree: Mutex<Option<JmxNode>>,
    pub mbeans: Mutex<HashMap<String, MBeanInformations>>,
    pub invocation: Mutex<JmxInvocationResult>,
    pub sessions: Mutex<Vec<Graph>>,
    /// Every call, as `method` or `method:argument`.
    pub calls: Mutex<Vec<String>>,
    /// Requests received by `invoke`.
    pub invocations: Mutex<Vec<JmxInvocationRequest>>,
    /// Windows received by time-series calls.
    pub windows: Mutex<Vec<TimeWindow>>,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with a connection error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delay every following call.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn with_graph(self, report: GraphReport, label: &str, points: &[(&str, f64)]) -> Self {
        let data: Samples = points.iter().map(|(k, v)| (*k, *v)).collect();
        self.graphs.lock().unwrap().insert(
            report,
            Graph {
                label: label.to_string(),
                color: None,
                data: Some(data),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == method || c.starts_with(&format!("{method}:")))
            .count()
    }

    async fn enter(&self, call: String) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::Connection("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReportingApi for FakeApi {
    fn description(&self) -> String {
        "fake".to_string()
    }

    async fn graph(
        &self,
        report: GraphReport,
        window: TimeWindow,
    ) -> Result<Option<Graph>, ClientError> {
        self.enter(format!("graph:{report:?}")).await?;
        self.windows.lock().unwrap().push(window);
        Ok(self.graphs.lock().unwrap().get(&report).cloned())
    }

    async fn os_info(&self) -> Result<OsInfo, ClientError> {
        self.enter("os_info".into()).await?;
        Ok(self.os.lock().unwrap().clone())
    }

    async fn memory_info(&self) -> Result<MemoryInfo, ClientError> {
        self.enter("memory_info".into()).await?;
        Ok(self.memory.lock().unwrap().clone())
    }

    async fn threads(&self) -> Result<Vec<ThreadInfo>, ClientError> {
        self.enter("threads".into()).await?;
        Ok(self.threads.lock().unwrap().clone())
    }

    async fn thread(&self, encoded_name: &str) -> Result<Option<ThreadDump>, ClientError> {
        self.enter(format!("thread:{encoded_name}")).await?;
        Ok(self.dumps.lock().unwrap().get(encoded_name).cloned())
    }

    async fn counters(&self, unit: Option<&str>) -> Result<Vec<CounterRow>, ClientError> {
        self.enter(format!("counters:{}", unit.unwrap_or(""))).await?;
        Ok(self.counters.lock().unwrap().clone())
    }

    async fn gauges(&self) -> Result<Vec<GaugeInfo>, ClientError> {
        self.enter("gauges".into()).await?;
        Ok(self.gauges.lock().unwrap().clone())
    }

    async fn gauge(
        &self,
        encoded_name: &str,
        window: TimeWindow,
    ) -> Result<Option<GaugeResult>, ClientError> {
        self.enter(format!("gauge:{encoded_name}")).await?;
        self.windows.lock().unwrap().push(window);
        Ok(self.gauge_results.lock().unwrap().get(encoded_name).cloned())
    }

    async fn statuses(&self) -> Result<Vec<ApplicationStatuses>, ClientError> {
        self.enter("statuses".into()).await?;
        Ok(self.statuses.lock().unwrap().clone())
    }

    async fn node_status(&self, node: &str) -> Result<Option<NodeStatusInfo>, ClientError> {
        self.enter(format!("node_status:{node}")).await?;
        Ok(self.nodes.lock().unwrap().get(node).cloned())
    }

    async fn jmx_tree(&self) -> Result<Option<JmxNode>, ClientError> {
        self.enter("jmx_tree".into()).await?;
        Ok(self.tree.lock().unwrap().clone())
    }

    async fn mbean(&self, encoded_name: &str) -> Result<Option<MBeanInformations>, ClientError> {
        self.enter(format!("mbean:{encoded_name}")).await?;
        Ok(self.mbeans.lock().unwrap().get(encoded_name).cloned())
    }

    async fn invoke(
        &self,
        request: &JmxInvocationRequest,
    ) -> Result<JmxInvocationResult, ClientError> {
        self.enter(format!("invoke:{}", request.operation_name))
            .await?;
        self.invocations.lock().unwrap().push(request.clone());
        Ok(self.invocation.lock().unwrap().clone())
    }

    async fn sessions(&self, window: TimeWindow) -> Result<Vec<Graph>, ClientError> {
        self.enter("sessions".into()).await?;
        self.windows.lock().unwrap().push(window);
        Ok(self.sessions.lock().unwrap().clone())
    }
}
