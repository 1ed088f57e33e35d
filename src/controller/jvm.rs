use std::sync::Arc;

use async_trait::async_trait;
use sirona_client::{GraphReport, ReportingApi};
use sirona_types::TimeWindow;

use super::{graph_result, Controller, Panel, PanelData, PanelResult};
use crate::route::Route;

/// Reports charted on the JVM page, in display order.
pub const JVM_REPORTS: [GraphReport; 4] = [
    GraphReport::Cpu,
    GraphReport::Memory,
    GraphReport::NonHeapMemory,
    GraphReport::ActiveThreads,
];

/// CPU, heap, non-heap and thread charts plus the host description.
#[derive(Debug, Clone)]
pub struct JvmController {
    api: Arc<dyn ReportingApi>,
}

impl JvmController {
    pub fn new(api: Arc<dyn ReportingApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Controller for JvmController {
    fn route(&self) -> Route {
        Route::Jvm
    }

    fn is_live(&self) -> bool {
        true
    }

    async fn refresh(&self, window: TimeWindow) -> Vec<PanelResult> {
        let (cpu, memory, non_heap, threads, os, memory_info) = tokio::join!(
            self.api.cpu(window),
            self.api.memory(window),
            self.api.non_heap_memory(window),
            self.api.active_threads(window),
            self.api.os_info(),
            self.api.memory_info()
        );
        vec![
            graph_result(GraphReport::Cpu, cpu),
            graph_result(GraphReport::Memory, memory),
            graph_result(GraphReport::NonHeapMemory, non_heap),
            graph_result(GraphReport::ActiveThreads, threads),
            (Panel::Os, os.map(PanelData::Os)),
            (Panel::Memory, memory_info.map(PanelData::Memory)),
        ]
    }
}
