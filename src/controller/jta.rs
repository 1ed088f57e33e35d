use std::sync::Arc;

use async_trait::async_trait;
use sirona_client::{GraphReport, ReportingApi};
use sirona_types::TimeWindow;

use super::{graph_result, Controller, PanelResult};
use crate::route::Route;

pub const JTA_REPORTS: [GraphReport; 3] = [
    GraphReport::JtaCommits,
    GraphReport::JtaRollbacks,
    GraphReport::JtaActives,
];

/// Transaction commit, rollback and active counts over time.
#[derive(Debug, Clone)]
pub struct JtaController {
    api: Arc<dyn ReportingApi>,
}

impl JtaController {
    pub fn new(api: Arc<dyn ReportingApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Controller for JtaController {
    fn route(&self) -> Route {
        Route::Jta
    }

    fn is_live(&self) -> bool {
        true
    }

    async fn refresh(&self, window: TimeWindow) -> Vec<PanelResult> {
        let (commits, rollbacks, actives) = tokio::join!(
            self.api.jta_commits(window),
            self.api.jta_rollbacks(window),
            self.api.jta_actives(window)
        );
        vec![
            graph_result(GraphReport::JtaCommits, commits),
            graph_result(GraphReport::JtaRollbacks, rollbacks),
            graph_result(GraphReport::JtaActives, actives),
        ]
    }
}
