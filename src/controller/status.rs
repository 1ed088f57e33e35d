use std::sync::Arc;

use async_trait::async_trait;
use sirona_client::ReportingApi;
use sirona_types::TimeWindow;

use super::{Controller, Panel, PanelData, PanelResult};
use crate::route::Route;

/// Application statuses, and the validation details of one node.
#[derive(Debug, Clone)]
pub struct StatusController {
    api: Arc<dyn ReportingApi>,
    node: Option<String>,
}

impl StatusController {
    pub fn new(api: Arc<dyn ReportingApi>, node: Option<String>) -> Self {
        Self { api, node }
    }
}

#[async_trait]
impl Controller for StatusController {
    fn route(&self) -> Route {
        Route::Status(self.node.clone())
    }

    async fn refresh(&self, _window: TimeWindow) -> Vec<PanelResult> {
        let all = async {
            (
                Panel::Statuses,
                self.api.statuses().await.map(PanelData::Statuses),
            )
        };
        let Some(node) = &self.node else {
            return vec![all.await];
        };
        let detail = async {
            (
                Panel::NodeStatus,
                self.api.node_status(node).await.map(PanelData::NodeStatus),
            )
        };
        let (all, detail) = tokio::join!(all, detail);
        vec![all, detail]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake::FakeApi;
    use sirona_types::{NodeStatusInfo, Status};

    #[tokio::test]
    async fn test_node_status() {
        let fake = Arc::new(FakeApi::new());
        fake.nodes.lock().unwrap().insert(
            "node-1".into(),
            NodeStatusInfo {
                name: "node-1".into(),
                status: "KO".into(),
                ..Default::default()
            },
        );
        let controller = StatusController::new(fake.clone(), Some("node-1".into()));
        let results = controller.refresh(TimeWindow::new(0, 1)).await;

        assert_eq!(fake.call_count("statuses"), 1);
        assert_eq!(fake.call_count("node_status"), 1);
        match &results[1] {
            (Panel::NodeStatus, Ok(PanelData::NodeStatus(Some(node)))) => {
                assert_eq!(node.status(), Status::Ko)
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
