use std::sync::Arc;

use async_trait::async_trait;
use sirona_client::ReportingApi;
use sirona_types::{Series, TimeWindow};

use super::{Controller, Panel, PanelData, PanelResult};
use crate::route::Route;

/// Active session counts, one series per web application.
#[derive(Debug, Clone)]
pub struct SessionsController {
    api: Arc<dyn ReportingApi>,
}

impl SessionsController {
    pub fn new(api: Arc<dyn ReportingApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Controller for SessionsController {
    fn route(&self) -> Route {
        Route::Sessions
    }

    fn is_live(&self) -> bool {
        true
    }

    async fn refresh(&self, window: TimeWindow) -> Vec<PanelResult> {
        let sessions = self.api.sessions(window).await.map(|graphs| {
            PanelData::Sessions(
                graphs
                    .into_iter()
                    .map(|graph| Series::from_graph(Some(graph)))
                    .collect(),
            )
        });
        vec![(Panel::Sessions, sessions)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake::FakeApi;
    use sirona_types::{Graph, Samples};

    #[tokio::test]
    async fn test_one_series_per_application() {
        let fake = Arc::new(FakeApi::new());
        fake.sessions.lock().unwrap().extend([
            Graph {
                label: "/shop".into(),
                color: None,
                data: Some([("10", 2.0), ("20", 3.0)].into_iter().collect::<Samples>()),
            },
            Graph {
                label: "/admin".into(),
                color: None,
                data: None,
            },
        ]);

        let results = SessionsController::new(fake)
            .refresh(TimeWindow::new(0, 100))
            .await;
        match &results[0] {
            (Panel::Sessions, Ok(PanelData::Sessions(series))) => {
                assert_eq!(series.len(), 2);
                assert_eq!(series[0].label, "/shop");
                assert_eq!(series[0].len(), 2);
                assert!(series[1].is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
