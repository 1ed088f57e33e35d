use std::sync::Arc;

use async_trait::async_trait;
use sirona_client::ReportingApi;
use sirona_types::TimeWindow;

use super::{Controller, Panel, PanelData, PanelResult};
use crate::route::Route;

/// Landing page: host environment and the overall node statuses.
#[derive(Debug, Clone)]
pub struct HomeController {
    api: Arc<dyn ReportingApi>,
}

impl HomeController {
    pub fn new(api: Arc<dyn ReportingApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Controller for HomeController {
    fn route(&self) -> Route {
        Route::Home
    }

    async fn refresh(&self, _window: TimeWindow) -> Vec<PanelResult> {
        let (os, memory, statuses) = tokio::join!(
            self.api.os_info(),
            self.api.memory_info(),
            self.api.statuses()
        );
        vec![
            (Panel::Os, os.map(PanelData::Os)),
            (Panel::Memory, memory.map(PanelData::Memory)),
            (Panel::Statuses, statuses.map(PanelData::Statuses)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake::FakeApi;

    #[tokio::test]
    async fn test_home_fetches_environment_and_statuses() {
        let fake = Arc::new(FakeApi::new());
        fake.os.lock().unwrap().name = "Linux".into();
        let controller = HomeController::new(fake.clone());

        let results = controller.refresh(TimeWindow::new(0, 1)).await;
        assert_eq!(results.len(), 3);
        match &results[0] {
            (Panel::Os, Ok(PanelData::Os(os))) => assert_eq!(os.name, "Linux"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(fake.call_count("statuses"), 1);
        assert!(!controller.is_live());
    }
}
