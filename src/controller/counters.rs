use std::sync::Arc;

use async_trait::async_trait;
use sirona_client::ReportingApi;
use sirona_types::TimeWindow;

use super::{Controller, Panel, PanelData, PanelResult};
use crate::route::Route;

/// The counters report, optionally converted to a time unit server-side.
#[derive(Debug, Clone)]
pub struct CountersController {
    api: Arc<dyn ReportingApi>,
    unit: Option<String>,
}

impl CountersController {
    pub fn new(api: Arc<dyn ReportingApi>, unit: Option<String>) -> Self {
        Self { api, unit }
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }
}

#[async_trait]
impl Controller for CountersController {
    fn route(&self) -> Route {
        Route::Report
    }

    async fn refresh(&self, _window: TimeWindow) -> Vec<PanelResult> {
        let counters = self.api.counters(self.unit()).await;
        vec![(Panel::Counters, counters.map(PanelData::Counters))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake::FakeApi;
    use sirona_types::CounterRow;

    #[tokio::test]
    async fn test_counters_with_unit() {
        let fake = Arc::new(FakeApi::new());
        fake.counters.lock().unwrap().push(CounterRow {
            name: "OrderService.place".into(),
            hits: 3.0,
            ..Default::default()
        });

        let controller = CountersController::new(fake.clone(), Some("ms".into()));
        let results = controller.refresh(TimeWindow::new(0, 1)).await;

        assert_eq!(fake.calls(), vec!["counters:ms"]);
        match &results[0] {
            (Panel::Counters, Ok(PanelData::Counters(rows))) => assert_eq!(rows.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
    }
}
