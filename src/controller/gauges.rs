use std::sync::Arc;

use async_trait::async_trait;
use sirona_client::ReportingApi;
use sirona_types::{Series, TimeWindow};

use super::{Controller, Panel, PanelData, PanelResult};
use crate::route::Route;

/// Gauge list, and the series of one gauge when selected.
#[derive(Debug, Clone)]
pub struct GaugesController {
    api: Arc<dyn ReportingApi>,
    gauge: Option<String>,
}

impl GaugesController {
    pub fn new(api: Arc<dyn ReportingApi>, gauge: Option<String>) -> Self {
        Self { api, gauge }
    }
}

#[async_trait]
impl Controller for GaugesController {
    fn route(&self) -> Route {
        Route::Gauges(self.gauge.clone())
    }

    /// A selected gauge is charted live.
    fn is_live(&self) -> bool {
        self.gauge.is_some()
    }

    async fn refresh(&self, window: TimeWindow) -> Vec<PanelResult> {
        let list = async { (Panel::Gauges, self.api.gauges().await.map(PanelData::Gauges)) };
        let Some(gauge) = &self.gauge else {
            return vec![list.await];
        };
        let series = async {
            let result = self.api.gauge(gauge, window).await.map(|result| {
                let mut series = Series::from_gauge(result);
                if series.label.is_empty() {
                    series.label = gauge.clone();
                }
                PanelData::Series(series)
            });
            (Panel::Gauge, result)
        };
        let (list, series) = tokio::join!(list, series);
        vec![list, series]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake::FakeApi;
    use sirona_types::{GaugeResult, GaugeValue};

    #[tokio::test]
    async fn test_gauge_list_is_not_live() {
        let controller = GaugesController::new(Arc::new(FakeApi::new()), None);
        assert!(!controller.is_live());
        assert_eq!(controller.refresh(TimeWindow::new(0, 1)).await.len(), 1);
    }

    #[tokio::test]
    async fn test_selected_gauge_series() {
        let fake = Arc::new(FakeApi::new());
        fake.gauge_results.lock().unwrap().insert(
            "cpu".into(),
            GaugeResult {
                gauge_name: "CPU".into(),
                gauge_values: Some(vec![
                    GaugeValue {
                        timestamp: 5,
                        value: 0.25,
                    },
                    GaugeValue {
                        timestamp: 10,
                        value: 0.5,
                    },
                ]),
            },
        );
        let controller = GaugesController::new(fake.clone(), Some("cpu".into()));
        assert!(controller.is_live());

        let results = controller.refresh(TimeWindow::new(0, 100)).await;
        match &results[1] {
            (Panel::Gauge, Ok(PanelData::Series(series))) => {
                assert_eq!(series.label, "CPU");
                assert_eq!(series.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(*fake.windows.lock().unwrap(), vec![TimeWindow::new(0, 100)]);
    }

    #[tokio::test]
    async fn test_unknown_gauge_is_empty_series() {
        let controller = GaugesController::new(Arc::new(FakeApi::new()), Some("nope".into()));
        let results = controller.refresh(TimeWindow::new(0, 1)).await;
        match &results[1] {
            (Panel::Gauge, Ok(PanelData::Series(series))) => {
                assert!(series.is_empty());
                assert_eq!(series.label, "nope");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
