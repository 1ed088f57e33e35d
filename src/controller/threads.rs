use std::sync::Arc;

use async_trait::async_trait;
use sirona_client::ReportingApi;
use sirona_types::TimeWindow;

use super::{Controller, Panel, PanelData, PanelResult};
use crate::route::Route;

/// Thread list, and the dump of one thread when selected.
#[derive(Debug, Clone)]
pub struct ThreadsController {
    api: Arc<dyn ReportingApi>,
    thread: Option<String>,
}

impl ThreadsController {
    pub fn new(api: Arc<dyn ReportingApi>, thread: Option<String>) -> Self {
        Self { api, thread }
    }
}

#[async_trait]
impl Controller for ThreadsController {
    fn route(&self) -> Route {
        Route::Threads(self.thread.clone())
    }

    async fn refresh(&self, _window: TimeWindow) -> Vec<PanelResult> {
        let list = async { (Panel::Threads, self.api.threads().await.map(PanelData::Threads)) };
        let Some(thread) = &self.thread else {
            return vec![list.await];
        };
        let dump = async {
            (
                Panel::ThreadDump,
                self.api.thread(thread).await.map(PanelData::ThreadDump),
            )
        };
        let (list, dump) = tokio::join!(list, dump);
        vec![list, dump]
    }
}
