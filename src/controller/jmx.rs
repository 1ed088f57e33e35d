use std::sync::Arc;

use async_trait::async_trait;
use sirona_client::{ClientError, ReportingApi};
use sirona_types::{JmxInvocationRequest, JmxInvocationResult, TimeWindow};

use super::{Controller, Panel, PanelData, PanelResult};
use crate::route::Route;

/// MBean tree, detail of the selected MBean, and operation invocation.
///
/// The tree and the detail are fetched as two independent requests; one
/// failing leaves the other intact.
#[derive(Debug, Clone)]
pub struct JmxController {
    api: Arc<dyn ReportingApi>,
    mbean: Option<String>,
}

impl JmxController {
    pub fn new(api: Arc<dyn ReportingApi>, mbean: Option<String>) -> Self {
        Self { api, mbean }
    }

    /// Invoke `operation` on the MBean `encoded` with textual `parameters`.
    ///
    /// A fault raised by the operation comes back as the result's error
    /// message, untouched.
    pub async fn invoke(
        &self,
        encoded: &str,
        operation: &str,
        parameters: Vec<String>,
    ) -> Result<JmxInvocationResult, ClientError> {
        let request = JmxInvocationRequest {
            mbean_encoded_name: encoded.to_string(),
            operation_name: operation.to_string(),
            parameters,
        };
        tracing::info!(mbean = %encoded, operation, "invoking MBean operation");
        self.api.invoke(&request).await
    }
}

#[async_trait]
impl Controller for JmxController {
    fn route(&self) -> Route {
        Route::Jmx(self.mbean.clone())
    }

    async fn refresh(&self, _window: TimeWindow) -> Vec<PanelResult> {
        let tree = async { (Panel::JmxTree, self.api.jmx_tree().await.map(PanelData::JmxTree)) };
        let Some(mbean) = &self.mbean else {
            return vec![tree.await];
        };
        let detail = async { (Panel::MBean, self.api.mbean(mbean).await.map(PanelData::MBean)) };
        let (tree, detail) = tokio::join!(tree, detail);
        vec![tree, detail]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake::FakeApi;
    use sirona_types::{JmxNode, MBeanInformations};

    #[tokio::test]
    async fn test_load_fetches_tree_and_detail_once_each() {
        let fake = Arc::new(FakeApi::new());
        *fake.tree.lock().unwrap() = Some(JmxNode {
            name: "/".into(),
            ..Default::default()
        });
        fake.mbeans.lock().unwrap().insert(
            "bWVt".into(),
            MBeanInformations {
                object_name: "java.lang:type=Memory".into(),
                ..Default::default()
            },
        );

        let controller = JmxController::new(fake.clone(), Some("bWVt".into()));
        let results = controller.refresh(TimeWindow::new(0, 1)).await;

        assert_eq!(fake.call_count("jmx_tree"), 1);
        assert_eq!(fake.call_count("mbean"), 1);
        assert_eq!(fake.calls().len(), 2);
        match &results[1] {
            (Panel::MBean, Ok(PanelData::MBean(Some(info)))) => {
                assert_eq!(info.object_name, "java.lang:type=Memory")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invoke_returns_fault_verbatim() {
        let fake = Arc::new(FakeApi::new());
        *fake.invocation.lock().unwrap() =
            JmxInvocationResult::fault("java.lang.NumberFormatException: For input string: \"x\"");

        let controller = JmxController::new(fake.clone(), Some("bWVt".into()));
        let result = controller
            .invoke("bWVt", "setSize", vec!["x".into()])
            .await
            .unwrap();

        assert!(result.is_fault());
        assert_eq!(
            result.lines(),
            vec!["java.lang.NumberFormatException: For input string: \"x\""]
        );
        let sent = fake.invocations.lock().unwrap().clone();
        assert_eq!(sent[0].mbean_encoded_name, "bWVt");
        assert_eq!(sent[0].parameters, vec!["x"]);
    }
}
