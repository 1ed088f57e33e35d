//! HTTP implementation of [`ReportingApi`].
//!
//! Every resource is a plain `GET` returning JSON, except operation
//! invocation which `POST`s a [`JmxInvocationRequest`]. A `null` or empty
//! body is a legitimate answer (the server has nothing to report yet) and
//! maps to `None` or the type's default rather than to an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use sirona_client::{ReportingApi, SironaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SironaClient::builder()
//!         .endpoint("http://localhost:8080/sirona/restServices/sironaServices")
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     for counter in client.counters(None).await? {
//!         println!("{} {}", counter.name, counter.hits);
//!     }
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use sirona_types::{
    ApplicationStatuses, CounterRow, GaugeInfo, GaugeResult, Graph, JmxInvocationRequest,
    JmxInvocationResult, JmxNode, MBeanInformations, MemoryInfo, NodeStatusInfo, OsInfo,
    ThreadDump, ThreadInfo, TimeWindow,
};

use crate::{ClientError, Endpoint, GraphReport, ReportingApi};

/// Default base URL of the reporting services.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/sirona/restServices/sironaServices";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the reporting REST API.
#[derive(Debug, Clone)]
pub struct SironaClient {
    client: Client,
    base: Url,
}

impl SironaClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> SironaClientBuilder {
        SironaClientBuilder::default()
    }

    /// Base URL all resources are resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    async fn get_optional<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
    ) -> Result<Option<T>, ClientError> {
        let url = endpoint.url(&self.base)?;
        tracing::debug!(%endpoint, "GET");

        let response = self.client.get(url).send().await?;
        let body = check(response, &endpoint).await?;
        parse_body(&body)
    }

    async fn get<T: DeserializeOwned + Default>(&self, endpoint: Endpoint) -> Result<T, ClientError> {
        Ok(self.get_optional(endpoint).await?.unwrap_or_default())
    }
}

// Reject non-success statuses, then read the whole body.
async fn check(response: reqwest::Response, endpoint: &Endpoint) -> Result<String, ClientError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound(endpoint.to_string()));
    }
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            path: endpoint.to_string(),
        });
    }
    Ok(response.text().await?)
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<Option<T>, ClientError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str::<Option<T>>(body)?)
}

#[async_trait]
impl ReportingApi for SironaClient {
    fn description(&self) -> String {
        self.base.to_string()
    }

    async fn graph(
        &self,
        report: GraphReport,
        window: TimeWindow,
    ) -> Result<Option<Graph>, ClientError> {
        self.get_optional(Endpoint::Graph(report, window)).await
    }

    async fn os_info(&self) -> Result<OsInfo, ClientError> {
        self.get(Endpoint::Os).await
    }

    async fn memory_info(&self) -> Result<MemoryInfo, ClientError> {
        self.get(Endpoint::MemoryInfo).await
    }

    async fn threads(&self) -> Result<Vec<ThreadInfo>, ClientError> {
        self.get(Endpoint::Threads).await
    }

    async fn thread(&self, encoded_name: &str) -> Result<Option<ThreadDump>, ClientError> {
        self.get_optional(Endpoint::Thread(encoded_name.to_string()))
            .await
    }

    async fn counters(&self, unit: Option<&str>) -> Result<Vec<CounterRow>, ClientError> {
        self.get(Endpoint::Counters {
            unit: unit.map(str::to_string),
        })
        .await
    }

    async fn gauges(&self) -> Result<Vec<GaugeInfo>, ClientError> {
        self.get(Endpoint::Gauges).await
    }

    async fn gauge(
        &self,
        encoded_name: &str,
        window: TimeWindow,
    ) -> Result<Option<GaugeResult>, ClientError> {
        self.get_optional(Endpoint::Gauge(encoded_name.to_string(), window))
            .await
    }

    async fn statuses(&self) -> Result<Vec<ApplicationStatuses>, ClientError> {
        self.get(Endpoint::Statuses).await
    }

    async fn node_status(&self, node: &str) -> Result<Option<NodeStatusInfo>, ClientError> {
        self.get_optional(Endpoint::NodeStatus(node.to_string()))
            .await
    }

    async fn jmx_tree(&self) -> Result<Option<JmxNode>, ClientError> {
        self.get_optional(Endpoint::JmxTree).await
    }

    async fn mbean(&self, encoded_name: &str) -> Result<Option<MBeanInformations>, ClientError> {
        self.get_optional(Endpoint::MBean(encoded_name.to_string()))
            .await
    }

    async fn invoke(
        &self,
        request: &JmxInvocationRequest,
    ) -> Result<JmxInvocationResult, ClientError> {
        let endpoint = Endpoint::Invoke;
        let url = endpoint.url(&self.base)?;
        tracing::debug!(
            mbean = %request.mbean_encoded_name,
            operation = %request.operation_name,
            "POST /jmx"
        );

        let response = self.client.post(url).json(request).send().await?;
        let body = check(response, &endpoint).await?;
        Ok(parse_body(&body)?.unwrap_or_default())
    }

    async fn sessions(&self, window: TimeWindow) -> Result<Vec<Graph>, ClientError> {
        self.get(Endpoint::Sessions(window)).await
    }
}

/// Builder for [`SironaClient`].
#[derive(Debug, Default)]
pub struct SironaClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl SironaClientBuilder {
    /// Set the API base URL (default: [`DEFAULT_ENDPOINT`]).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<SironaClient, ClientError> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let base = Url::parse(endpoint.trim())
            .map_err(|e| ClientError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidEndpoint(endpoint));
        }

        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(SironaClient { client, base })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = SironaClient::builder().build().unwrap();
        assert_eq!(client.base().as_str(), DEFAULT_ENDPOINT);
        assert_eq!(client.description(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_builder_custom() {
        let client = SironaClient::builder()
            .endpoint("https://monitor.local/sirona/api/")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        assert_eq!(client.base().as_str(), "https://monitor.local/sirona/api/");
    }

    #[test]
    fn test_builder_rejects_bad_endpoint() {
        let err = SironaClient::builder().endpoint("not a url").build().unwrap_err();
        assert!(matches!(err, ClientError::InvalidEndpoint(_)));
    }

    #[test]
    fn test_parse_body_null_and_empty() {
        assert_eq!(parse_body::<Graph>("").unwrap(), None);
        assert_eq!(parse_body::<Graph>("null").unwrap(), None);
        assert_eq!(parse_body::<Vec<GaugeInfo>>(" \n").unwrap(), None);
    }

    #[test]
    fn test_parse_body_value() {
        let graph: Option<Graph> =
            parse_body(r#"{"label":"CPU Usage","data":{"1":0.5}}"#).unwrap();
        let graph = graph.unwrap();
        assert_eq!(graph.label, "CPU Usage");
        assert_eq!(graph.points().len(), 1);
    }

    #[test]
    fn test_parse_body_garbage() {
        let err = parse_body::<Graph>("<html>").unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        let client = SironaClient::builder()
            .endpoint("http://127.0.0.1:9/sirona")
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        assert!(client.os_info().await.is_err());
    }
}
