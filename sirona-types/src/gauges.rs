//! Gauge listing and gauge time series.

use serde::{Deserialize, Serialize};

/// A gauge as listed by `/gauges`.
///
/// `encoded_name` is the URL-safe identifier the API expects back in
/// `/gauges/:gaugeName/:start/:end`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeInfo {
    pub name: String,
    #[serde(default)]
    pub encoded_name: String,
}

/// One sample of a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GaugeValue {
    pub timestamp: i64,
    pub value: f64,
}

/// Result of a single-gauge query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeResult {
    #[serde(default)]
    pub gauge_name: String,
    #[serde(default)]
    pub gauge_values: Option<Vec<GaugeValue>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Series, TimeSeriesPoint};

    #[test]
    fn test_gauge_result_to_series() {
        let json = r#"{
            "gaugeName": "sessions-/shop",
            "gaugeValues": [{"timestamp": 10, "value": 1.0}, {"timestamp": 20, "value": 4.0}]
        }"#;
        let result: GaugeResult = serde_json::from_str(json).unwrap();
        let series = Series::from_gauge(Some(result));
        assert_eq!(series.label, "sessions-/shop");
        assert_eq!(
            series.points,
            vec![TimeSeriesPoint::new(10, 1.0), TimeSeriesPoint::new(20, 4.0)]
        );
    }

    #[test]
    fn test_gauge_without_values() {
        let result: GaugeResult =
            serde_json::from_str(r#"{"gaugeName":"cpu","gaugeValues":null}"#).unwrap();
        let series = Series::from_gauge(Some(result));
        assert_eq!(series.label, "cpu");
        assert!(series.is_empty());
    }

    #[test]
    fn test_gauge_info() {
        let info: GaugeInfo =
            serde_json::from_str(r#"{"name":"CPU","encodedName":"Q1BV"}"#).unwrap();
        assert_eq!(info.encoded_name, "Q1BV");
    }
}
