//! Time series as served by the reporting API and as handed to charts.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::GaugeResult;

/// A single chart point.
///
/// Serialized as `{"x": timestamp, "y": value}`, the shape charting code
/// has always consumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Epoch milliseconds.
    #[serde(rename = "x")]
    pub timestamp: i64,
    #[serde(rename = "y")]
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// The `timestamp -> value` mapping carried by a graph payload.
///
/// JSON object keys are text, so timestamps arrive as strings. The entries
/// are kept in the order the server wrote them; nothing here sorts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Samples(Vec<(String, f64)>);

impl Samples {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, keeping insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: f64) {
        self.0.push((key.into(), value));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in server order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Samples {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Serialize for Samples {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Samples {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SamplesVisitor;

        impl<'de> Visitor<'de> for SamplesVisitor {
            type Value = Samples;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of timestamp to numeric value")
            }

            fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Samples, A::Error> {
                read_samples(access)
            }
        }

        deserializer.deserialize_map(SamplesVisitor)
    }
}

// Every entry is kept; a value that is not a number becomes NaN, which
// charts skip.
fn read_samples<'de, A: MapAccess<'de>>(mut access: A) -> Result<Samples, A::Error> {
    let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
    while let Some((key, value)) = access.next_entry::<String, Value>()? {
        entries.push((key, sample_value(&value)));
    }
    Ok(Samples(entries))
}

fn sample_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// `data` member of a graph: anything other than an object is no data.
fn lenient_samples<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Samples>, D::Error> {
    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = Option<Samples>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of timestamp to numeric value, or anything else for no data")
        }

        fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
            read_samples(access).map(Some)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_bool<E: serde::de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_i64<E: serde::de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_u64<E: serde::de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_f64<E: serde::de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_str<E: serde::de::Error>(self, _: &str) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}

/// Convert a server mapping into chart points.
///
/// One point per entry, in input order. `None` yields an empty list rather
/// than an error. Keys that are not numbers at all are skipped; decimal keys
/// are truncated to whole milliseconds. Values that were not numbers are
/// kept as NaN points.
pub fn to_points(samples: Option<&Samples>) -> Vec<TimeSeriesPoint> {
    let Some(samples) = samples else {
        return Vec::new();
    };

    samples
        .iter()
        .filter_map(|(key, value)| coerce_timestamp(key).map(|ts| TimeSeriesPoint::new(ts, value)))
        .collect()
}

fn coerce_timestamp(key: &str) -> Option<i64> {
    let key = key.trim();
    key.parse::<i64>().ok().or_else(|| {
        key.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

/// Payload of every `/jvmreports/*` and `/jtareports/*` endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient_samples")]
    pub data: Option<Samples>,
}

impl Graph {
    /// Chart points for this graph (see [`to_points`]).
    pub fn points(&self) -> Vec<TimeSeriesPoint> {
        to_points(self.data.as_ref())
    }
}

/// Axis extents of a non-empty series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A labelled, ordered list of points ready for a chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub label: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl Series {
    /// An empty series carrying only a label.
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            points: Vec::new(),
        }
    }

    /// Build a series from a graph payload; `None` gives an empty series.
    pub fn from_graph(graph: Option<Graph>) -> Self {
        match graph {
            Some(graph) => {
                let points = graph.points();
                Self {
                    label: graph.label,
                    points,
                }
            }
            None => Self::default(),
        }
    }

    /// Build a series from a gauge result's value list.
    pub fn from_gauge(result: Option<GaugeResult>) -> Self {
        let Some(result) = result else {
            return Self::default();
        };
        let points = result
            .gauge_values
            .unwrap_or_default()
            .into_iter()
            .map(|v| TimeSeriesPoint::new(v.timestamp, v.value))
            .collect();
        Self {
            label: result.gauge_name,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent plottable value, by position.
    pub fn last_value(&self) -> Option<f64> {
        self.points
            .iter()
            .rev()
            .map(|p| p.value)
            .find(|v| v.is_finite())
    }

    /// Axis extents, ignoring non-finite values. `None` when nothing is plottable.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut plottable = self.points.iter().filter(|p| p.value.is_finite());
        let first = plottable.next()?;
        let init = Bounds {
            x_min: first.timestamp,
            x_max: first.timestamp,
            y_min: first.value,
            y_max: first.value,
        };
        Some(plottable.fold(init, |b, p| Bounds {
            x_min: b.x_min.min(p.timestamp),
            x_max: b.x_max.max(p.timestamp),
            y_min: b.y_min.min(p.value),
            y_max: b.y_max.max(p.value),
        }))
    }

    /// Points as `(x, y)` floats, the form plotting widgets take.
    pub fn as_xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter(|p| p.value.is_finite())
            .map(|p| (p.timestamp as f64, p.value))
            .collect()
    }
}
