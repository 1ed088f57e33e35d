//! Counter rows served by `/counters`.

use serde::{Deserialize, Serialize};

/// Aggregate statistics for one counter (a named operation under a role).
///
/// Serialized flat. Deserialization also accepts the server's original
/// shape, where `name`, `roleName` and `unitName` sit under `keyInfo`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireCounter")]
pub struct CounterRow {
    pub name: String,
    pub role_name: String,
    pub unit_name: String,
    pub hits: f64,
    pub max: f64,
    pub mean: f64,
    pub min: f64,
    pub standard_deviation: f64,
    pub sum: f64,
    pub variance: f64,
    pub concurrency: f64,
    pub max_concurrency: f64,
}

impl CounterRow {
    /// Identity of the row within a counter list (name, role).
    pub fn key(&self) -> (&str, &str) {
        (&self.name, &self.role_name)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireKeyInfo {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role_name: Option<String>,
    #[serde(default)]
    unit_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCounter {
    #[serde(default)]
    key_info: Option<WireKeyInfo>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role_name: Option<String>,
    #[serde(default)]
    unit_name: Option<String>,
    #[serde(default)]
    hits: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    mean: Option<f64>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    standard_deviation: Option<f64>,
    #[serde(default)]
    sum: Option<f64>,
    #[serde(default)]
    variance: Option<f64>,
    #[serde(default)]
    concurrency: Option<f64>,
    #[serde(default)]
    max_concurrency: Option<f64>,
}

impl From<WireCounter> for CounterRow {
    fn from(wire: WireCounter) -> Self {
        let (key_name, key_role, key_unit) = match wire.key_info {
            Some(k) => (k.name, k.role_name, k.unit_name),
            None => (None, None, None),
        };
        Self {
            name: wire.name.or(key_name).unwrap_or_default(),
            role_name: wire.role_name.or(key_role).unwrap_or_default(),
            unit_name: wire.unit_name.or(key_unit).unwrap_or_default(),
            hits: wire.hits.unwrap_or_default(),
            max: wire.max.unwrap_or_default(),
            mean: wire.mean.unwrap_or_default(),
            min: wire.min.unwrap_or_default(),
            standard_deviation: wire.standard_deviation.unwrap_or_default(),
            sum: wire.sum.unwrap_or_default(),
            variance: wire.variance.unwrap_or_default(),
            concurrency: wire.concurrency.unwrap_or_default(),
            max_concurrency: wire.max_concurrency.unwrap_or_default(),
        }
    }
}
