//! Host environment and thread payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `/environment/os`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OsInfo {
    pub arch: String,
    pub name: String,
    pub version: String,
    pub number_processor: u32,
    /// Members this client does not model.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// `/environment/memory`, all values in bytes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryInfo {
    pub max_memory: i64,
    pub init_memory: i64,
    pub max_non_heap_memory: i64,
    pub init_non_heap_memory: i64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A thread as listed by `/threads`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadInfo {
    pub name: String,
    #[serde(default)]
    pub encoded_name: String,
}

/// `/threads/:threadName`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThreadDump {
    pub name: String,
    pub state: Option<String>,
    /// Stack trace, one frame per line.
    pub dump: String,
}

impl ThreadDump {
    pub fn frames(&self) -> impl Iterator<Item = &str> {
        self.dump.lines().filter(|l| !l.trim().is_empty())
    }
}
