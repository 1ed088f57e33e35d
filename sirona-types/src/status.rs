//! Node validation statuses served by `/status`.

use serde::{Deserialize, Serialize};

/// Validation outcome, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Status {
    Ok,
    Degraded,
    Ko,
    #[default]
    Unknown,
}

impl Status {
    /// Parse the status text used by the API (case-insensitive).
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_uppercase().as_str() {
            "OK" | "SUCCESS" => Status::Ok,
            "DEGRADED" | "WARNING" => Status::Degraded,
            "KO" | "DANGER" | "ERROR" => Status::Ko,
            _ => Status::Unknown,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Degraded => "DEGRADED",
            Status::Ko => "KO",
            Status::Unknown => "?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationResultInfo {
    pub status: String,
    pub message: String,
    pub name: String,
}

impl ValidationResultInfo {
    pub fn status(&self) -> Status {
        Status::parse(&self.status)
    }
}

/// `/status/:nodeName`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeStatusInfo {
    pub name: String,
    pub results: Vec<ValidationResultInfo>,
    /// Epoch milliseconds of the last validation.
    pub date: Option<i64>,
    pub status: String,
    pub status_label: Option<String>,
}

impl NodeStatusInfo {
    /// The reported status, or the worst of the validation results when the
    /// node does not report one.
    pub fn status(&self) -> Status {
        match Status::parse(&self.status) {
            Status::Unknown => self
                .results
                .iter()
                .map(ValidationResultInfo::status)
                .filter(|s| *s != Status::Unknown)
                .max()
                .unwrap_or(Status::Unknown),
            status => status,
        }
    }
}

/// Node statuses grouped by application, as served by `/status`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationStatuses {
    pub name: String,
    pub nodes: Vec<NodeStatusInfo>,
}

impl ApplicationStatuses {
    /// Worst status among the application's nodes.
    pub fn status(&self) -> Status {
        self.nodes
            .iter()
            .map(NodeStatusInfo::status)
            .filter(|s| *s != Status::Unknown)
            .max()
            .unwrap_or(Status::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(Status::parse("ok"), Status::Ok);
        assert_eq!(Status::parse("DEGRADED"), Status::Degraded);
        assert_eq!(Status::parse("KO"), Status::Ko);
        assert_eq!(Status::parse("banana"), Status::Unknown);
    }

    #[test]
    fn test_node_status_falls_back_to_results() {
        let json = r#"{
            "name": "node-1",
            "results": [
                {"status": "OK", "message": "fine", "name": "disk"},
                {"status": "DEGRADED", "message": "slow", "name": "db"}
            ],
            "date": 1700000000000
        }"#;
        let node: NodeStatusInfo = serde_json::from_str(json).unwrap();
        assert_eq!(node.status(), Status::Degraded);
    }

    #[test]
    fn test_application_worst_status() {
        let app = ApplicationStatuses {
            name: "shop".into(),
            nodes: vec![
                NodeStatusInfo {
                    name: "a".into(),
                    status: "OK".into(),
                    ..Default::default()
                },
                NodeStatusInfo {
                    name: "b".into(),
                    status: "KO".into(),
                    ..Default::default()
                },
            ],
        };
        assert_eq!(app.status(), Status::Ko);
        assert_eq!(ApplicationStatuses::default().status(), Status::Unknown);
    }
}
