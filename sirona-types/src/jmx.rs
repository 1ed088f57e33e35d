//! JMX tree, MBean detail and operation invocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node of the MBean tree served by `/jmx`.
///
/// Domains and key properties form the inner nodes; an MBean itself is a
/// leaf and carries the opaque encoded object name used by `/jmx/:mbean`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JmxNode {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<JmxNode>>,
}

impl JmxNode {
    /// Text to show for this node.
    pub fn display(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// A node is a leaf when flagged so or when it identifies an MBean.
    pub fn is_leaf(&self) -> bool {
        self.leaf.unwrap_or(false) || self.base64.is_some()
    }

    pub fn children(&self) -> &[JmxNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Depth-first search for the node with the given encoded identifier.
    pub fn find(&self, encoded: &str) -> Option<&JmxNode> {
        if self.base64.as_deref() == Some(encoded) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(encoded))
    }

    /// Path of child indices leading to the node with `encoded`, if any.
    pub fn path_to(&self, encoded: &str) -> Option<Vec<usize>> {
        if self.base64.as_deref() == Some(encoded) {
            return Some(Vec::new());
        }
        self.children().iter().enumerate().find_map(|(i, child)| {
            child.path_to(encoded).map(|mut rest| {
                rest.insert(0, i);
                rest
            })
        })
    }

    /// Number of MBeans below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        let own = usize::from(self.base64.is_some());
        own + self.children().iter().map(JmxNode::leaf_count).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MBeanAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MBeanParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MBeanOperation {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<MBeanParameter>,
}

impl MBeanOperation {
    /// `name(type, type): returnType`
    pub fn signature(&self) -> String {
        let params: Vec<&str> = self.parameters.iter().map(|p| p.kind.as_str()).collect();
        format!("{}({}): {}", self.name, params.join(", "), self.return_type)
    }
}

/// `/jmx/:mbean`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MBeanInformations {
    pub object_name: String,
    pub object_name_hash: String,
    pub classname: String,
    pub description: String,
    pub attributes: Vec<MBeanAttribute>,
    pub operations: Vec<MBeanOperation>,
}

impl MBeanInformations {
    pub fn operation(&self, name: &str) -> Option<&MBeanOperation> {
        self.operations.iter().find(|o| o.name == name)
    }
}

/// Body of `POST /jmx`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JmxInvocationRequest {
    pub mbean_encoded_name: String,
    pub operation_name: String,
    pub parameters: Vec<String>,
}

/// Response of `POST /jmx`. A fault is reported through `error_message`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JmxInvocationResult {
    pub error_message: Option<String>,
    pub results: Option<Vec<String>>,
    pub map_result: Option<BTreeMap<String, String>>,
}

impl JmxInvocationResult {
    /// A result carrying only a fault message.
    pub fn fault(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn is_fault(&self) -> bool {
        self.error_message.as_deref().is_some_and(|m| !m.is_empty())
    }

    /// Result rendered as display lines, verbatim.
    pub fn lines(&self) -> Vec<String> {
        if let Some(message) = self.error_message.as_ref().filter(|m| !m.is_empty()) {
            return message.lines().map(str::to_string).collect();
        }
        let mut lines: Vec<String> = self.results.clone().unwrap_or_default();
        if let Some(map) = &self.map_result {
            lines.extend(map.iter().map(|(k, v)| format!("{k} = {v}")));
        }
        lines
    }
}
