//! Browsing state for the MBean tree and the operation invocation form.

use std::collections::HashSet;

use sirona_types::{JmxInvocationRequest, JmxNode, MBeanOperation};

/// One visible line of the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub label: String,
    /// Encoded object name, for MBean leaves.
    pub encoded: Option<String>,
    pub has_children: bool,
    pub expanded: bool,
    key: Vec<String>,
}

/// Expanded nodes and selection of the MBean tree.
///
/// Nodes are remembered by their name path, so expansion survives a reload
/// of the tree.
#[derive(Debug, Clone, Default)]
pub struct TreeBrowser {
    expanded: HashSet<Vec<String>>,
    pub selected: usize,
}

impl TreeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible rows in display order. The root itself is not shown.
    pub fn rows(&self, tree: &JmxNode) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for child in tree.children() {
            self.flatten(child, 0, &mut Vec::new(), &mut rows);
        }
        rows
    }

    fn flatten(
        &self,
        node: &JmxNode,
        depth: usize,
        prefix: &mut Vec<String>,
        rows: &mut Vec<TreeRow>,
    ) {
        prefix.push(node.name.clone());
        let key = prefix.clone();
        let expanded = self.expanded.contains(&key);
        rows.push(TreeRow {
            depth,
            label: node.display().to_string(),
            encoded: node.base64.clone(),
            has_children: !node.children().is_empty(),
            expanded,
            key,
        });
        if expanded {
            for child in node.children() {
                self.flatten(child, depth + 1, prefix, rows);
            }
        }
        prefix.pop();
    }

    pub fn selected_row(&self, tree: &JmxNode) -> Option<TreeRow> {
        self.rows(tree).into_iter().nth(self.selected)
    }

    /// Open the selected node. An MBean yields its encoded identifier, which
    /// the caller opens, and is expanded too when it has children. Any other
    /// branch is expanded or collapsed.
    pub fn activate(&mut self, tree: &JmxNode) -> Option<String> {
        let row = self.selected_row(tree)?;
        match row.encoded {
            Some(encoded) => {
                if row.has_children {
                    self.expanded.insert(row.key);
                }
                Some(encoded)
            }
            None => {
                if row.has_children && !self.expanded.remove(&row.key) {
                    self.expanded.insert(row.key);
                }
                None
            }
        }
    }

    /// Expand the selected node without opening it.
    pub fn expand(&mut self, tree: &JmxNode) {
        if let Some(row) = self.selected_row(tree) {
            if row.has_children {
                self.expanded.insert(row.key);
            }
        }
    }

    /// Collapse the selected node, or move to its parent when already closed.
    pub fn collapse(&mut self, tree: &JmxNode) {
        let rows = self.rows(tree);
        let Some(row) = rows.get(self.selected) else {
            return;
        };
        if row.expanded {
            self.expanded.remove(&row.key);
            return;
        }
        let parent = &row.key[..row.key.len().saturating_sub(1)];
        if let Some(index) = rows.iter().position(|r| r.key == parent) {
            self.selected = index;
        }
    }

    /// Expand every ancestor of the MBean `encoded` and select it.
    pub fn reveal(&mut self, tree: &JmxNode, encoded: &str) -> bool {
        let Some(path) = tree.path_to(encoded) else {
            return false;
        };
        let mut node = tree;
        let mut key = Vec::new();
        for index in path {
            let Some(child) = node.children().get(index) else {
                return false;
            };
            key.push(child.name.clone());
            if !child.children().is_empty() {
                self.expanded.insert(key.clone());
            }
            node = child;
        }
        if let Some(index) = self
            .rows(tree)
            .iter()
            .position(|r| r.encoded.as_deref() == Some(encoded))
        {
            self.selected = index;
        }
        true
    }

    pub fn select_next_n(&mut self, n: usize, count: usize) {
        self.selected = (self.selected + n).min(count.saturating_sub(1));
    }

    pub fn select_prev_n(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }
}

/// Parameter values collected for one operation of one MBean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationForm {
    pub mbean: String,
    pub operation: MBeanOperation,
    pub values: Vec<String>,
    pub focus: usize,
}

impl InvocationForm {
    pub fn new(mbean: impl Into<String>, operation: MBeanOperation) -> Self {
        let values = vec![String::new(); operation.parameters.len()];
        Self {
            mbean: mbean.into(),
            operation,
            values,
            focus: 0,
        }
    }

    pub fn push(&mut self, c: char) {
        if let Some(value) = self.values.get_mut(self.focus) {
            value.push(c);
        }
    }

    pub fn pop(&mut self) {
        if let Some(value) = self.values.get_mut(self.focus) {
            value.pop();
        }
    }

    pub fn focus_next(&mut self) {
        if !self.values.is_empty() {
            self.focus = (self.focus + 1) % self.values.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.values.is_empty() {
            self.focus = (self.focus + self.values.len() - 1) % self.values.len();
        }
    }

    /// The request as typed. Values are sent as text; the server converts
    /// them to the declared parameter types.
    pub fn to_request(&self) -> JmxInvocationRequest {
        JmxInvocationRequest {
            mbean_encoded_name: self.mbean.clone(),
            operation_name: self.operation.name.clone(),
            parameters: self.values.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sirona_types::MBeanParameter;

    fn tree() -> JmxNode {
        serde_json::from_str(
            r#"{
            "name": "/", "label": "/",
            "children": [
                {"name": "java.lang", "label": "java.lang", "children": [
                    {"name": "Memory", "label": "Memory", "base64": "bWVt", "leaf": true},
                    {"name": "Threading", "label": "Threading", "base64": "dGhy", "leaf": true}
                ]},
                {"name": "JMImplementation", "label": "JMImplementation", "children": [
                    {"name": "MBeanServerDelegate", "label": "MBeanServerDelegate", "base64": "ZGVs"}
                ]}
            ]
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_collapsed_by_default() {
        let browser = TreeBrowser::new();
        let rows = browser.rows(&tree());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "java.lang");
        assert!(rows[0].has_children);
        assert!(!rows[0].expanded);
    }

    #[test]
    fn test_expand_and_open_leaf() {
        let tree = tree();
        let mut browser = TreeBrowser::new();

        assert_eq!(browser.activate(&tree), None);
        let rows = browser.rows(&tree);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].depth, 1);

        browser.select_next_n(2, rows.len());
        assert_eq!(browser.activate(&tree), Some("dGhy".to_string()));
    }

    #[test]
    fn test_mbean_with_children_opens_and_expands() {
        let tree: JmxNode = serde_json::from_str(
            r#"{
            "name": "/", "label": "/",
            "children": [
                {"name": "Catalina", "label": "Catalina", "children": [
                    {"name": "type=Service", "label": "type=Service",
                     "base64": "Q2F0YWxpbmE6dHlwZT1TZXJ2aWNl", "children": [
                        {"name": "name=http", "label": "name=http", "base64": "aHR0cA"}
                    ]}
                ]}
            ]
        }"#,
        )
        .unwrap();
        let mut browser = TreeBrowser::new();
        assert!(browser.reveal(&tree, "Q2F0YWxpbmE6dHlwZT1TZXJ2aWNl"));

        assert_eq!(
            browser.activate(&tree),
            Some("Q2F0YWxpbmE6dHlwZT1TZXJ2aWNl".to_string())
        );
        let rows = browser.rows(&tree);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].encoded.as_deref(), Some("aHR0cA"));

        // Opening again keeps it expanded
        assert!(browser.activate(&tree).is_some());
        assert_eq!(browser.rows(&tree).len(), 3);
    }

    #[test]
    fn test_expand_does_not_open() {
        let tree = tree();
        let mut browser = TreeBrowser::new();
        browser.expand(&tree);
        assert_eq!(browser.rows(&tree).len(), 4);
        browser.expand(&tree);
        assert_eq!(browser.rows(&tree).len(), 4);
    }

    #[test]
    fn test_collapse_moves_to_parent() {
        let tree = tree();
        let mut browser = TreeBrowser::new();
        browser.activate(&tree);
        browser.selected = 2;

        browser.collapse(&tree);
        assert_eq!(browser.selected, 0);
        browser.collapse(&tree);
        assert_eq!(browser.rows(&tree).len(), 2);
    }

    #[test]
    fn test_reveal() {
        let tree = tree();
        let mut browser = TreeBrowser::new();
        assert!(browser.reveal(&tree, "ZGVs"));
        let row = browser.selected_row(&tree).unwrap();
        assert_eq!(row.encoded.as_deref(), Some("ZGVs"));
        assert!(!browser.reveal(&tree, "missing"));
    }

    #[test]
    fn test_invocation_form() {
        let operation = MBeanOperation {
            name: "setLevel".into(),
            return_type: "void".into(),
            parameters: vec![
                MBeanParameter {
                    name: "p0".into(),
                    kind: "java.lang.String".into(),
                },
                MBeanParameter {
                    name: "p1".into(),
                    kind: "int".into(),
                },
            ],
        };
        let mut form = InvocationForm::new("bWVt", operation);
        for c in "INFO".chars() {
            form.push(c);
        }
        form.focus_next();
        form.push('4');
        form.push('x');
        form.pop();

        let request = form.to_request();
        assert_eq!(request.mbean_encoded_name, "bWVt");
        assert_eq!(request.operation_name, "setLevel");
        assert_eq!(request.parameters, vec!["INFO", "4"]);

        form.focus_next();
        assert_eq!(form.focus, 0);
        form.focus_prev();
        assert_eq!(form.focus, 1);
    }
}
