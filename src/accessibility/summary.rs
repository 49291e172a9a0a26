//! Canonical per-node summaries
//!
//! A summary collects the identifying attributes of one node into a sorted
//! key/value map. Attributes the platform cannot report, or that the node
//! does not have, are left out entirely.

use serde::Serialize;
use std::collections::BTreeMap;

use super::node::{ancestors, TreeNode, DEFAULT_MAX_ANCESTOR_DEPTH};
use super::types::PlatformLevel;

/// Summary attribute names
pub mod keys {
    pub const BOUNDS_IN_SCREEN: &str = "boundsInScreen";
    pub const HINT_TEXT: &str = "hintText";
    pub const NODE_CLASS_PATH: &str = "nodeClassPath";
    pub const PACKAGE_NAME: &str = "packageName";
    pub const PANE_TITLE: &str = "paneTitle";
    pub const TEXT: &str = "text";
    pub const TOOLTIP_TEXT: &str = "tooltipText";
    pub const VIEW_ID_RESOURCE_NAME: &str = "viewIdResourceName";
    pub const WINDOW_TITLE: &str = "windowTitle";
    pub const WINDOW_TYPE: &str = "windowType";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SummaryValue {
    Text(String),
    List(Vec<String>),
}

impl SummaryValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Text(_) => None,
        }
    }
}

/// Immutable attribute summary of a node, iterated in key order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NodeSummary(BTreeMap<&'static str, SummaryValue>);

impl NodeSummary {
    pub fn get(&self, key: &str) -> Option<&SummaryValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SummaryValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    fn put_text(&mut self, key: &'static str, value: Option<String>) {
        if let Some(value) = value {
            self.0.insert(key, SummaryValue::Text(value));
        }
    }
}

/// Builds [`NodeSummary`] values for a given platform capability level
#[derive(Debug, Clone)]
pub struct NodeSummarizer {
    level: PlatformLevel,
    max_depth: usize,
}

impl NodeSummarizer {
    pub fn new(level: PlatformLevel) -> Self {
        Self {
            level,
            max_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn level(&self) -> PlatformLevel {
        self.level
    }

    /// Summarize every known identifying attribute of `node`
    pub fn summarize<N: TreeNode>(&self, node: &N) -> NodeSummary {
        let mut summary = NodeSummary::default();
        let window = node.window();

        if self.level.supports(PlatformLevel::N) {
            summary.put_text(
                keys::WINDOW_TITLE,
                window.as_ref().and_then(|w| w.title.clone()),
            );
        }
        if self.level.supports(PlatformLevel::P) {
            summary.put_text(keys::PANE_TITLE, node.pane_title());
            summary.put_text(keys::TOOLTIP_TEXT, node.tooltip_text());
        }
        if self.level.supports(PlatformLevel::O) {
            summary.put_text(keys::HINT_TEXT, node.hint_text());
        }

        summary.put_text(
            keys::BOUNDS_IN_SCREEN,
            Some(node.bounds_in_screen().to_short_string()),
        );
        summary.put_text(
            keys::WINDOW_TYPE,
            window.map(|w| w.window_type.to_string()),
        );
        summary.put_text(keys::VIEW_ID_RESOURCE_NAME, node.view_id_resource_name());
        summary.put_text(keys::PACKAGE_NAME, node.package_name());
        summary.put_text(keys::TEXT, node.text());

        let class_path = self.class_path(node);
        if !class_path.is_empty() {
            summary
                .0
                .insert(keys::NODE_CLASS_PATH, SummaryValue::List(class_path));
        }

        summary
    }

    /// Class names from the root down to `node` itself. Nodes without a class are skipped.
    pub fn class_path<N: TreeNode>(&self, node: &N) -> Vec<String> {
        let mut path: Vec<String> = ancestors(node, self.max_depth)
            .filter_map(|n| n.class_name())
            .collect();
        path.reverse();
        path
    }
}

impl Default for NodeSummarizer {
    fn default() -> Self {
        Self::new(PlatformLevel::default())
    }
}
