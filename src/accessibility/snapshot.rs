//! In-memory accessibility tree
//!
//! Stands in for the platform's live tree when replaying captured snapshots
//! and in tests. The tree owns its nodes; node handles handed out to
//! listeners are reference counted and parent links are weak, so dropping or
//! recycling the tree invalidates every [`SnapshotNodeRef`] taken from it.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::{Rc, Weak};

use super::node::{NodeRef, TreeNode};
use super::types::{NodeFlags, NodeRect, WindowInfo};
use crate::error::{AppError, Result};
use crate::overlay::AccessibilityListener;

/// Serialized description of a node and its subtree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pane_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_id_resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub bounds: NodeRect,
    #[serde(flatten)]
    pub flags: NodeFlags,
    /// Enclosing window; inherited from the parent when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

#[derive(Debug)]
struct NodeData {
    text: Option<String>,
    content_description: Option<String>,
    hint_text: Option<String>,
    tooltip_text: Option<String>,
    pane_title: Option<String>,
    package_name: Option<String>,
    view_id_resource_name: Option<String>,
    class_name: Option<String>,
    bounds: NodeRect,
    flags: NodeFlags,
    window: Option<WindowInfo>,
    parent: Weak<NodeData>,
    children: Vec<Rc<NodeData>>,
    attached: Cell<bool>,
    clicks: Cell<u32>,
}

impl NodeData {
    fn build(spec: &NodeSpec, parent: Weak<NodeData>, window: Option<&WindowInfo>) -> Rc<Self> {
        let window = spec.window.as_ref().or(window).cloned();

        Rc::new_cyclic(|me| NodeData {
            text: spec.text.clone(),
            content_description: spec.content_description.clone(),
            hint_text: spec.hint_text.clone(),
            tooltip_text: spec.tooltip_text.clone(),
            pane_title: spec.pane_title.clone(),
            package_name: spec.package_name.clone(),
            view_id_resource_name: spec.view_id_resource_name.clone(),
            class_name: spec.class_name.clone(),
            bounds: spec.bounds,
            flags: spec.flags,
            children: spec
                .children
                .iter()
                .map(|child| NodeData::build(child, me.clone(), window.as_ref()))
                .collect(),
            window,
            parent,
            attached: Cell::new(true),
            clicks: Cell::new(0),
        })
    }
}

/// Strong handle to a node of a [`SnapshotTree`]
#[derive(Debug, Clone)]
pub struct SnapshotNode(Rc<NodeData>);

/// Weak handle to a node of a [`SnapshotTree`]
#[derive(Debug, Clone)]
pub struct SnapshotNodeRef(Weak<NodeData>);

impl NodeRef for SnapshotNodeRef {
    type Node = SnapshotNode;

    fn upgrade(&self) -> Option<SnapshotNode> {
        self.0
            .upgrade()
            .filter(|data| data.attached.get())
            .map(SnapshotNode)
    }
}

impl SnapshotNode {
    /// Whether the owning tree is still live
    pub fn is_attached(&self) -> bool {
        self.0.attached.get()
    }

    /// Number of clicks the host accepted on this node
    pub fn click_count(&self) -> u32 {
        self.0.clicks.get()
    }

    pub fn children(&self) -> impl Iterator<Item = SnapshotNode> + '_ {
        self.0.children.iter().cloned().map(SnapshotNode)
    }

    pub fn ptr_eq(&self, other: &SnapshotNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl TreeNode for SnapshotNode {
    type Ref = SnapshotNodeRef;

    fn downgrade(&self) -> SnapshotNodeRef {
        SnapshotNodeRef(Rc::downgrade(&self.0))
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.upgrade().map(SnapshotNode)
    }

    fn bounds_in_screen(&self) -> NodeRect {
        self.0.bounds
    }

    fn flags(&self) -> NodeFlags {
        self.0.flags
    }

    fn text(&self) -> Option<String> {
        self.0.text.clone()
    }

    fn content_description(&self) -> Option<String> {
        self.0.content_description.clone()
    }

    fn hint_text(&self) -> Option<String> {
        self.0.hint_text.clone()
    }

    fn tooltip_text(&self) -> Option<String> {
        self.0.tooltip_text.clone()
    }

    fn pane_title(&self) -> Option<String> {
        self.0.pane_title.clone()
    }

    fn package_name(&self) -> Option<String> {
        self.0.package_name.clone()
    }

    fn view_id_resource_name(&self) -> Option<String> {
        self.0.view_id_resource_name.clone()
    }

    fn class_name(&self) -> Option<String> {
        self.0.class_name.clone()
    }

    fn window(&self) -> Option<WindowInfo> {
        self.0.window.clone()
    }

    fn perform_click(&self) -> bool {
        if !self.is_attached() || !self.0.flags.clickable {
            return false;
        }
        self.0.clicks.set(self.0.clicks.get() + 1);
        true
    }
}

/// One captured UI tree
#[derive(Debug)]
pub struct SnapshotTree {
    root: Rc<NodeData>,
}

impl SnapshotTree {
    pub fn from_spec(spec: &NodeSpec) -> Self {
        Self {
            root: NodeData::build(spec, Weak::new(), None),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let spec: NodeSpec =
            serde_json::from_str(json).map_err(|e| AppError::InvalidSnapshot(e.to_string()))?;
        Ok(Self::from_spec(&spec))
    }

    pub fn root(&self) -> SnapshotNode {
        SnapshotNode(self.root.clone())
    }

    /// All nodes in pre-order
    pub fn nodes(&self) -> Vec<SnapshotNode> {
        let mut out = Vec::new();
        let mut stack = vec![self.root.clone()];
        while let Some(node) = stack.pop() {
            stack.extend(node.children.iter().rev().cloned());
            out.push(SnapshotNode(node));
        }
        out
    }

    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    pub fn find_by_view_id(&self, id: &str) -> Option<SnapshotNode> {
        self.nodes()
            .into_iter()
            .find(|n| n.0.view_id_resource_name.as_deref() == Some(id))
    }

    /// Detach every node; outstanding references stop resolving
    pub fn recycle(&self) {
        for node in self.nodes() {
            node.0.attached.set(false);
        }
    }

    /// Deliver this tree to `listener` as one snapshot: start, every node in pre-order, end
    pub fn walk<L: AccessibilityListener<SnapshotNode>>(&self, listener: &mut L) {
        listener.on_traversal_start();
        for node in self.nodes() {
            listener.on_visit_node(&node);
        }
        listener.on_traversal_end();
    }
}
