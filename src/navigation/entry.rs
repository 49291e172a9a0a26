use serde::{Deserialize, Serialize};

use crate::accessibility::NodeRef;

/// Scroll position of the diagnostic panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: u32,
    pub y: u32,
}

impl ScrollOffset {
    pub const ORIGIN: ScrollOffset = ScrollOffset { x: 0, y: 0 };

    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// One row of the linear navigation list
#[derive(Debug, Clone)]
pub struct NavigationEntry<R> {
    pub label: String,
    pub node: R,
}

impl<R: NodeRef> NavigationEntry<R> {
    pub fn new(label: impl Into<String>, node: R) -> Self {
        Self {
            label: label.into(),
            node,
        }
    }

    /// The referenced node, if the host still has it
    pub fn resolve(&self) -> Option<R::Node> {
        self.node.upgrade()
    }
}
