use super::types::{NodeFlags, NodeRect, WindowInfo};

/// Upper bound on ancestor walks. The host guarantees an acyclic tree, but a
/// broken parent chain must still terminate.
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 256;

/// Non-owning handle to a host node.
///
/// The host controls node lifetimes; `upgrade` returns `None` once the node
/// has been recycled or detached from its tree.
pub trait NodeRef: Clone {
    type Node: TreeNode<Ref = Self>;

    fn upgrade(&self) -> Option<Self::Node>;
}

/// Read-only view of a node in the host's live UI tree.
///
/// Optional attributes return `None` when the node has no value or the platform
/// does not expose the attribute.
pub trait TreeNode: Clone + Sized {
    type Ref: NodeRef<Node = Self>;

    /// Downgrade to a handle that does not keep the node alive
    fn downgrade(&self) -> Self::Ref;

    fn parent(&self) -> Option<Self>;

    fn bounds_in_screen(&self) -> NodeRect;

    fn flags(&self) -> NodeFlags {
        NodeFlags::default()
    }

    fn text(&self) -> Option<String> {
        None
    }

    fn content_description(&self) -> Option<String> {
        None
    }

    fn hint_text(&self) -> Option<String> {
        None
    }

    fn tooltip_text(&self) -> Option<String> {
        None
    }

    fn pane_title(&self) -> Option<String> {
        None
    }

    fn package_name(&self) -> Option<String> {
        None
    }

    fn view_id_resource_name(&self) -> Option<String> {
        None
    }

    fn class_name(&self) -> Option<String> {
        None
    }

    fn window(&self) -> Option<WindowInfo> {
        None
    }

    /// Ask the host to click this node. Returns whether the host accepted the action.
    fn perform_click(&self) -> bool {
        false
    }
}

/// Iterator over a node and its ancestors, nearest first
pub struct Ancestors<N> {
    next: Option<N>,
    remaining: usize,
}

impl<N: TreeNode> Iterator for Ancestors<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        if self.remaining == 0 {
            if self.next.take().is_some() {
                tracing::warn!("Ancestor chain exceeds depth bound, truncating walk");
            }
            return None;
        }

        let node = self.next.take()?;
        self.remaining -= 1;
        self.next = node.parent();
        Some(node)
    }
}

/// Walk `node`, then its parent, then its parent's parent, visiting at most `max_depth` nodes
pub fn ancestors<N: TreeNode>(node: &N, max_depth: usize) -> Ancestors<N> {
    Ancestors {
        next: Some(node.clone()),
        remaining: max_depth,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    fn named(class: &str, parent: Option<usize>) -> FakeData {
        FakeData {
            class_name: Some(class.to_string()),
            parent,
            ..Default::default()
        }
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let (_arena, nodes) = arena(vec![
            named("Root", None),
            named("Mid", Some(0)),
            named("Leaf", Some(1)),
        ]);

        let classes: Vec<_> = ancestors(&nodes[2], DEFAULT_MAX_ANCESTOR_DEPTH)
            .filter_map(|n| n.class_name())
            .collect();
        assert_eq!(classes, vec!["Leaf", "Mid", "Root"]);
    }

    #[test]
    fn test_ancestors_terminates_on_cycle() {
        let (_arena, nodes) = arena(vec![named("A", Some(1)), named("B", Some(0))]);

        assert_eq!(ancestors(&nodes[0], 5).count(), 5);
    }

    #[test]
    fn test_stale_ref_after_arena_dropped() {
        let (arena, nodes) = arena(vec![named("Only", None)]);
        let weak = nodes[0].downgrade();
        assert!(weak.upgrade().is_some());

        drop(nodes);
        drop(arena);
        assert!(weak.upgrade().is_none());
    }
}
