use crate::accessibility::TreeNode;

/// Inbound surface for tree snapshots.
///
/// The host delivers one snapshot at a time: `on_traversal_start`, then
/// `on_visit_node` for each node in pre-order, then `on_traversal_end`.
pub trait AccessibilityListener<N: TreeNode> {
    fn on_traversal_start(&mut self);

    fn on_visit_node(&mut self, node: &N);

    fn on_traversal_end(&mut self);

    /// The foreground app is not one the user asked to inspect
    fn on_non_whitelisted_app(&mut self) {}
}
