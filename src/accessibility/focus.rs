use super::node::{ancestors, TreeNode, DEFAULT_MAX_ANCESTOR_DEPTH};
use super::types::NodeFlags;

/// Label used when a node has neither a content description nor text
pub const NO_TEXT_PLACEHOLDER: &str = "[[No Text]]";

/// Decides which nodes a linear (screen reader style) navigation would stop on
#[derive(Debug, Clone)]
pub struct FocusabilityClassifier {
    max_depth: usize,
}

impl FocusabilityClassifier {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether `node` is likely to receive focus during linear navigation.
    ///
    /// Off-screen nodes never do. Interactive nodes always do. A node that only
    /// carries text is read on its own unless a clickable ancestor would absorb it.
    pub fn is_likely_focusable<N: TreeNode>(&self, node: &N) -> bool {
        let flags = node.flags();
        if !flags.visible_to_user || node.bounds_in_screen().is_empty() {
            return false;
        }
        if flags.is_interactive() {
            return true;
        }

        let has_text = content_description(node).is_some() || non_empty(node.text()).is_some();
        has_text
            && node
                .parent()
                .and_then(|parent| self.nearest_clickable_ancestor(&parent))
                .is_none()
    }

    /// `node` itself if clickable, otherwise the closest clickable ancestor
    pub fn nearest_clickable_ancestor<N: TreeNode>(&self, node: &N) -> Option<N> {
        ancestors(node, self.max_depth).find(|n| n.flags().clickable)
    }
}

impl Default for FocusabilityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Content description of a node, ignoring blank values
pub fn content_description<N: TreeNode>(node: &N) -> Option<String> {
    non_empty(node.content_description())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// State descriptors appended to a navigation label
pub fn descriptors(flags: &NodeFlags) -> Vec<String> {
    let mut ret = Vec::new();
    if flags.checkable {
        let state = if flags.checked { "Checked" } else { "Unchecked" };
        ret.push(format!("Checkable [{}]", state));
    }
    if flags.selected {
        ret.push("Selected".to_string());
    }
    if flags.focused {
        ret.push("Focused".to_string());
    }
    ret
}

/// Text shown for a node in the navigation list, e.g. `Submit-Checkable [Unchecked], Focused`
///
/// Blank content descriptions and text count as absent, so a node with only
/// whitespace text is labelled `[[No Text]]`.
pub fn build_label<N: TreeNode>(node: &N) -> String {
    let description = content_description(node)
        .or_else(|| non_empty(node.text()))
        .unwrap_or_else(|| NO_TEXT_PLACEHOLDER.to_string());

    let descriptors = descriptors(&node.flags());
    if descriptors.is_empty() {
        description
    } else {
        format!("{}-{}", description, descriptors.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessibility::node::testing::*;
    use crate::accessibility::types::NodeRect;

    fn visible(flags: NodeFlags, parent: Option<usize>) -> FakeData {
        FakeData {
            flags,
            parent,
            bounds: NodeRect::new(0, 0, 100, 40),
            ..Default::default()
        }
    }

    fn clickable() -> NodeFlags {
        NodeFlags {
            clickable: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_label_with_descriptors() {
        let (_arena, nodes) = arena(vec![FakeData {
            content_description: Some("Submit".to_string()),
            text: Some("ignored".to_string()),
            flags: NodeFlags {
                checkable: true,
                checked: false,
                selected: false,
                focused: true,
                ..Default::default()
            },
            ..Default::default()
        }]);

        assert_eq!(build_label(&nodes[0]), "Submit-Checkable [Unchecked], Focused");
    }

    #[test]
    fn test_label_fallbacks() {
        let (_arena, nodes) = arena(vec![
            FakeData {
                text: Some("Hello".to_string()),
                ..Default::default()
            },
            FakeData::default(),
            FakeData {
                text: Some(" ".to_string()),
                ..Default::default()
            },
            FakeData {
                content_description: Some("  ".to_string()),
                text: Some("Fallback".to_string()),
                flags: NodeFlags {
                    checkable: true,
                    checked: true,
                    selected: true,
                    ..Default::default()
                },
                ..Default::default()
            },
        ]);

        assert_eq!(build_label(&nodes[0]), "Hello");
        assert_eq!(build_label(&nodes[1]), NO_TEXT_PLACEHOLDER);
        assert_eq!(build_label(&nodes[2]), NO_TEXT_PLACEHOLDER);
        assert_eq!(
            build_label(&nodes[3]),
            "Fallback-Checkable [Checked], Selected"
        );
    }

    #[test]
    fn test_nearest_clickable_ancestor() {
        let (_arena, nodes) = arena(vec![
            visible(clickable(), None),
            visible(NodeFlags::default(), Some(0)),
            visible(NodeFlags::default(), Some(1)),
        ]);
        let classifier = FocusabilityClassifier::new();

        assert_eq!(
            classifier.nearest_clickable_ancestor(&nodes[2]).map(|n| n.id),
            Some(0)
        );
        assert_eq!(
            classifier.nearest_clickable_ancestor(&nodes[0]).map(|n| n.id),
            Some(0)
        );
    }

    #[test]
    fn test_nearest_clickable_ancestor_exhausted() {
        let (_arena, nodes) = arena(vec![
            visible(NodeFlags::default(), None),
            visible(NodeFlags::default(), Some(0)),
        ]);

        assert!(FocusabilityClassifier::new()
            .nearest_clickable_ancestor(&nodes[1])
            .is_none());
    }

    #[test]
    fn test_nearest_clickable_ancestor_cyclic_chain() {
        let (_arena, nodes) = arena(vec![
            visible(NodeFlags::default(), Some(1)),
            visible(NodeFlags::default(), Some(0)),
        ]);

        assert!(FocusabilityClassifier::new()
            .with_max_depth(16)
            .nearest_clickable_ancestor(&nodes[0])
            .is_none());
    }

    #[test]
    fn test_focusable_heuristic() {
        let mut text_in_button = visible(NodeFlags::default(), Some(0));
        text_in_button.text = Some("OK".to_string());
        let mut standalone_text = visible(NodeFlags::default(), Some(2));
        standalone_text.text = Some("Title".to_string());
        let mut hidden = visible(clickable(), None);
        hidden.flags.visible_to_user = false;
        let mut zero_size = visible(clickable(), None);
        zero_size.bounds = NodeRect::new(10, 10, 10, 10);

        let (_arena, nodes) = arena(vec![
            visible(clickable(), None),
            text_in_button,
            visible(NodeFlags::default(), None),
            standalone_text,
            hidden,
            zero_size,
        ]);
        let classifier = FocusabilityClassifier::new();

        assert!(classifier.is_likely_focusable(&nodes[0]));
        assert!(!classifier.is_likely_focusable(&nodes[1]));
        assert!(!classifier.is_likely_focusable(&nodes[2]));
        assert!(classifier.is_likely_focusable(&nodes[3]));
        assert!(!classifier.is_likely_focusable(&nodes[4]));
        assert!(!classifier.is_likely_focusable(&nodes[5]));
    }
}
