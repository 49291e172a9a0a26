use chrono::{DateTime, Utc};
use serde::Serialize;

use super::entry::{NavigationEntry, ScrollOffset};
use super::state::NavigationState;
use crate::accessibility::{
    build_label, FocusabilityClassifier, NodeSummarizer, NodeSummary, TreeNode,
};
use crate::overlay::OverlayPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Accumulating,
    Comparing,
}

/// Result of one completed snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotOutcome {
    pub generation: u64,
    pub labels: Vec<String>,
    pub diverged: bool,
    /// Offset handed back to the panel when the list did not change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restored_offset: Option<ScrollOffset>,
    /// Summaries of the accepted nodes, in list order
    pub summaries: Vec<NodeSummary>,
    pub completed_at: DateTime<Utc>,
}

/// Per-snapshot driver of the navigation list.
///
/// Phases run `Idle -> Accumulating -> Comparing -> Idle`. Callbacks that
/// arrive in the wrong phase are ignored, so an aborted snapshot is never
/// committed.
pub struct TraversalSession<N: TreeNode, P> {
    state: NavigationState<N::Ref>,
    phase: SessionPhase,
    panel: P,
    classifier: FocusabilityClassifier,
    summarizer: NodeSummarizer,
    summaries: Vec<NodeSummary>,
    generation: u64,
}

impl<N: TreeNode, P: OverlayPanel> TraversalSession<N, P> {
    pub fn new(panel: P, classifier: FocusabilityClassifier, summarizer: NodeSummarizer) -> Self {
        Self {
            state: NavigationState::new(),
            phase: SessionPhase::Idle,
            panel,
            classifier,
            summarizer,
            summaries: Vec::new(),
            generation: 0,
        }
    }

    /// Open a fresh generation for a new snapshot
    pub fn begin(&mut self) {
        if self.phase == SessionPhase::Accumulating {
            tracing::warn!(
                "Snapshot {} still in flight when a new one started, discarding {} entries",
                self.generation,
                self.state.current_entries().len()
            );
        }

        let offset = self.panel.scroll_offset();
        self.state.begin(offset);
        self.summaries.clear();
        self.panel.clear_rows();
        self.panel.scroll_to(ScrollOffset::ORIGIN);
        self.generation += 1;
        self.phase = SessionPhase::Accumulating;

        tracing::debug!(
            "Snapshot {} started (panel was at {},{})",
            self.generation,
            offset.x,
            offset.y
        );
    }

    /// Classify one visited node and append it when linear navigation would stop on it
    pub fn visit(&mut self, node: &N) {
        if self.phase != SessionPhase::Accumulating {
            return;
        }
        if !self.classifier.is_likely_focusable(node) {
            return;
        }

        let label = build_label(node);
        let summary = self.summarizer.summarize(node);
        tracing::trace!("Accepted '{}': {}", label, summary.to_json());

        self.summaries.push(summary);
        self.state.push(NavigationEntry::new(label, node.downgrade()));
    }

    /// Render the accumulated list, decide on scroll restoration and commit
    pub fn end(&mut self) -> Option<SnapshotOutcome> {
        if self.phase != SessionPhase::Accumulating {
            tracing::debug!("Ignoring snapshot end while {:?}", self.phase);
            return None;
        }
        self.phase = SessionPhase::Comparing;

        for (index, entry) in self.state.current_entries().iter().enumerate() {
            self.panel.add_row(index, &entry.label);
        }

        let diverged = self.state.has_diverged();
        let restored_offset = if diverged {
            None
        } else {
            let offset = self.state.previous_offset();
            self.panel.scroll_to(offset);
            Some(offset)
        };

        let labels: Vec<String> = self
            .state
            .current_entries()
            .iter()
            .map(|entry| entry.label.clone())
            .collect();
        self.state.commit();
        self.phase = SessionPhase::Idle;

        tracing::debug!(
            "Snapshot {} committed {} entries (diverged: {})",
            self.generation,
            labels.len(),
            diverged
        );

        Some(SnapshotOutcome {
            generation: self.generation,
            labels,
            diverged,
            restored_offset,
            summaries: std::mem::take(&mut self.summaries),
            completed_at: Utc::now(),
        })
    }

    /// Return to a clean Idle state: no entries, no rows, panel at the origin
    pub fn clear(&mut self) {
        if self.phase == SessionPhase::Accumulating {
            tracing::debug!(
                "Discarding in-flight snapshot {} ({} entries)",
                self.generation,
                self.state.current_entries().len()
            );
        }
        self.state.reset();
        self.summaries.clear();
        self.panel.clear_rows();
        self.panel.scroll_to(ScrollOffset::ORIGIN);
        self.phase = SessionPhase::Idle;
    }

    /// Click the node behind rendered row `index`.
    ///
    /// Resolves to the nearest clickable ancestor of the entry's node. A stale
    /// reference or a chain without clickable nodes is a silent no-op.
    pub fn click(&self, index: usize) -> bool {
        let Some(entry) = self.state.previous_entries().get(index) else {
            return false;
        };
        let Some(node) = entry.resolve() else {
            tracing::debug!("Entry {} ('{}') is stale, ignoring click", index, entry.label);
            return false;
        };

        match self.classifier.nearest_clickable_ancestor(&node) {
            Some(target) => target.perform_click(),
            None => {
                tracing::debug!("No clickable ancestor for entry {} ('{}')", index, entry.label);
                false
            }
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &NavigationState<N::Ref> {
        &self.state
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }
}
