use tokio::sync::broadcast;

use super::script::{PreferenceKey, ReplayScript, ReplayStep};
use crate::accessibility::{SnapshotNode, SnapshotTree};
use crate::config::Config;
use crate::navigation::ScrollOffset;
use crate::overlay::{
    AccessibilityListener, InMemoryPanel, LinearNavigationOverlay, OverlayEvent, OverlayPanel,
};
use crate::preferences::Preferences;

/// Replays recorded snapshots against one overlay activation.
///
/// Only the most recent tree is kept alive; the previous one is recycled when
/// a new snapshot arrives, so entries from older generations go stale the way
/// they do on a live host.
pub struct SnapshotReplayer {
    overlay: LinearNavigationOverlay<SnapshotNode, InMemoryPanel>,
    tree: Option<SnapshotTree>,
}

impl SnapshotReplayer {
    pub fn new(config: &Config) -> Self {
        Self {
            overlay: LinearNavigationOverlay::new(
                InMemoryPanel::new(),
                Preferences::from_config(config),
                config,
            ),
            tree: None,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OverlayEvent> {
        self.overlay.subscribe()
    }

    pub fn overlay(&self) -> &LinearNavigationOverlay<SnapshotNode, InMemoryPanel> {
        &self.overlay
    }

    /// The tree delivered by the latest snapshot step
    pub fn tree(&self) -> Option<&SnapshotTree> {
        self.tree.as_ref()
    }

    /// Execute every step of `script` in order
    pub fn run(&mut self, script: &ReplayScript) {
        tracing::info!(
            "Replaying {} steps ({} snapshots)",
            script.steps.len(),
            script.snapshot_count()
        );
        for step in &script.steps {
            self.step(step);
        }
    }

    /// Execute a single step
    pub fn step(&mut self, step: &ReplayStep) {
        match step {
            ReplayStep::Snapshot { root } => {
                if let Some(old) = self.tree.take() {
                    old.recycle();
                }
                let tree = SnapshotTree::from_spec(root);
                tree.walk(&mut self.overlay);
                self.tree = Some(tree);
            }
            ReplayStep::Scroll { x, y } => {
                self.overlay
                    .panel_mut()
                    .scroll_to(ScrollOffset::new(*x, *y));
            }
            ReplayStep::Click { index } => {
                self.overlay.click_entry(*index);
            }
            ReplayStep::SetPreference {
                preference,
                enabled,
            } => {
                let preferences = self.overlay.preferences();
                match preference {
                    PreferenceKey::LinearNavigation => {
                        preferences.set_linear_navigation_enabled(*enabled)
                    }
                    PreferenceKey::ServiceEnabled => preferences.set_service_enabled(*enabled),
                }
            }
            ReplayStep::LeaveApp => self.overlay.on_non_whitelisted_app(),
        }
    }
}
