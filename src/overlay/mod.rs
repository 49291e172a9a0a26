//! Linear navigation overlay
//!
//! Wires the pieces together the way the host sees them:
//! - `AccessibilityListener` - snapshot callbacks delivered by the host
//! - `OverlayPanel` - the scrollable row list the overlay renders into
//! - `LinearNavigationOverlay` - gates a `TraversalSession` on the lifecycle
//!   signal and broadcasts what happened as `OverlayEvent`s

pub mod listener;
pub mod panel;
pub mod serializer;

use serde::Serialize;
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;
use tokio::sync::broadcast;

use crate::accessibility::{FocusabilityClassifier, NodeSummarizer, TreeNode};
use crate::config::Config;
use crate::lifecycle::{ListenerLifecycle, ListenerState};
use crate::navigation::{SnapshotOutcome, TraversalSession};
use crate::preferences::Preferences;

pub use listener::AccessibilityListener;
pub use panel::{InMemoryPanel, OverlayPanel};

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Events published by an overlay
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayEvent {
    Resumed {
        activation_id: String,
    },
    Paused {
        activation_id: String,
    },
    Cleared {
        activation_id: String,
    },
    Snapshot {
        activation_id: String,
        outcome: SnapshotOutcome,
    },
    EntryClicked {
        activation_id: String,
        index: usize,
        dispatched: bool,
    },
}

/// Overlay listing every stop of a linear navigation over the current screen.
///
/// Lives for one overlay activation. Snapshot callbacks are only forwarded to
/// the session while the lifecycle is resumed; pausing discards any snapshot
/// in flight and leaves the panel empty and scrolled to the origin.
pub struct LinearNavigationOverlay<N: TreeNode, P> {
    activation_id: String,
    session: Rc<RefCell<TraversalSession<N, P>>>,
    lifecycle: ListenerLifecycle,
    preferences: Preferences,
    pending_clear: Rc<Cell<bool>>,
    events: broadcast::Sender<OverlayEvent>,
}

impl<N, P> LinearNavigationOverlay<N, P>
where
    N: TreeNode + 'static,
    P: OverlayPanel + 'static,
{
    pub fn new(panel: P, preferences: Preferences, config: &Config) -> Self {
        let classifier = FocusabilityClassifier::new().with_max_depth(config.max_ancestor_depth);
        let summarizer =
            NodeSummarizer::new(config.platform_level).with_max_depth(config.max_ancestor_depth);
        let session = Rc::new(RefCell::new(TraversalSession::new(
            panel, classifier, summarizer,
        )));

        let activation_id = uuid::Uuid::new_v4().to_string();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let pending_clear = Rc::new(Cell::new(false));

        let lifecycle = {
            let session = session.clone();
            let pending_clear = pending_clear.clone();
            let events = events.clone();
            let activation_id = activation_id.clone();
            ListenerLifecycle::new(preferences.linear_navigation_active(), move |state| {
                tracing::info!("Overlay {} {:?}", activation_id, state);
                // A transition can fire from inside a host callback; defer the clear then.
                match session.try_borrow_mut() {
                    Ok(mut session) => session.clear(),
                    Err(_) => pending_clear.set(true),
                }
                let activation_id = activation_id.clone();
                let event = match state {
                    ListenerState::Resumed => OverlayEvent::Resumed { activation_id },
                    ListenerState::Paused => OverlayEvent::Paused { activation_id },
                };
                let _ = events.send(event);
            })
        };

        Self {
            activation_id,
            session,
            lifecycle,
            preferences,
            pending_clear,
            events,
        }
    }
}

impl<N: TreeNode, P: OverlayPanel> LinearNavigationOverlay<N, P> {
    pub fn activation_id(&self) -> &str {
        &self.activation_id
    }

    pub fn state(&self) -> ListenerState {
        self.lifecycle.state()
    }

    pub fn is_resumed(&self) -> bool {
        self.lifecycle.is_resumed()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OverlayEvent> {
        self.events.subscribe()
    }

    pub fn session(&self) -> Ref<'_, TraversalSession<N, P>> {
        self.apply_pending_clear();
        self.session.borrow()
    }

    pub fn panel(&self) -> Ref<'_, P> {
        self.apply_pending_clear();
        Ref::map(self.session.borrow(), |session| session.panel())
    }

    pub fn panel_mut(&self) -> RefMut<'_, P> {
        self.apply_pending_clear();
        RefMut::map(self.session.borrow_mut(), |session| session.panel_mut())
    }

    /// Turn the feature off, as the overlay's own "disable" control does
    pub fn disable(&self) {
        self.preferences.set_linear_navigation_enabled(false);
    }

    /// Handle a click on rendered row `index`. Ignored while paused.
    pub fn click_entry(&self, index: usize) -> bool {
        self.apply_pending_clear();
        if !self.is_resumed() {
            return false;
        }

        let dispatched = self.session.borrow().click(index);
        self.broadcast(OverlayEvent::EntryClicked {
            activation_id: self.activation_id.clone(),
            index,
            dispatched,
        });
        dispatched
    }

    fn broadcast(&self, event: OverlayEvent) {
        // Ignore send errors (no receivers)
        let _ = self.events.send(event);
    }

    /// Run a clear deferred by a transition, unless the session is still borrowed
    fn apply_pending_clear(&self) {
        if !self.pending_clear.get() {
            return;
        }
        if let Ok(mut session) = self.session.try_borrow_mut() {
            self.pending_clear.set(false);
            session.clear();
        }
    }
}

impl<N: TreeNode, P: OverlayPanel> AccessibilityListener<N> for LinearNavigationOverlay<N, P> {
    fn on_traversal_start(&mut self) {
        self.apply_pending_clear();
        if self.is_resumed() {
            self.session.borrow_mut().begin();
        }
    }

    fn on_visit_node(&mut self, node: &N) {
        self.apply_pending_clear();
        if self.is_resumed() {
            self.session.borrow_mut().visit(node);
        }
    }

    fn on_traversal_end(&mut self) {
        self.apply_pending_clear();
        if !self.is_resumed() {
            return;
        }

        let outcome = self.session.borrow_mut().end();
        if let Some(outcome) = outcome {
            tracing::debug!(
                "Overlay {} rendered:\n{}",
                self.activation_id,
                serializer::format_entries(&outcome.labels)
            );
            self.broadcast(OverlayEvent::Snapshot {
                activation_id: self.activation_id.clone(),
                outcome,
            });
        }
    }

    fn on_non_whitelisted_app(&mut self) {
        self.session.borrow_mut().clear();
        self.broadcast(OverlayEvent::Cleared {
            activation_id: self.activation_id.clone(),
        });
    }
}
