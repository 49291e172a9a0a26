//! Listener lifecycle
//!
//! Gates snapshot processing on a combined boolean signal. The overlay only
//! participates in snapshots while every input signal holds.

pub mod signal;

use serde::Serialize;

pub use signal::{all_true, Signal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerState {
    Resumed,
    Paused,
}

impl ListenerState {
    fn from_active(active: bool) -> Self {
        if active {
            Self::Resumed
        } else {
            Self::Paused
        }
    }
}

/// Tracks whether a listener is resumed, following an "active" signal
pub struct ListenerLifecycle {
    signal: Signal,
}

impl ListenerLifecycle {
    /// Follow `signal`, calling `on_transition` with the initial state right away
    /// and again on every change.
    pub fn new(signal: Signal, mut on_transition: impl FnMut(ListenerState) + 'static) -> Self {
        on_transition(ListenerState::from_active(signal.get()));
        signal.subscribe(move |active| on_transition(ListenerState::from_active(active)));

        Self { signal }
    }

    pub fn state(&self) -> ListenerState {
        ListenerState::from_active(self.signal.get())
    }

    pub fn is_resumed(&self) -> bool {
        self.state() == ListenerState::Resumed
    }
}
