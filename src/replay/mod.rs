//! Snapshot replay
//!
//! Drives an overlay from a recorded script instead of a live host, which is
//! how the binary and the integration tests exercise the engine.

pub mod executor;
pub mod script;

pub use executor::SnapshotReplayer;
pub use script::{PreferenceKey, ReplayScript, ReplayStep};
