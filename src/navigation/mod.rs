//! Linear navigation list
//!
//! Turns a stream of tree snapshots into the ordered list of stops a linear
//! navigation would visit, keeping the previous generation around so an
//! unchanged list can keep the user's scroll position.

pub mod entry;
pub mod session;
pub mod state;

pub use entry::{NavigationEntry, ScrollOffset};
pub use session::{SessionPhase, SnapshotOutcome, TraversalSession};
pub use state::{have_diverged, NavigationState};
