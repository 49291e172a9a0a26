//! Accessibility tree access
//!
//! Read-only view of the host's UI tree plus the per-node logic the
//! navigation engine builds on:
//! - `TreeNode` / `NodeRef` - host node view and its non-owning handle
//! - `NodeSummarizer` - canonical, capability-aware attribute summaries
//! - `FocusabilityClassifier` - which nodes linear navigation stops on
//! - `SnapshotTree` - in-memory tree used for replay and tests

pub mod focus;
pub mod node;
pub mod snapshot;
pub mod summary;
pub mod types;

pub use focus::{build_label, FocusabilityClassifier, NO_TEXT_PLACEHOLDER};
pub use node::{ancestors, NodeRef, TreeNode, DEFAULT_MAX_ANCESTOR_DEPTH};
pub use snapshot::{NodeSpec, SnapshotNode, SnapshotNodeRef, SnapshotTree};
pub use summary::{NodeSummarizer, NodeSummary, SummaryValue};
pub use types::{NodeFlags, NodeRect, PlatformLevel, WindowInfo, WindowType};
