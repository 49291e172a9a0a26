//! Linear navigation diagnostics for accessibility trees.
//!
//! Consumes snapshots of a host UI tree, summarizes nodes, and maintains the
//! ordered list of stops a linear (screen reader style) navigation would make,
//! detecting when that list changes between snapshots.

pub mod accessibility;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod navigation;
pub mod overlay;
pub mod preferences;
pub mod replay;

pub use error::{AppError, Result};
