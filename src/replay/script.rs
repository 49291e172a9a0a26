use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::accessibility::NodeSpec;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceKey {
    LinearNavigation,
    ServiceEnabled,
}

/// One recorded host interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayStep {
    /// Deliver a full tree snapshot
    Snapshot { root: NodeSpec },
    /// The user scrolls the overlay panel
    Scroll { x: u32, y: u32 },
    /// The user clicks a rendered row (0-based)
    Click { index: usize },
    SetPreference {
        preference: PreferenceKey,
        enabled: bool,
    },
    /// The foreground app left the inspection whitelist
    LeaveApp,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AppError::InvalidScript(e.to_string()))
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        tracing::debug!("Loaded replay script {:?} ({} bytes)", path, json.len());
        Self::from_json(&json)
    }

    pub fn snapshot_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, ReplayStep::Snapshot { .. }))
            .count()
    }
}
