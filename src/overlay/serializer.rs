use super::OverlayEvent;
use crate::accessibility::NodeSummary;
use crate::navigation::SnapshotOutcome;

const MAX_LABEL_LEN: usize = 60;

/// Format navigation labels as a numbered list
///
/// Example output:
/// ```text
/// [1] Username
/// [2] Remember me-Checkable [Checked]
/// [3] Sign in-Focused
/// ```
pub fn format_entries(labels: &[String]) -> String {
    if labels.is_empty() {
        return "  (no navigable elements)".to_string();
    }

    labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!("[{}] {}", i + 1, truncate_str(label, MAX_LABEL_LEN)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a node summary as `key=value` lines for debugging
pub fn format_summary(summary: &NodeSummary) -> String {
    summary
        .iter()
        .map(|(key, value)| match value.as_list() {
            Some(items) => format!("{}={}", key, items.join(" > ")),
            None => format!("{}={}", key, value.as_text().unwrap_or_default()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable report of one snapshot
pub fn format_outcome(outcome: &SnapshotOutcome) -> String {
    let mut lines = Vec::new();

    let scroll = match outcome.restored_offset {
        Some(offset) => format!("scroll restored to ({}, {})", offset.x, offset.y),
        None => "scroll reset".to_string(),
    };
    lines.push(format!(
        "Snapshot {}: {} entries, {}",
        outcome.generation,
        outcome.labels.len(),
        if outcome.diverged {
            format!("list changed, {}", scroll)
        } else {
            format!("list unchanged, {}", scroll)
        }
    ));
    lines.push(format_entries(&outcome.labels));

    lines.join("\n")
}

/// One-line (or multi-line for snapshots) text form of an event
pub fn format_event(event: &OverlayEvent) -> String {
    match event {
        OverlayEvent::Resumed { activation_id } => format!("Overlay {} resumed", activation_id),
        OverlayEvent::Paused { activation_id } => format!("Overlay {} paused", activation_id),
        OverlayEvent::Cleared { activation_id } => format!("Overlay {} cleared", activation_id),
        OverlayEvent::Snapshot { outcome, .. } => format_outcome(outcome),
        OverlayEvent::EntryClicked {
            index, dispatched, ..
        } => format!(
            "Clicked [{}] ({})",
            index + 1,
            if *dispatched { "dispatched" } else { "ignored" }
        ),
    }
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
