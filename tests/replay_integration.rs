//! Integration tests for snapshot replay.
//!
//! These tests drive a full overlay activation from the JSON script in
//! `tests/fixtures/` and check the events, rendered rows and host clicks.
//!
//! Run with: cargo test --test replay_integration

use a11y_lens::accessibility::{NodeRef, TreeNode};
use a11y_lens::config::Config;
use a11y_lens::navigation::ScrollOffset;
use a11y_lens::overlay::{OverlayEvent, OverlayPanel};
use a11y_lens::replay::{ReplayScript, ReplayStep, SnapshotReplayer};
use tokio::sync::broadcast;

const WIFI_ROW: &str = "com.example.settings:id/wifi_row";

/// Path of the settings screen replay script
fn fixture_path() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    format!("{}/tests/fixtures/settings_replay.json", manifest_dir)
}

fn load_fixture() -> ReplayScript {
    let json = std::fs::read_to_string(fixture_path()).unwrap();
    ReplayScript::from_json(&json).unwrap()
}

fn drain(events: &mut broadcast::Receiver<OverlayEvent>) -> Vec<OverlayEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Test 1: Full script
// ============================================================================

#[test]
fn test_full_script_event_sequence() {
    let script = load_fixture();
    let mut replayer = SnapshotReplayer::new(&Config::default());
    let mut events = replayer.subscribe();

    replayer.run(&script);
    let events = drain(&mut events);

    let kinds: Vec<&str> = events
        .iter()
        .map(|event| match event {
            OverlayEvent::Resumed { .. } => "resumed",
            OverlayEvent::Paused { .. } => "paused",
            OverlayEvent::Cleared { .. } => "cleared",
            OverlayEvent::Snapshot { .. } => "snapshot",
            OverlayEvent::EntryClicked { .. } => "clicked",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "snapshot", "snapshot", "clicked", "snapshot", "paused", "resumed", "snapshot",
            "cleared"
        ]
    );

    let outcomes: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            OverlayEvent::Snapshot { outcome, .. } => Some(outcome),
            _ => None,
        })
        .collect();

    assert_eq!(
        outcomes[0].labels,
        labels(&[
            "[[No Text]]",
            "Wi-Fi switch-Checkable [Unchecked]",
            "Network details"
        ])
    );
    assert!(outcomes[0].diverged);

    assert!(!outcomes[1].diverged);
    assert_eq!(outcomes[1].restored_offset, Some(ScrollOffset::new(0, 150)));

    assert_eq!(
        outcomes[2].labels,
        labels(&[
            "[[No Text]]",
            "Wi-Fi switch-Checkable [Checked]",
            "Network details",
            "Add network-Focused"
        ])
    );
    assert!(outcomes[2].diverged);
    assert_eq!(outcomes[2].restored_offset, None);

    // The paused snapshot never ran, and resuming started from an empty list
    assert_eq!(outcomes[3].generation, 4);
    assert!(outcomes[3].diverged);

    assert!(replayer.overlay().panel().rows().is_empty());
}

// ============================================================================
// Test 2: Scroll retention
// ============================================================================

#[test]
fn test_scroll_kept_for_equivalent_snapshot() {
    let script = load_fixture();
    let mut replayer = SnapshotReplayer::new(&Config::default());

    for step in &script.steps[..3] {
        replayer.step(step);
    }

    let overlay = replayer.overlay();
    assert_eq!(overlay.panel().scroll_offset(), ScrollOffset::new(0, 150));
    assert_eq!(overlay.panel().rows().len(), 3);
}

#[test]
fn test_scroll_reset_for_changed_snapshot() {
    let script = load_fixture();
    let mut replayer = SnapshotReplayer::new(&Config::default());

    replayer.step(&script.steps[0]);
    replayer.step(&script.steps[1]);
    replayer.step(&script.steps[4]);

    let overlay = replayer.overlay();
    assert_eq!(overlay.panel().scroll_offset(), ScrollOffset::ORIGIN);
    assert_eq!(overlay.panel().rows().len(), 4);
}

// ============================================================================
// Test 3: Click routing
// ============================================================================

#[test]
fn test_click_routes_to_clickable_row() {
    let script = load_fixture();
    let mut replayer = SnapshotReplayer::new(&Config::default());

    replayer.step(&script.steps[0]);
    assert!(replayer.overlay().click_entry(1));

    let row = replayer.tree().unwrap().find_by_view_id(WIFI_ROW).unwrap();
    assert_eq!(row.click_count(), 1);

    // "Network details" has no clickable ancestor
    assert!(!replayer.overlay().click_entry(2));
    assert_eq!(row.click_count(), 1);
}

#[test]
fn test_click_after_tree_recycled_is_noop() {
    let script = load_fixture();
    let mut replayer = SnapshotReplayer::new(&Config::default());

    replayer.step(&script.steps[0]);
    let tree = replayer.tree().unwrap();
    let row = tree.find_by_view_id(WIFI_ROW).unwrap();
    let row_ref = row.downgrade();
    tree.recycle();

    assert!(!row.is_attached());
    assert!(row_ref.upgrade().is_none());
    assert!(!replayer.overlay().click_entry(0));
    assert_eq!(row.click_count(), 0);
}

// ============================================================================
// Test 4: Lifecycle gating
// ============================================================================

#[test]
fn test_disabled_preference_blocks_snapshots() {
    let config = Config {
        linear_navigation_enabled: false,
        ..Config::default()
    };
    let script = load_fixture();
    let mut replayer = SnapshotReplayer::new(&config);
    let mut events = replayer.subscribe();

    replayer.step(&script.steps[0]);
    assert!(drain(&mut events).is_empty());
    assert!(replayer.overlay().panel().rows().is_empty());

    replayer.step(&ReplayStep::SetPreference {
        preference: a11y_lens::replay::PreferenceKey::LinearNavigation,
        enabled: true,
    });
    replayer.step(&script.steps[0]);
    assert_eq!(replayer.overlay().panel().rows().len(), 3);
}

// ============================================================================
// Test 5: Summaries
// ============================================================================

#[test]
fn test_summaries_follow_accepted_nodes() {
    let script = load_fixture();
    let mut replayer = SnapshotReplayer::new(&Config::default());
    let mut events = replayer.subscribe();

    replayer.step(&script.steps[0]);
    let outcome = drain(&mut events)
        .into_iter()
        .find_map(|event| match event {
            OverlayEvent::Snapshot { outcome, .. } => Some(outcome),
            _ => None,
        })
        .unwrap();

    assert_eq!(outcome.summaries.len(), outcome.labels.len());
    let switch = outcome.summaries[1].to_json();
    assert_eq!(switch["windowTitle"], "Settings");
    assert_eq!(switch["windowType"], "TYPE_APPLICATION");
    assert_eq!(switch["boundsInScreen"], "[900,230][1040,310]");
    assert_eq!(
        switch["nodeClassPath"],
        serde_json::json!([
            "android.widget.FrameLayout",
            "android.widget.ScrollView",
            "android.widget.LinearLayout",
            "android.widget.Switch"
        ])
    );
    assert!(switch.get("text").is_none());
}

#[test]
fn test_summaries_respect_platform_level() {
    let config = Config {
        platform_level: a11y_lens::accessibility::PlatformLevel(23),
        ..Config::default()
    };
    let script = load_fixture();
    let mut replayer = SnapshotReplayer::new(&config);
    let mut events = replayer.subscribe();

    replayer.step(&script.steps[0]);
    let outcome = drain(&mut events)
        .into_iter()
        .find_map(|event| match event {
            OverlayEvent::Snapshot { outcome, .. } => Some(outcome),
            _ => None,
        })
        .unwrap();

    for summary in &outcome.summaries {
        assert!(!summary.contains_key("windowTitle"));
        assert!(summary.contains_key("windowType"));
    }
}

// ============================================================================
// Test 6: Async loading
// ============================================================================

#[tokio::test]
async fn test_load_script_from_disk() {
    let script = ReplayScript::load(fixture_path()).await.unwrap();
    assert_eq!(script.steps.len(), 10);
    assert_eq!(script.snapshot_count(), 5);

    let missing = ReplayScript::load("/nonexistent/replay.json").await;
    assert!(matches!(missing, Err(a11y_lens::AppError::Io(_))));
}
