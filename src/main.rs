use anyhow::{anyhow, Context};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use a11y_lens::config::{Config, OutputFormat};
use a11y_lens::overlay::{serializer, OverlayEvent};
use a11y_lens::replay::{ReplayScript, SnapshotReplayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.replay_script.clone())
        .ok_or_else(|| anyhow!("usage: a11y-lens <replay-script.json> (or set A11Y_REPLAY_SCRIPT)"))?;

    let script = ReplayScript::load(&path)
        .await
        .with_context(|| format!("Failed to load replay script {:?}", path))?;

    let mut replayer = SnapshotReplayer::new(&config);
    let mut events = replayer.subscribe();
    tracing::info!(
        "Replaying {:?} on overlay {}",
        path,
        replayer.overlay().activation_id()
    );

    // Events are drained after each step so the channel never lags
    for step in &script.steps {
        replayer.step(step);
        while let Ok(event) = events.try_recv() {
            print_event(&event, config.output)?;
        }
    }

    Ok(())
}

fn print_event(event: &OverlayEvent, output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string(event)?),
        OutputFormat::Text => {
            println!("{}", serializer::format_event(event));
            if let OverlayEvent::Snapshot { outcome, .. } = event {
                for (label, summary) in outcome.labels.iter().zip(&outcome.summaries) {
                    println!("--- {}\n{}", label, serializer::format_summary(summary));
                }
            }
        }
    }
    Ok(())
}
