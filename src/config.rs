use std::env;
use std::path::PathBuf;

use crate::accessibility::{PlatformLevel, DEFAULT_MAX_ANCESTOR_DEPTH};

/// How the binary prints overlay events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub platform_level: PlatformLevel,
    pub max_ancestor_depth: usize,
    pub linear_navigation_enabled: bool,
    pub service_enabled: bool,
    pub replay_script: Option<PathBuf>,
    pub output: OutputFormat,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            platform_level: env::var("A11Y_PLATFORM_LEVEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(PlatformLevel)
                .unwrap_or(defaults.platform_level),
            max_ancestor_depth: env::var("A11Y_MAX_ANCESTOR_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|depth| *depth > 0)
                .unwrap_or(defaults.max_ancestor_depth),
            linear_navigation_enabled: env_flag("A11Y_LINEAR_NAVIGATION")
                .unwrap_or(defaults.linear_navigation_enabled),
            service_enabled: env_flag("A11Y_SERVICE_ENABLED").unwrap_or(defaults.service_enabled),
            replay_script: env::var("A11Y_REPLAY_SCRIPT").ok().map(PathBuf::from),
            output: match env::var("A11Y_OUTPUT").as_deref() {
                Ok("text") => OutputFormat::Text,
                Ok("json") | Err(_) => OutputFormat::Json,
                Ok(other) => {
                    tracing::warn!("Unknown output format '{}', using json", other);
                    OutputFormat::Json
                }
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform_level: PlatformLevel::P,
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
            linear_navigation_enabled: true,
            service_enabled: true,
            replay_script: None,
            output: OutputFormat::Json,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!("Ignoring unparseable {}={}", name, value);
            None
        }
    }
}
