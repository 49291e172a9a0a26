use crate::config::Config;
use crate::lifecycle::{all_true, Signal};

/// User preferences that gate the linear navigation overlay
#[derive(Debug, Clone)]
pub struct Preferences {
    linear_navigation: Signal,
    service_enabled: Signal,
}

impl Preferences {
    pub fn new(linear_navigation_enabled: bool, service_enabled: bool) -> Self {
        Self {
            linear_navigation: Signal::new(linear_navigation_enabled),
            service_enabled: Signal::new(service_enabled),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.linear_navigation_enabled, config.service_enabled)
    }

    pub fn linear_navigation(&self) -> &Signal {
        &self.linear_navigation
    }

    pub fn service_enabled(&self) -> &Signal {
        &self.service_enabled
    }

    pub fn set_linear_navigation_enabled(&self, enabled: bool) {
        tracing::info!("Linear navigation preference set to {}", enabled);
        self.linear_navigation.set(enabled);
    }

    pub fn set_service_enabled(&self, enabled: bool) {
        tracing::info!("Service enabled preference set to {}", enabled);
        self.service_enabled.set(enabled);
    }

    /// True while both the feature and the service are enabled
    pub fn linear_navigation_active(&self) -> Signal {
        all_true(&[self.linear_navigation.clone(), self.service_enabled.clone()])
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new(true, true)
    }
}
