use serde::{Deserialize, Serialize};

/// Effect buffer capacity used when none is configured.
pub const DEFAULT_EFFECT_BUFFER: usize = 64;

/// Largest effect buffer a config may ask for.
pub const MAX_EFFECT_BUFFER: usize = 65_536;

/// Tunables for a single container instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Label attached to the container's log span (e.g., "settings-screen").
    #[serde(default = "default_name")]
    pub name: String,
    /// Capacity of the one-shot effect buffer (default: 64).
    /// Subscribers that fall further behind lose the oldest effects.
    #[serde(default = "default_effect_buffer")]
    pub effect_buffer: usize,
    /// Log every produced state/effect pair at TRACE level (default: true).
    #[serde(default = "default_log_transitions")]
    pub log_transitions: bool,
}

fn default_name() -> String {
    "mvi".to_string()
}

fn default_effect_buffer() -> usize {
    DEFAULT_EFFECT_BUFFER
}

fn default_log_transitions() -> bool {
    true
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            effect_buffer: default_effect_buffer(),
            log_transitions: default_log_transitions(),
        }
    }
}

impl ContainerConfig {
    /// Same configuration under a different log label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
