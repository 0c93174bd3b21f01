//! Runtime configuration.

use game_core::CombatConfig;

/// Configuration shared by the combat manager and battle instances.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Capacity of each event bus topic channel.
    pub event_buffer_size: usize,
    /// Seed for the manager's fallback RNG stream; `None` seeds from entropy.
    pub default_seed: Option<u64>,
}

impl RuntimeConfig {
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

    pub fn new(combat: CombatConfig) -> Self {
        Self {
            combat,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
            default_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    pub fn with_event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = size.max(1);
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}
