#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use serde::{Deserialize, Serialize};

pub const DEFAULT_INITIAL_UNITS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Doctors on duty when the scheduler starts.
    pub initial_units: u64,
}

impl SchedulerConfig {
    pub fn with_initial_units(mut self, units: u64) -> Self {
        self.initial_units = units;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_units: DEFAULT_INITIAL_UNITS,
        }
    }
}

impl ConfigProvider for SchedulerConfig {
    fn initial_units(&self) -> u64 {
        self.initial_units
    }
}
