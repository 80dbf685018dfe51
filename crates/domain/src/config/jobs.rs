use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cadence of the background jobs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobsConfig {
    /// Delay between reference-data reloads in milliseconds (default: 60000)
    #[serde(default = "default_reload_interval_ms")]
    pub reload_interval_ms: u64,

    /// Delay between stats flushes in milliseconds (default: 10000)
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,
}

impl JobsConfig {
    pub fn reload_interval(&self) -> Duration {
        Duration::from_millis(self.reload_interval_ms)
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            reload_interval_ms: default_reload_interval_ms(),
            flush_interval_ms: default_flush_interval_ms(),
        }
    }
}

fn default_reload_interval_ms() -> u64 {
    60_000
}

fn default_flush_interval_ms() -> u64 {
    10_000
}
