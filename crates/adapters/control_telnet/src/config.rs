//! Control channel configuration.

use std::time::Duration;

use serde::Deserialize;

/// Where and how to reach the simulated device's monitor console.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Host the monitor listens on.
    pub host: String,
    /// TCP port of the monitor console.
    pub port: u16,
    /// Prompt sentinel the monitor emits when ready for the next command.
    pub prompt: String,
    /// Bound on each connect/prompt wait, in seconds.
    pub timeout_secs: u64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4321,
            prompt: "(raspberrypi3) ".to_string(),
            timeout_secs: 5,
        }
    }
}

impl ControlConfig {
    /// The `host:port` address of the monitor console.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The per-wait timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
