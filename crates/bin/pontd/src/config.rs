//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `pont.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values. Ports, file paths, prompt and timeouts are
//! configuration rather than constants: the deployments this replaces
//! drifted apart on exactly those values.

use serde::Deserialize;

use pont_adapter_control_telnet::ControlConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Control channel settings.
    pub control: ControlConfig,
    /// Snapshot file settings.
    pub snapshot: SnapshotConfig,
    /// Periodic reconciliation settings.
    pub reconcile: ReconcileConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Snapshot file configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Path of the JSON state file shared with the ingestion side.
    pub path: String,
}

/// Periodic reconciliation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Tick interval in seconds; `0` disables the periodic loop
    /// (reconciliation stays demand-driven by client polls).
    pub tick_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `pont.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or the
    /// result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("pont.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PONT_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("PONT_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("PONT_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("PONT_CONTROL_HOST") {
            self.control.host = val;
        }
        if let Ok(val) = std::env::var("PONT_CONTROL_PORT") {
            if let Ok(port) = val.parse() {
                self.control.port = port;
            }
        }
        if let Ok(val) = std::env::var("PONT_SNAPSHOT_PATH") {
            self.snapshot.path = val;
        }
        if let Ok(val) = std::env::var("PONT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.control.prompt.is_empty() {
            return Err(ConfigError::Validation(
                "control prompt must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: "state.json".to_string(),
        }
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self { tick_secs: 0 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "pontd=info,pont=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
