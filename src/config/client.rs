//! Client configuration
//!
//! Loads the clock client configuration from a TOML file (default `clock.toml`).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default configuration file name
pub const CONFIG_FILE: &str = "clock.toml";

/// Default clock endpoint
pub const DEFAULT_URL: &str = "ws://localhost:8080/clock";

/// Default delay between a closure and the next connection attempt
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 1000;

/// Errors that can occur during config operations
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Clock client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// WebSocket endpoint that pushes time updates
    #[serde(default = "default_url")]
    pub url: String,
    /// Fixed delay before reconnecting after a closure
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
    /// Optional limit on a single connection attempt
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_reconnect_delay_ms() -> u64 {
    DEFAULT_RECONNECT_DELAY_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            connect_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a file, falling back to defaults when it is missing
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Override the endpoint
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Override the reconnect delay
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "ws://localhost:8080/clock");
        assert_eq!(config.reconnect_delay(), Duration::from_millis(1000));
        assert!(config.connect_timeout().is_none());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let dir = tempdir().unwrap();
        let config = ClientConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "url = \"ws://10.0.0.5:9001/clock\"\n").unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.url, "ws://10.0.0.5:9001/clock");
        assert_eq!(config.reconnect_delay_ms, DEFAULT_RECONNECT_DELAY_MS);
        assert!(config.connect_timeout_ms.is_none());
    }

    #[test]
    fn test_load_full_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
url = "ws://clock.local/clock"
reconnect_delay_ms = 250
connect_timeout_ms = 3000
"#,
        )
        .unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.reconnect_delay(), Duration::from_millis(250));
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "reconnect_delay_ms = \"soon\"").unwrap();

        let result = ClientConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::default()
            .with_url("ws://127.0.0.1:1234/clock")
            .with_reconnect_delay(Duration::from_millis(50));
        assert_eq!(config.url, "ws://127.0.0.1:1234/clock");
        assert_eq!(config.reconnect_delay_ms, 50);
    }

    #[test]
    fn test_oversized_delay_saturates() {
        let config = ClientConfig::default().with_reconnect_delay(Duration::MAX);
        assert_eq!(config.reconnect_delay_ms, u64::MAX);
    }
}
