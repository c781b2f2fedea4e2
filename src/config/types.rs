//! Core configuration types and loading.

use chatrelay_proto::{DEFAULT_ANONYMOUS_NAME, DEFAULT_MAX_LINE_LEN, DEFAULT_NAME_MAX_LEN};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
///
/// Every section is optional; a missing file section falls back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server information.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Line, name and queue limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Identification and shutdown timeouts.
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Name used in log output.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Prefix for generated names of clients that send an empty identity line.
    /// The connection id is appended (e.g. "anonymousClient7").
    #[serde(default = "default_anonymous_name")]
    pub anonymous_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            anonymous_name: default_anonymous_name(),
        }
    }
}

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "[::]:8080").
    #[serde(default = "default_listen_address")]
    pub address: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_listen_address(),
        }
    }
}

/// Input and fan-out limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Longest accepted inbound line in bytes, terminator excluded (default: 4096).
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Longest display name in characters; longer names are cut (default: 32).
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    /// Lines buffered per client before further deliveries to it are dropped (default: 256).
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            max_name_length: default_max_name_length(),
            outbound_queue: default_outbound_queue(),
        }
    }
}

/// Timeout configuration, in seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutsConfig {
    /// Seconds allowed for the identity line before disconnect (default: 60).
    #[serde(default = "default_identify_timeout")]
    pub identify: u64,
    /// Seconds to wait for open sessions to close on shutdown (default: 5).
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            identify: default_identify_timeout(),
            shutdown_grace: default_shutdown_grace(),
        }
    }
}

fn default_server_name() -> String {
    "chatrelayd".to_string()
}

fn default_anonymous_name() -> String {
    DEFAULT_ANONYMOUS_NAME.to_string()
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0u16; 8], 8080))
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LEN
}

fn default_max_name_length() -> usize {
    DEFAULT_NAME_MAX_LEN
}

fn default_outbound_queue() -> usize {
    256
}

fn default_identify_timeout() -> u64 {
    60
}

fn default_shutdown_grace() -> u64 {
    5
}
