//! Configuration loading and management.

use std::path::Path;

use ferrod_proto::CaseMapping;
use serde::Deserialize;
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
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server identity.
    #[serde(default)]
    pub server: ServerConfig,
    /// Message routing behaviour.
    #[serde(default)]
    pub messaging: MessagingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g. "irc.straylight.net"). Mass-message (`$`) masks
    /// are matched against this name.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Network name shown to clients.
    #[serde(default)]
    pub network: Option<String>,
    /// Server description.
    #[serde(default)]
    pub description: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            network: None,
            description: String::new(),
        }
    }
}

fn default_server_name() -> String {
    "localhost".to_string()
}

/// Message routing configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagingConfig {
    /// What to do when a banned member tries to speak.
    #[serde(default)]
    pub restrict_banned_users: BanPolicy,
    /// Casemapping for nickname and channel lookups.
    #[serde(default)]
    pub casemapping: CaseMapping,
}

/// Policy applied when a channel's ban list matches a would-be speaker.
///
/// The three values produce observably different wire output and must be
/// kept distinct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BanPolicy {
    /// Bans only block joining; the send-time check is skipped.
    #[default]
    Normal,
    /// Reject the message without telling the sender.
    RestrictSilent,
    /// Reject the message and send a "you're banned" numeric.
    RestrictNotify,
}
