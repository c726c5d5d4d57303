use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub channel: Channel,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    /// Checks the values that cannot be expressed through the type system alone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.path must not be empty".to_string(),
            ));
        }
        self.server.socket_addr()?;
        Ok(())
    }
}

/// Where the ledger document lives.
#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
    /// Path of the JSON ledger document. Created on first write.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self { path: default_storage_path() }
    }
}

/// The chat channel that receives sale notifications and period reports.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Channel {
    /// Incoming-webhook URL of the sales channel. Empty disables channel posts.
    #[serde(default)]
    pub webhook_url: String,
    /// Users mentioned on every new sale notification.
    #[serde(default)]
    pub notify_user_ids: Vec<String>,
    /// Post the "register a sale" prompt when the bot starts.
    #[serde(default)]
    pub announce_on_startup: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Server {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "server.bind_address '{}' is not a valid socket address",
                self.bind_address
            ))
        })
    }
}

impl Default for Server {
    fn default() -> Self {
        Self { bind_address: default_bind_address() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional directory for a daily rolling log file.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("database.json")
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
