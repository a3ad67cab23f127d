//! Configuration management for OddsWatch
//!
//! This module defines the main `Config` struct and its sub-structs. It uses
//! the `figment` crate to layer defaults, an `oddswatch.toml` file,
//! environment variables and command-line flags, in that order.

use crate::cli::Cli;
use crate::core::MonitoringCriteria;
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The file read when no `--config` flag is given. Missing is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "oddswatch.toml";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Where the status server listens.
    pub server: ServerConfig,
    /// Limits for background notification sends.
    pub dispatch: DispatchConfig,
    /// Telegram credentials. Notifications are only logged when absent.
    pub telegram: Option<TelegramConfig>,
    /// The criteria shown on the status page.
    pub monitoring: MonitoringCriteria,
}

/// Bind parameters for the HTTP status server.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// The `host:port` string handed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Limits applied by the notification dispatcher.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct DispatchConfig {
    /// Reject new sends while this many are still running. Unlimited when unset.
    #[serde(default)]
    pub max_in_flight: Option<usize>,
}

/// Credentials and endpoint for the Telegram Bot API.
#[derive(Deserialize, Serialize, Clone, PartialEq)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Numeric chat ids arrive as integers from env vars and TOML.
    #[serde(deserialize_with = "string_or_integer")]
    pub chat_id: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn string_or_integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChatId {
        Text(String),
        Number(i64),
    }

    Ok(match ChatId::deserialize(deserializer)? {
        ChatId::Text(s) => s,
        ChatId::Number(n) => n.to_string(),
    })
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Config {
    /// Loads the application configuration, layering all sources.
    ///
    /// Environment overrides use the `ODDSWATCH_` prefix with `__` between
    /// sections, e.g. `ODDSWATCH_SERVER__PORT=8080`. The conventional
    /// `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID` variables are honoured too.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found at specified path: {}", path.display());
                }
                path.clone()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(telegram_env())
            .merge(Env::prefixed("ODDSWATCH_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

/// Maps the bare `TELEGRAM_*` variables onto the `telegram` section.
fn telegram_env() -> Env {
    Env::raw().filter_map(|key| {
        let key = key.as_str();
        if key.eq_ignore_ascii_case("TELEGRAM_BOT_TOKEN") {
            Some("telegram.bot_token".into())
        } else if key.eq_ignore_ascii_case("TELEGRAM_CHAT_ID") {
            Some("telegram.chat_id".into())
        } else {
            None
        }
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            dispatch: DispatchConfig::default(),
            telegram: None,
            monitoring: MonitoringCriteria::default(),
        }
    }
}
