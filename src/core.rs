//! Core domain types and service traits for OddsWatch
//!
//! This module defines the status data served over HTTP and the trait
//! contract for the notification channel consumed by the dispatcher.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The fixed message sent by the manual test trigger.
pub const TEST_MESSAGE: &str = "🧪 *Test Message*\n\nThis is a test notification from the Tipsport Monitoring Bot. \
If you're seeing this, the bot is working correctly!";

/// A point-in-time view of the agent's status, synthesized on every read.
///
/// The wire form is `{"status": "online", "monitoring": true, "timestamp": 1700000000}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Always `true` while the process is serving requests.
    #[serde(rename = "status", with = "online_flag")]
    pub online: bool,
    /// Whether the monitoring loop is claimed to be running.
    #[serde(rename = "monitoring")]
    pub monitoring_active: bool,
    /// Unix time in seconds at which the snapshot was taken.
    #[serde(rename = "timestamp")]
    pub timestamp_unix_seconds: i64,
}

impl StatusSnapshot {
    /// Takes a snapshot at the current wall-clock time.
    pub fn now() -> Self {
        Self {
            online: true,
            monitoring_active: true,
            timestamp_unix_seconds: Utc::now().timestamp(),
        }
    }
}

/// Maps the `online` flag to the `"online"` / `"offline"` status string.
mod online_flag {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(online: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *online { "online" } else { "offline" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match String::deserialize(deserializer)?.as_str() {
            "online" => Ok(true),
            "offline" => Ok(false),
            other => Err(D::Error::custom(format!("unknown status '{}'", other))),
        }
    }
}

/// The criteria the external monitor uses to pick matches. Descriptive only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringCriteria {
    /// Sports being watched, e.g. "Hockey".
    pub sports: Vec<String>,
    /// Minimum lead, in goals, of the winning side.
    pub min_goal_difference: u32,
    /// Minimum decimal odds offered on the leading side.
    pub min_odds: f64,
}

impl Default for MonitoringCriteria {
    fn default() -> Self {
        Self {
            sports: vec!["Hockey".to_string(), "Football".to_string()],
            min_goal_difference: 2,
            min_odds: 1.5,
        }
    }
}

/// A bot command handled by the external Telegram bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotCommand {
    pub name: &'static str,
    pub description: &'static str,
}

/// The commands the Telegram bot answers to.
pub const BOT_COMMANDS: &[BotCommand] = &[
    BotCommand {
        name: "/start",
        description: "Start the bot and get a welcome message",
    },
    BotCommand {
        name: "/help",
        description: "Get help information",
    },
    BotCommand {
        name: "/status",
        description: "Check if the bot is running",
    },
];

/// Trait for notification channels that can deliver a text message.
///
/// Implementations are shared between concurrently running sends and must
/// therefore be reentrant.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Delivers a message to the channel.
    async fn send(&self, message: &str) -> Result<()>;
}
