//! A client for sending notifications through the Telegram Bot API.

use crate::config::TelegramConfig;
use crate::core::NotificationSender;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::time::Duration;
use tracing::{error, info, instrument};

/// The subset of a Bot API response the client inspects.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to a single Telegram chat via `sendMessage`.
pub struct TelegramSender {
    client: reqwest::Client,
    api_base_url: String,
    bot_token: String,
    chat_id: String,
}

impl fmt::Debug for TelegramSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramSender")
            .field("api_base_url", &self.api_base_url)
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramSender {
    /// Creates a new `TelegramSender` from its configuration section.
    pub fn new(config: &TelegramConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("failed to build Telegram HTTP client")?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base_url, self.bot_token)
    }
}

#[async_trait]
impl NotificationSender for TelegramSender {
    #[instrument(skip(self, message), fields(chat_id = %self.chat_id, len = message.len()))]
    async fn send(&self, message: &str) -> anyhow::Result<()> {
        let payload = json!({
            "chat_id": self.chat_id,
            "text": message,
            "parse_mode": "Markdown",
        });

        // reqwest errors embed the URL, which carries the token.
        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(timeout = e.is_timeout(), "HTTP request to Telegram failed");
                anyhow::anyhow!(
                    "HTTP request to Telegram failed: {}",
                    e.without_url()
                )
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let api: Option<ApiResponse> = serde_json::from_str(&body).ok();

        match api {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => {
                info!("Successfully sent message to Telegram.");
                Ok(())
            }
            Some(ApiResponse { description, .. }) => {
                let description = description.unwrap_or_else(|| "no description".to_string());
                error!(status = %status, description = %description, "Telegram rejected the message");
                anyhow::bail!(
                    "Failed to send Telegram message: status {}, description: {}",
                    status,
                    description
                );
            }
            None => {
                error!(status = %status, body = %body, "Unexpected response from Telegram");
                anyhow::bail!(
                    "Failed to send Telegram message: status {}, body: {}",
                    status,
                    body
                );
            }
        }
    }
}
