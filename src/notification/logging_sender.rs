//! A sender that writes notifications to the log instead of a chat.
//!
//! Used when no Telegram credentials are configured, so the test trigger can
//! still be exercised end to end on a development machine.

use crate::core::NotificationSender;
use async_trait::async_trait;
use tracing::{info, instrument};

/// Logs every message at `info` level and always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSender;

#[async_trait]
impl NotificationSender for LoggingSender {
    #[instrument(skip_all)]
    async fn send(&self, message: &str) -> anyhow::Result<()> {
        info!(%message, "Notification (Telegram not configured)");
        Ok(())
    }
}
