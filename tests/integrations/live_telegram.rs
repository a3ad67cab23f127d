//! Sends a real message through the Telegram Bot API.
//!
//! Requires `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`; run with
//! `--features live-tests`.

use oddswatch::config::TelegramConfig;
use oddswatch::core::{NotificationSender, TEST_MESSAGE};
use oddswatch::notification::TelegramSender;

#[tokio::test]
async fn test_live_telegram_send() {
    let (Ok(bot_token), Ok(chat_id)) = (
        std::env::var("TELEGRAM_BOT_TOKEN"),
        std::env::var("TELEGRAM_CHAT_ID"),
    ) else {
        eprintln!("TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID not set; skipping");
        return;
    };

    let sender = TelegramSender::new(&TelegramConfig {
        bot_token,
        chat_id,
        api_base_url: "https://api.telegram.org".to_string(),
        timeout_seconds: 10,
    })
    .unwrap();

    sender.send(TEST_MESSAGE).await.unwrap();
}
