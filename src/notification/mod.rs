//! Delivers notifications to the agent's chat channel.
//!
//! The [`dispatcher`] schedules sends on detached tasks so the HTTP request
//! path never waits on the network. The senders implement
//! [`NotificationSender`](crate::core::NotificationSender): [`telegram`] for
//! production and [`logging_sender`] as the fallback when Telegram is not
//! configured.
pub mod dispatcher;
pub mod logging_sender;
pub mod telegram;

pub use dispatcher::{DispatchError, DispatchReceipt, NotificationDispatcher};
pub use logging_sender::LoggingSender;
pub use telegram::TelegramSender;
