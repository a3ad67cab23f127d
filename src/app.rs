//! The main application logic, decoupled from the entry point.

use crate::{
    config::Config,
    core::NotificationSender,
    notification::{LoggingSender, NotificationDispatcher, TelegramSender},
    server::StatusServer,
    status::StatusService,
    task_manager::TaskManager,
};
use anyhow::{Context, Result};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

/// A handle to the running application.
pub struct App {
    task_manager: TaskManager,
    local_addr: SocketAddr,
    dispatcher: NotificationDispatcher,
}

impl App {
    /// Creates a new `AppBuilder` to construct an `App`.
    pub fn builder(config: Config) -> AppBuilder {
        AppBuilder::new(config)
    }

    /// The address the status server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The dispatcher shared with the status routes.
    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }

    /// Waits for the shutdown signal and then stops the managed tasks.
    ///
    /// Notification sends still in flight are not awaited.
    pub async fn run(self) -> Result<()> {
        let mut shutdown_rx = self.task_manager.get_shutdown_rx();
        shutdown_rx.changed().await.ok();
        info!("Shutdown signal received. Waiting for tasks to complete...");

        let abandoned = self.dispatcher.in_flight();
        if abandoned > 0 {
            warn!(abandoned, "Exiting with notification sends still in flight.");
        }

        self.task_manager.shutdown().await;
        info!("All tasks shut down.");
        Ok(())
    }
}

/// Builder for the main application.
///
/// Construction happens once at start-up. The overrides let tests swap the
/// notification channel and the listener.
pub struct AppBuilder {
    config: Config,
    sender_override: Option<Arc<dyn NotificationSender>>,
    listener_override: Option<TcpListener>,
}

impl AppBuilder {
    /// Creates a new `AppBuilder` with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sender_override: None,
            listener_override: None,
        }
    }

    /// Overrides the notification sender for testing.
    pub fn sender_override(mut self, sender: Arc<dyn NotificationSender>) -> Self {
        self.sender_override = Some(sender);
        self
    }

    /// Serves on an already bound listener instead of binding from config.
    pub fn listener_override(mut self, listener: TcpListener) -> Self {
        self.listener_override = Some(listener);
        self
    }

    /// Builds all components and starts serving, returning a runnable `App`.
    #[instrument(skip_all)]
    pub async fn build(self, shutdown_rx: watch::Receiver<bool>) -> Result<App> {
        let config = self.config;
        let task_manager = TaskManager::new(shutdown_rx);

        let sender = match self.sender_override {
            Some(sender) => sender,
            None => sender_from_config(&config)?,
        };

        let dispatcher = NotificationDispatcher::new(&config.dispatch);
        let service = StatusService::new(dispatcher.clone(), sender, config.monitoring.clone());

        let listener = match self.listener_override {
            Some(listener) => listener,
            None => {
                let address = config.server.bind_address();
                TcpListener::bind(&address)
                    .await
                    .with_context(|| format!("failed to bind status server to {}", address))?
            }
        };
        let local_addr = listener.local_addr()?;

        let server = StatusServer::new(listener, service.router(), task_manager.get_shutdown_rx());
        task_manager.spawn("StatusServer", server.run());

        Ok(App {
            task_manager,
            local_addr,
            dispatcher,
        })
    }
}

/// Picks the Telegram sender when configured, otherwise the logging fallback.
fn sender_from_config(config: &Config) -> Result<Arc<dyn NotificationSender>> {
    match &config.telegram {
        Some(telegram) => {
            info!(chat_id = %telegram.chat_id, "Notifications will be sent to Telegram.");
            Ok(Arc::new(TelegramSender::new(telegram)?))
        }
        None => {
            warn!("Telegram is not configured; notifications will only be logged.");
            Ok(Arc::new(LoggingSender))
        }
    }
}
