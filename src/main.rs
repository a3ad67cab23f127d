//! OddsWatch - status front-end for the Tipsport monitoring bot
//!
//! Serves the bot's status page and JSON status, and lets an operator fire a
//! test notification without waiting for Telegram to answer.

use anyhow::Result;
use clap::Parser;
use oddswatch::{app::App, cli::Cli, config::Config};
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = match Config::load(&cli) {
        Ok(config) => config,
        Err(err) => {
            tracing_subscriber::fmt().init();
            error!("Failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("OddsWatch starting up...");
    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Listen Address: {}", config.server.bind_address());
    info!(
        "Telegram: {}",
        if config.telegram.is_some() {
            "Enabled"
        } else {
            "Disabled (log only)"
        }
    );
    match config.dispatch.max_in_flight {
        Some(limit) => info!("Max In-Flight Notifications: {}", limit),
        None => info!("Max In-Flight Notifications: Unlimited"),
    }
    info!("Monitored Sports: {}", config.monitoring.sports.join(", "));
    info!("-------------------------------------------------------");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let app = App::builder(config).build(shutdown_rx).await?;
    info!("OddsWatch ready on http://{}", app.local_addr());

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            return;
        }
        info!("Shutdown signal received. Shutting down gracefully...");
        let _ = shutdown_tx.send(true);
    });

    app.run().await
}
