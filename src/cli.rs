//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged with
//! the configuration from the `oddswatch.toml` file and environment variables.

use clap::Parser;
use figment::{
    value::{Dict, Map},
    Error, Figment, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Status page and test trigger for the OddsWatch monitoring bot.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address the status server binds to.
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port the status server listens on.
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Log level filter, e.g. "debug" or "oddswatch=trace".
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        // Only flags that were given override lower layers.
        let mut figment = Figment::new();

        if let Some(host) = &self.host {
            figment = figment.merge(("server.host", host));
        }

        if let Some(port) = self.port {
            figment = figment.merge(("server.port", port));
        }

        if let Some(level) = &self.log_level {
            figment = figment.merge(("log_level", level));
        }

        figment.data()
    }
}
