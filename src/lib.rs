//! OddsWatch - status front-end for a sports-odds monitoring bot
//!
//! This library serves the bot's status over HTTP and dispatches test
//! notifications on detached tasks so requests never wait on the network.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod formatting;
pub mod notification;
pub mod server;
pub mod status;
pub mod task_manager;

// Re-export core types for convenience
pub use crate::core::*;
