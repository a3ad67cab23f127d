//! # Status Server
//!
//! This module defines the `StatusServer`, which runs the `axum` web server
//! exposing the status routes. The server listens to a shutdown signal from
//! the main application and stops serving as soon as it fires.

use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, trace};

/// Serves a router on an already bound listener until shutdown.
pub struct StatusServer {
    listener: TcpListener,
    router: Router,
    shutdown_rx: watch::Receiver<bool>,
}

impl StatusServer {
    /// Creates a new `StatusServer` but does not spawn it.
    ///
    /// # Arguments
    ///
    /// * `listener` - A `TcpListener` that has already been bound to an address.
    /// * `router` - The routes to serve.
    /// * `shutdown_rx` - A watch channel receiver for graceful shutdown.
    pub fn new(listener: TcpListener, router: Router, shutdown_rx: watch::Receiver<bool>) -> Self {
        Self {
            listener,
            router,
            shutdown_rx,
        }
    }

    /// Returns a future that runs the server until a shutdown signal is received.
    pub fn run(self) -> impl Future<Output = ()> {
        let Self {
            listener,
            router,
            mut shutdown_rx,
        } = self;

        async move {
            if let Ok(addr) = listener.local_addr() {
                info!(%addr, "Status server listening.");
            }

            tokio::select! {
                biased;
                _ = shutdown_rx.changed() => {
                    trace!("Status server received shutdown signal via select.");
                }
                result = axum::serve(listener, router.into_make_service()) => {
                    if let Err(e) = result {
                        error!(error = %e, "Status server error");
                    }
                }
            }
            trace!("Status server task finished.");
        }
    }
}
