//! Fire-and-forget dispatch of notifications onto detached tasks.
//!
//! The dispatcher hands every message to its own tokio task and returns as
//! soon as that task is spawned. The task is never joined: whatever happens
//! inside the sender (an error, a panic, a slow network) is contained at the
//! task boundary and recorded to the log.

use crate::config::DispatchConfig;
use crate::core::NotificationSender;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, error, info_span, instrument, warn, Instrument};

/// Reasons a notification could not be handed off to a background task.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("notification message is empty")]
    EmptyMessage,

    #[error("no async runtime available to schedule the notification")]
    NoRuntime,

    #[error("too many notifications in flight (limit {limit})")]
    Saturated { limit: usize },
}

/// Returned when a send has been scheduled. Says nothing about delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReceipt {
    /// Sends in flight right after this one was scheduled, itself included.
    pub in_flight: usize,
}

/// Schedules notification sends without waiting for them.
#[derive(Debug, Clone, Default)]
pub struct NotificationDispatcher {
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Option<usize>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher honouring the configured in-flight cap.
    pub fn new(config: &DispatchConfig) -> Self {
        Self {
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: config.max_in_flight,
        }
    }

    /// Number of detached sends that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Schedules `sender.send(message)` on a detached task and returns immediately.
    ///
    /// An `Err` only ever means the send could not be scheduled. Delivery
    /// failures are logged by the background task and never reach the caller.
    #[instrument(skip_all, fields(len = message.len()))]
    pub fn dispatch(
        &self,
        message: String,
        sender: Arc<dyn NotificationSender>,
    ) -> Result<DispatchReceipt, DispatchError> {
        if message.trim().is_empty() {
            return Err(self.reject(DispatchError::EmptyMessage));
        }

        let handle = Handle::try_current().map_err(|_| self.reject(DispatchError::NoRuntime))?;
        let slot = self.reserve_slot().map_err(|e| self.reject(e))?;
        let in_flight = slot.count;

        handle.spawn(
            async move {
                let _slot = slot;
                deliver(sender, message).await;
            }
            .instrument(info_span!("notification_send")),
        );

        metrics::counter!("notifications_dispatched_total").increment(1);
        debug!(in_flight, "Notification scheduled.");
        Ok(DispatchReceipt { in_flight })
    }

    fn reserve_slot(&self) -> Result<InFlightSlot, DispatchError> {
        let limit = self.max_in_flight;
        let previous = self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| match limit {
                Some(limit) if n >= limit => None,
                _ => Some(n + 1),
            })
            .map_err(|_| DispatchError::Saturated {
                limit: limit.unwrap_or_default(),
            })?;

        Ok(InFlightSlot {
            counter: self.in_flight.clone(),
            count: previous + 1,
        })
    }

    fn reject(&self, err: DispatchError) -> DispatchError {
        metrics::counter!("notifications_rejected_total").increment(1);
        warn!(error = %err, "Notification could not be scheduled");
        err
    }
}

/// Holds one unit of the in-flight count until the send finishes.
struct InFlightSlot {
    counter: Arc<AtomicUsize>,
    count: usize,
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Runs the send to completion, converting every failure into a log record.
async fn deliver(sender: Arc<dyn NotificationSender>, message: String) {
    let outcome = AssertUnwindSafe(sender.send(&message)).catch_unwind().await;

    match outcome {
        Ok(Ok(())) => {
            metrics::counter!("notifications_delivered_total").increment(1);
            debug!("Notification delivered.");
        }
        Ok(Err(e)) => {
            metrics::counter!("notifications_failed_total").increment(1);
            error!(error = %e, "Notification delivery failed");
        }
        Err(panic) => {
            metrics::counter!("notifications_failed_total").increment(1);
            error!(panic = %panic_message(panic.as_ref()), "Notification sender panicked");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}
