//! The HTTP status surface: a human-readable page, a JSON liveness probe and
//! a manual trigger for a test notification.
//!
//! None of the operations hold state of their own. The presence of a response
//! is the liveness signal; nothing here checks the monitoring loop itself.

use crate::core::{MonitoringCriteria, NotificationSender, StatusSnapshot, TEST_MESSAGE};
use crate::formatting::render_status_page;
use crate::notification::{DispatchError, DispatchReceipt, NotificationDispatcher};
use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Outcome of the test trigger as reported to the HTTP caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerStatus {
    Success,
    Error,
}

/// JSON body returned by `/api/send-test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub status: TriggerStatus,
    pub message: String,
}

/// Answers status queries and schedules test notifications.
#[derive(Clone)]
pub struct StatusService {
    dispatcher: NotificationDispatcher,
    sender: Arc<dyn NotificationSender>,
    criteria: Arc<MonitoringCriteria>,
}

impl StatusService {
    pub fn new(
        dispatcher: NotificationDispatcher,
        sender: Arc<dyn NotificationSender>,
        criteria: MonitoringCriteria,
    ) -> Self {
        Self {
            dispatcher,
            sender,
            criteria: Arc::new(criteria),
        }
    }

    /// Renders the status page with the current local time.
    pub fn human_status(&self) -> String {
        render_status_page(&self.criteria, &Local::now())
    }

    /// Synthesizes a fresh status snapshot.
    pub fn machine_status(&self) -> StatusSnapshot {
        StatusSnapshot::now()
    }

    /// Schedules one test notification. Success means scheduled, not delivered.
    pub fn trigger_test_notification(&self) -> Result<DispatchReceipt, DispatchError> {
        self.dispatcher
            .dispatch(TEST_MESSAGE.to_string(), self.sender.clone())
    }

    /// Builds the router serving this service.
    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/api/status", get(api_status))
            .route("/api/send-test", get(send_test))
            .with_state(self)
    }
}

async fn index(State(service): State<StatusService>) -> Html<String> {
    Html(service.human_status())
}

async fn api_status(State(service): State<StatusService>) -> Json<StatusSnapshot> {
    Json(service.machine_status())
}

async fn send_test(State(service): State<StatusService>) -> (StatusCode, Json<TriggerResponse>) {
    match service.trigger_test_notification() {
        Ok(receipt) => {
            info!(in_flight = receipt.in_flight, "Test notification scheduled.");
            (
                StatusCode::OK,
                Json(TriggerResponse {
                    status: TriggerStatus::Success,
                    message: "Test message sent".to_string(),
                }),
            )
        }
        Err(e) => {
            error!(error = %e, "Error sending test message");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TriggerResponse {
                    status: TriggerStatus::Error,
                    message: e.to_string(),
                }),
            )
        }
    }
}
