//! Integration tests for the read-only status routes.

#[path = "../helpers/mod.rs"]
mod helpers;

use chrono::{Datelike, Local, Utc};
use futures::future::join_all;
use helpers::{app::TestAppBuilder, fake_sender::FakeSender};
use oddswatch::core::StatusSnapshot;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_api_status_reports_online() {
    let app = TestAppBuilder::new().start().await.unwrap();

    let response = app.get("/api/status").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "online");
    assert_eq!(body["monitoring"], true);

    let timestamp = body["timestamp"].as_i64().expect("timestamp must be an integer");
    assert!((Utc::now().timestamp() - timestamp).abs() <= 2);

    app.shutdown(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_api_status_timestamps_never_go_backwards() {
    let app = TestAppBuilder::new().start().await.unwrap();

    let mut previous = i64::MIN;
    for _ in 0..5 {
        let snapshot: StatusSnapshot = app.get("/api/status").await.json().await.unwrap();
        let now = Utc::now().timestamp();

        assert!(snapshot.timestamp_unix_seconds >= previous);
        assert!((now - snapshot.timestamp_unix_seconds).abs() <= 2);
        previous = snapshot.timestamp_unix_seconds;
    }

    app.shutdown(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_index_renders_html_status_page() {
    let app = TestAppBuilder::new().start().await.unwrap();

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"), "got {}", content_type);

    let html = response.text().await.unwrap();
    assert!(html.contains("Bot Status: <span class=\"text-success\">Online</span>"));
    assert!(html.contains("<li>Odds: 1.5 or higher</li>"));
    assert!(html.contains("<strong>/status</strong>"));
    assert!(html.contains(&format!("&copy; {}", Local::now().year())));

    app.shutdown(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_index_reflects_configured_criteria() {
    let mut builder = TestAppBuilder::new();
    builder.config.monitoring.sports = vec!["Tennis".to_string()];
    builder.config.monitoring.min_odds = 2.25;
    let app = builder.start().await.unwrap();

    let html = app.get("/").await.text().await.unwrap();

    assert!(html.contains("<li>Sports: Tennis</li>"));
    assert!(html.contains("<li>Odds: 2.25 or higher</li>"));

    app.shutdown(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_status_routes_are_side_effect_free_under_concurrency() {
    let sender = Arc::new(FakeSender::new());
    let app = TestAppBuilder::new()
        .with_sender(sender.clone())
        .start()
        .await
        .unwrap();

    let requests = (0..20).map(|i| {
        let path = if i % 2 == 0 { "/" } else { "/api/status" };
        app.get(path)
    });
    let responses = join_all(requests).await;

    assert!(responses.iter().all(|r| r.status() == StatusCode::OK));
    assert_eq!(sender.started(), 0);
    assert_eq!(app.dispatcher().in_flight(), 0);

    app.shutdown(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = TestAppBuilder::new().start().await.unwrap();

    assert_eq!(app.get("/api/unknown").await.status(), StatusCode::NOT_FOUND);

    app.shutdown(Duration::from_secs(5)).await.unwrap();
}
