//! Unit tests for Feed Gateway

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::Instant;
use tower::ServiceExt;

use crate::api::{create_router, AppState};
use crate::config::FeedConfig;
use crate::stream::open_session;

fn seeded_state() -> AppState {
    AppState::new(FeedConfig {
        seed: Some(7),
        ..FeedConfig::default()
    })
}

fn app() -> Router {
    create_router(seeded_state())
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(app: Router, uri: &str, body: Value) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

// ============================================================================
// Snapshots
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let response = get(app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["healthy"], true);
    assert_eq!(body["service_id"], "feed-gateway");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_ready_reports_configured_service_name() {
    let state = AppState::new(FeedConfig {
        service_name: "feed-gateway-canary".to_string(),
        ..FeedConfig::default()
    });

    let response = get(create_router(state), "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["service_id"], "feed-gateway-canary");
}

#[tokio::test]
async fn test_metrics_point_count_follows_range() {
    let body = body_json(get(app(), "/api/metrics?timeRange=24h&environment=staging").await).await;
    for key in ["responseTime", "errorRate", "throughput", "cpuUsage", "memoryUsage", "diskUsage"] {
        assert_eq!(body[key].as_array().unwrap().len(), 96, "{}", key);
    }

    let body = body_json(get(app(), "/api/metrics?timeRange=bogus").await).await;
    assert_eq!(body["cpuUsage"].as_array().unwrap().len(), 60);
}

#[tokio::test]
async fn test_alerts_sorted_by_severity() {
    let body = body_json(get(app(), "/api/alerts").await).await;
    let rank = |s: &str| match s {
        "critical" => 0,
        "warning" => 1,
        _ => 2,
    };
    let ranks: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| rank(a["severity"].as_str().unwrap()))
        .collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_logs_newest_first() {
    let body = body_json(get(app(), "/api/logs").await).await;
    let logs = body.as_array().unwrap();
    assert_eq!(logs.len(), 50);

    let stamps: Vec<chrono::DateTime<chrono::Utc>> = logs
        .iter()
        .map(|l| l["timestamp"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_nested_snapshots_respond() {
    for uri in ["/api/servers", "/api/health", "/api/infrastructure", "/api/analytics", "/api/database"] {
        let response = get(app(), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    }

    let body = body_json(get(app(), "/api/database").await).await;
    let pool = &body["primary"]["metrics"]["connections"];
    assert_eq!(pool["max"], 100);
}

#[tokio::test]
async fn test_snapshots_are_counted() {
    let state = seeded_state();
    let app = create_router(state.clone());
    get(app.clone(), "/api/alerts").await;
    get(app.clone(), "/api/servers").await;

    let body = body_json(get(app, "/api/stats").await).await;
    assert_eq!(body["metrics"]["snapshots_served"], 2);
    assert_eq!(state.metrics.snapshots_served.get(), 2);
}

// ============================================================================
// Acknowledgement and notifications
// ============================================================================

#[tokio::test]
async fn test_acknowledge_two_alerts() {
    let response = post_json(
        app(),
        "/api/alerts/acknowledge",
        json!({ "alertIds": ["a1", "a2"], "acknowledgedBy": "x@y.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Successfully acknowledged 2 alert(s)");

    let acked = body["acknowledgedAlerts"].as_array().unwrap();
    assert_eq!(acked.len(), 2);
    for entry in acked {
        assert_eq!(entry["acknowledged"], true);
        assert_eq!(entry["acknowledgedBy"], "x@y.com");
        assert_eq!(entry["status"], "acknowledged");
        assert!(entry["notes"].is_null());
    }
}

#[tokio::test]
async fn test_acknowledge_requires_alert_ids() {
    let response = post_json(
        app(),
        "/api/alerts/acknowledge",
        json!({ "alertIds": [], "acknowledgedBy": "x@y.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Alert IDs are required");
}

#[tokio::test]
async fn test_acknowledge_requires_acknowledged_by() {
    let response = post_json(app(), "/api/alerts/acknowledge", json!({ "alertIds": ["a1"] })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Acknowledged by field is required");
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_acknowledgement_history_is_static() {
    post_json(
        app(),
        "/api/alerts/acknowledge",
        json!({ "alertIds": ["a1"], "acknowledgedBy": "x@y.com" }),
    )
    .await;

    let body = body_json(get(app(), "/api/alerts/acknowledge").await).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["acknowledgments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_send_notification() {
    let response = post_json(
        app(),
        "/api/notifications",
        json!({ "type": "slack", "alertId": "alert-1", "message": "CPU high" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Notification sent successfully");
    assert_eq!(body["notification"]["type"], "slack");
    assert!(body["notification"]["id"].as_str().unwrap().starts_with("notif-"));
}

#[tokio::test]
async fn test_send_notification_requires_type() {
    let response = post_json(app(), "/api/notifications", json!({ "alertId": "alert-1" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn test_metrics_csv_export() {
    let response = post_json(app(), "/api/export", json!({ "type": "metrics", "format": "csv" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers().clone();
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache, no-store, must-revalidate");
    assert_eq!(headers[header::PRAGMA], "no-cache");
    assert_eq!(headers[header::EXPIRES], "0");

    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"metrics-production-1h-"));
    assert!(disposition.ends_with(".csv\""));

    let text = body_text(response).await;
    assert_eq!(
        text.lines().next().unwrap(),
        "timestamp,responseTime,errorRate,throughput,cpuUsage,memoryUsage,diskUsage"
    );
    assert_eq!(text.lines().count(), 61);
}

#[tokio::test]
async fn test_json_export_is_default_format() {
    let response = post_json(app(), "/api/export", json!({ "type": "logs", "timeRange": "6h" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let body = body_json(response).await;
    assert_eq!(body["metadata"]["exportType"], "logs");
    assert_eq!(body["metadata"]["recordCount"], 500);
    assert_eq!(body["logs"].as_array().unwrap().len(), 500);
}

#[tokio::test]
async fn test_export_rejects_unknown_type_and_format() {
    let response = post_json(app(), "/api/export", json!({ "type": "traces" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(app(), "/api/export", json!({ "type": "alerts", "format": "xml" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(app(), "/api/export", json!({ "format": "csv" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Live log stream
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_stream_burst_arrives_first() {
    let state = seeded_state();
    let mut frames = open_session(&state);

    for expected in 0..10 {
        let frame = frames.try_recv().expect("burst frame should be buffered");
        let record: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(record["id"], format!("log-{}", expected));
    }
    assert!(frames.try_recv().is_err());

    let next = frames.recv().await.unwrap();
    let record: Value = serde_json::from_str(&next).unwrap();
    assert_eq!(record["id"], "log-10");
}

#[tokio::test(start_paused = true)]
async fn test_stream_ends_within_lifetime() {
    let state = seeded_state();
    let started = Instant::now();
    let mut frames = open_session(&state);

    let mut count = 0;
    while frames.recv().await.is_some() {
        count += 1;
    }

    assert!(started.elapsed() <= Duration::from_secs(300));
    // 10 burst frames plus one tick every 2-5 seconds
    assert!((69..=160).contains(&count), "{} frames", count);

    tokio::task::yield_now().await;
    assert_eq!(state.metrics.active_streams.get(), 0);
    assert_eq!(state.metrics.frames_emitted.get(), count);
}

#[tokio::test(start_paused = true)]
async fn test_stream_disconnect_releases_session() {
    let state = seeded_state();

    for _ in 0..5 {
        let frames = open_session(&state);
        assert_eq!(state.metrics.active_streams.get(), 1);
        drop(frames);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(state.metrics.active_streams.get(), 0);
    }

    let emitted = state.metrics.frames_emitted.get();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(state.metrics.frames_emitted.get(), emitted);
    assert_eq!(state.metrics.sessions_opened.get(), 5);
}

#[tokio::test]
async fn test_stream_endpoint_frames() {
    let response = get(app(), "/api/logs/stream").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let mut body = response.into_body();
    let frame = body.frame().await.unwrap().unwrap();
    let bytes = frame.into_data().unwrap();
    let text = std::str::from_utf8(&bytes).unwrap();

    assert!(text.starts_with("data: {"), "{}", text);
    assert!(text.ends_with("\n\n"));

    let record: Value = serde_json::from_str(text["data: ".len()..].trim_end()).unwrap();
    assert_eq!(record["id"], "log-0");
}
