//! Feed Gateway REST API

use axum::{
    extract::{Query, State},
    http::header,
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use futures_util::stream::Stream;
use parking_lot::Mutex;
use pulse_core::{HealthStatus, ReadinessStatus};
use pulse_synth::export::{filename, DEFAULT_ENVIRONMENT, DEFAULT_TIME_RANGE};
use pulse_synth::notifications::{dispatch_notification, notification_overview, SentNotification};
use pulse_synth::snapshots::{
    generate_analytics_snapshot, generate_database_snapshot, generate_health_snapshot,
    generate_infrastructure_snapshot,
};
use pulse_synth::{
    acknowledge, acknowledgement_history, environment_multiplier, generate_alerts,
    generate_log_batch, generate_metric_series, generate_server_snapshots, point_count_for,
    AlertAcknowledgement, ExportBundle, ExportFormat, ExportKind, ExportParams,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tracing::info;

use crate::config::FeedConfig;
use crate::error::{FeedError, Result};
use crate::metrics::FeedMetrics;
use crate::stream;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FeedConfig>,
    pub rng: Arc<Mutex<StdRng>>,
    pub metrics: FeedMetrics,
    pub started_at: std::time::Instant,
}

impl AppState {
    pub fn new(config: FeedConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config: Arc::new(config),
            rng: Arc::new(Mutex::new(rng)),
            metrics: FeedMetrics::new(),
            started_at: std::time::Instant::now(),
        }
    }

    pub fn health_status(&self) -> HealthStatus {
        HealthStatus {
            healthy: true,
            service_id: self.config.service_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.started_at.elapsed().as_secs(),
        }
    }

    /// Everything is generated in-process, so the feed is ready once it listens.
    pub fn readiness_status(&self) -> ReadinessStatus {
        ReadinessStatus {
            ready: true,
            service_id: self.config.service_name.clone(),
        }
    }

    /// Run a synchronous draw against the shared source
    pub fn with_rng<T>(&self, draw: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock();
        draw(&mut *rng)
    }

    fn snapshot<T>(&self, generate: impl FnOnce(&mut StdRng, DateTime<Utc>) -> T) -> Json<T> {
        self.metrics.snapshots_served.inc();
        Json(self.with_rng(|rng| generate(rng, Utc::now())))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Snapshots
        .route("/api/metrics", get(get_metrics))
        .route("/api/alerts", get(get_alerts))
        .route("/api/servers", get(get_servers))
        .route("/api/logs", get(get_logs))
        .route("/api/health", get(get_health))
        .route("/api/infrastructure", get(get_infrastructure))
        .route("/api/analytics", get(get_analytics))
        .route("/api/database", get(get_database))
        // Alert handling
        .route(
            "/api/alerts/acknowledge",
            get(get_acknowledgements).post(acknowledge_alerts),
        )
        .route(
            "/api/notifications",
            get(get_notifications).post(send_notification),
        )
        // Export and stream
        .route("/api/export", post(export_data))
        .route("/api/logs/stream", get(stream_logs))
        // Stats
        .route("/api/stats", get(get_stats))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.health_status())
}

async fn ready(State(state): State<AppState>) -> Json<ReadinessStatus> {
    Json(state.readiness_status())
}

// Snapshot endpoints

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    pub time_range: Option<String>,
    pub environment: Option<String>,
}

async fn get_metrics(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> impl IntoResponse {
    let points = point_count_for(query.time_range.as_deref().unwrap_or(DEFAULT_TIME_RANGE));
    let multiplier = environment_multiplier(query.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT));
    state.snapshot(|rng, now| generate_metric_series(rng, points, multiplier, now))
}

async fn get_alerts(State(state): State<AppState>) -> impl IntoResponse {
    state.snapshot(|rng, now| generate_alerts(rng, None, now))
}

async fn get_servers(State(state): State<AppState>) -> impl IntoResponse {
    state.snapshot(|rng, _| generate_server_snapshots(rng))
}

async fn get_logs(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.config.snapshot_log_count;
    state.snapshot(|rng, now| {
        let mut logs = generate_log_batch(rng, count, now);
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        logs
    })
}

async fn get_health(State(state): State<AppState>) -> impl IntoResponse {
    state.snapshot(|rng, _| generate_health_snapshot(rng))
}

async fn get_infrastructure(State(state): State<AppState>) -> impl IntoResponse {
    state.snapshot(|rng, _| generate_infrastructure_snapshot(rng))
}

async fn get_analytics(State(state): State<AppState>) -> impl IntoResponse {
    state.snapshot(|rng, now| generate_analytics_snapshot(rng, now))
}

async fn get_database(State(state): State<AppState>) -> impl IntoResponse {
    state.snapshot(|rng, now| generate_database_snapshot(rng, now))
}

// Acknowledgements

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgeRequest {
    #[serde(default)]
    pub alert_ids: Vec<String>,
    pub acknowledged_by: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgeResponse {
    pub success: bool,
    pub message: String,
    pub acknowledged_alerts: Vec<AlertAcknowledgement>,
    pub timestamp: DateTime<Utc>,
}

async fn acknowledge_alerts(Json(req): Json<AcknowledgeRequest>) -> Result<Json<AcknowledgeResponse>> {
    if req.alert_ids.is_empty() {
        return Err(FeedError::invalid("Alert IDs are required"));
    }
    let acknowledged_by = req
        .acknowledged_by
        .as_deref()
        .filter(|by| !by.trim().is_empty())
        .ok_or_else(|| FeedError::invalid("Acknowledged by field is required"))?;

    let now = Utc::now();
    let acknowledged_alerts = acknowledge(&req.alert_ids, acknowledged_by, req.notes.as_deref(), now);

    info!(count = acknowledged_alerts.len(), acknowledged_by, "Alerts acknowledged");

    Ok(Json(AcknowledgeResponse {
        success: true,
        message: format!("Successfully acknowledged {} alert(s)", acknowledged_alerts.len()),
        acknowledged_alerts,
        timestamp: now,
    }))
}

async fn get_acknowledgements() -> impl IntoResponse {
    Json(acknowledgement_history(Utc::now()))
}

// Notifications

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    #[serde(rename = "type")]
    pub channel_type: Option<String>,
    pub alert_id: Option<String>,
    pub recipients: Option<Vec<String>>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendNotificationResponse {
    pub success: bool,
    pub notification: SentNotification,
    pub message: String,
}

async fn get_notifications() -> impl IntoResponse {
    Json(notification_overview(Utc::now()))
}

async fn send_notification(
    State(state): State<AppState>,
    Json(req): Json<SendNotificationRequest>,
) -> Result<Json<SendNotificationResponse>> {
    let channel_type = req
        .channel_type
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| FeedError::invalid("Notification type is required"))?;

    let notification = state.with_rng(|rng| {
        dispatch_notification(rng, channel_type, req.alert_id, req.recipients, req.message, Utc::now())
    });

    Ok(Json(SendNotificationResponse {
        success: true,
        notification,
        message: "Notification sent successfully".to_string(),
    }))
}

// Export

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(rename = "type")]
    pub export_type: Option<String>,
    pub time_range: Option<String>,
    pub environment: Option<String>,
    pub format: Option<String>,
}

async fn export_data(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Response> {
    let raw_kind = req
        .export_type
        .as_deref()
        .ok_or_else(|| FeedError::invalid("Export type is required"))?;
    let kind = ExportKind::from_param(raw_kind)
        .ok_or_else(|| FeedError::invalid(format!("Invalid export type: {}", raw_kind)))?;
    let format = match req.format.as_deref() {
        None => ExportFormat::Json,
        Some(raw) => ExportFormat::from_param(raw)
            .ok_or_else(|| FeedError::invalid(format!("Unsupported export format: {}", raw)))?,
    };

    let params = ExportParams::new(req.time_range.as_deref(), req.environment.as_deref(), Utc::now());
    let bundle = state.with_rng(|rng| ExportBundle::generate(rng, kind, &params));
    let body = bundle.render(format)?;
    let name = filename(kind, &params, format);

    state.metrics.exports_served.inc();
    info!(kind = %kind, format = format.extension(), bytes = body.len(), file = %name, "Export generated");

    let headers = [
        (header::CONTENT_TYPE, format.content_type().to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", name)),
        (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate".to_string()),
        (header::PRAGMA, "no-cache".to_string()),
        (header::EXPIRES, "0".to_string()),
    ];
    Ok((headers, body).into_response())
}

// Live log stream

async fn stream_logs(State(state): State<AppState>) -> impl IntoResponse {
    let frames = stream::open_session(&state);
    ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Sse::new(log_events(frames)))
}

/// One `data:` frame per record; no event ids, types or keep-alive comments
fn log_events(
    frames: tokio::sync::mpsc::Receiver<String>,
) -> impl Stream<Item = std::result::Result<Event, Infallible>> {
    ReceiverStream::new(frames).map(|payload| Ok(Event::default().data(payload)))
}

// Stats

async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "feed-gateway",
        "metrics": state.metrics.to_json(),
    }))
}
