//! Export bundles and their document / table renderings
//!
//! A bundle is one generated record set plus a metadata header and a
//! summary derived from the records. Bundles render either as a pretty JSON
//! document or as comma-separated rows with a fixed column order per kind.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::generator::{
    environment_multiplier, generate_alerts, generate_log_batch, generate_metric_series,
    generate_server_snapshots, point_count_for, round2,
};
use crate::model::{
    AlertRecord, LogLevel, LogRecord, MetricSeries, ServerSnapshot, ServerStatus, Severity,
    TimeRange, TimeSeriesPoint,
};
use crate::snapshots::{generate_health_snapshot, LatencyPercentiles};
use crate::templates::METRIC_PROFILES;

pub const DEFAULT_TIME_RANGE: &str = "1h";
pub const DEFAULT_ENVIRONMENT: &str = "production";

const DEFAULT_LOG_EXPORT_COUNT: usize = 100;
const DELIMITER: &str = ",";

pub const METRICS_COLUMNS: [&str; 7] = [
    "timestamp",
    METRIC_PROFILES[0].name,
    METRIC_PROFILES[1].name,
    METRIC_PROFILES[2].name,
    METRIC_PROFILES[3].name,
    METRIC_PROFILES[4].name,
    METRIC_PROFILES[5].name,
];

pub const ALERTS_COLUMNS: [&str; 8] = [
    "id",
    "title",
    "severity",
    "service",
    "description",
    "timestamp",
    "acknowledged",
    "resolvedAt",
];

pub const LOGS_COLUMNS: [&str; 8] = [
    "id",
    "timestamp",
    "level",
    "service",
    "message",
    "requestId",
    "userId",
    "duration",
];

pub const SERVERS_COLUMNS: [&str; 11] = [
    "id",
    "name",
    "status",
    "cpu",
    "memory",
    "disk",
    "network",
    "uptime",
    "os",
    "cores",
    "totalMemory",
];

pub const HEALTH_COLUMNS: [&str; 3] = ["metric", "value", "category"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Metrics,
    Alerts,
    Logs,
    Servers,
    Health,
}

impl ExportKind {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "metrics" => Some(Self::Metrics),
            "alerts" => Some(Self::Alerts),
            "logs" => Some(Self::Logs),
            "servers" => Some(Self::Servers),
            "health" => Some(Self::Health),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metrics => "metrics",
            Self::Alerts => "alerts",
            Self::Logs => "logs",
            Self::Servers => "servers",
            Self::Health => "health",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }
}

/// Request parameters after defaults are applied.
///
/// Selectors stay as the caller sent them: unknown values fall back inside
/// the generators but still appear verbatim in metadata and filenames.
#[derive(Debug, Clone)]
pub struct ExportParams {
    pub time_range: String,
    pub environment: String,
    pub generated_at: DateTime<Utc>,
}

impl ExportParams {
    pub fn new(time_range: Option<&str>, environment: Option<&str>, generated_at: DateTime<Utc>) -> Self {
        Self {
            time_range: time_range.unwrap_or(DEFAULT_TIME_RANGE).to_string(),
            environment: environment.unwrap_or(DEFAULT_ENVIRONMENT).to_string(),
            generated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub export_type: ExportKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub exported_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_count: Option<usize>,
}

// ============================================================================
// Metrics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsExport {
    pub metadata: ExportMetadata,
    pub metrics: MetricSeries,
    pub summary: MetricsSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub avg_response_time: f64,
    pub avg_error_rate: f64,
    pub avg_throughput: f64,
    pub peak_cpu_usage: f64,
    pub peak_memory_usage: f64,
}

impl MetricsSummary {
    pub fn from_series(series: &MetricSeries) -> Self {
        Self {
            avg_response_time: mean(&series.response_time),
            avg_error_rate: mean(&series.error_rate),
            avg_throughput: mean(&series.throughput),
            peak_cpu_usage: peak(&series.cpu_usage),
            peak_memory_usage: peak(&series.memory_usage),
        }
    }
}

fn mean(points: &[TimeSeriesPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    round2(points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64)
}

fn peak(points: &[TimeSeriesPoint]) -> f64 {
    points.iter().map(|p| p.value).fold(0.0, f64::max)
}

// ============================================================================
// Alerts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedAlert {
    #[serde(flatten)]
    pub alert: AlertRecord,
    pub acknowledged: bool,
    pub acknowledged_by: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsExport {
    pub metadata: ExportMetadata,
    pub alerts: Vec<ExportedAlert>,
    pub summary: AlertsSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsSummary {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub acknowledged: usize,
    pub resolved: usize,
}

impl AlertsSummary {
    pub fn from_alerts(alerts: &[ExportedAlert]) -> Self {
        let with_severity = |s: Severity| alerts.iter().filter(|a| a.alert.severity == s).count();
        Self {
            critical: with_severity(Severity::Critical),
            warning: with_severity(Severity::Warning),
            info: with_severity(Severity::Info),
            acknowledged: alerts.iter().filter(|a| a.acknowledged).count(),
            resolved: alerts.iter().filter(|a| a.resolved_at.is_some()).count(),
        }
    }
}

fn annotate_alerts<R: Rng + ?Sized>(
    rng: &mut R,
    alerts: Vec<AlertRecord>,
    now: DateTime<Utc>,
) -> Vec<ExportedAlert> {
    alerts
        .into_iter()
        .map(|alert| {
            let acknowledged = rng.gen_bool(0.5);
            let acknowledged_by = acknowledged.then(|| "admin@company.com".to_string());
            let resolved_at = (rng.gen::<f64>() > 0.7).then_some(now);
            ExportedAlert {
                alert,
                acknowledged,
                acknowledged_by,
                resolved_at,
            }
        })
        .collect()
}

// ============================================================================
// Logs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsExport {
    pub metadata: ExportMetadata,
    pub logs: Vec<LogRecord>,
    pub summary: LogsSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsSummary {
    pub info: usize,
    pub warning: usize,
    pub error: usize,
    /// Distinct services in first-seen order
    pub services: Vec<String>,
}

impl LogsSummary {
    pub fn from_logs(logs: &[LogRecord]) -> Self {
        let with_level = |l: LogLevel| logs.iter().filter(|r| r.level == l).count();
        let mut services: Vec<String> = Vec::new();
        for log in logs {
            if !services.contains(&log.service) {
                services.push(log.service.clone());
            }
        }
        Self {
            info: with_level(LogLevel::Info),
            warning: with_level(LogLevel::Warning),
            error: with_level(LogLevel::Error),
            services,
        }
    }
}

pub fn log_export_count(range: &str) -> usize {
    TimeRange::from_param(range)
        .map(|r| r.log_export_count())
        .unwrap_or(DEFAULT_LOG_EXPORT_COUNT)
}

// ============================================================================
// Servers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedServer {
    #[serde(flatten)]
    pub server: ServerSnapshot,
    pub details: ServerDetails,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDetails {
    pub uptime: String,
    pub os: String,
    pub kernel: String,
    pub architecture: String,
    pub cores: u32,
    pub total_memory: String,
    pub total_disk: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServersExport {
    pub metadata: ExportMetadata,
    pub servers: Vec<ExportedServer>,
    pub summary: ServersSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServersSummary {
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
    pub avg_cpu_usage: f64,
    pub avg_memory_usage: f64,
    pub avg_disk_usage: f64,
}

impl ServersSummary {
    pub fn from_servers(servers: &[ServerSnapshot]) -> Self {
        let with_status = |s: ServerStatus| servers.iter().filter(|v| v.status == s).count();
        let avg = |f: fn(&ServerSnapshot) -> u32| {
            if servers.is_empty() {
                0.0
            } else {
                round2(servers.iter().map(|s| f(s) as f64).sum::<f64>() / servers.len() as f64)
            }
        };
        Self {
            healthy: with_status(ServerStatus::Healthy),
            warning: with_status(ServerStatus::Warning),
            critical: with_status(ServerStatus::Critical),
            avg_cpu_usage: avg(|s| s.cpu),
            avg_memory_usage: avg(|s| s.memory),
            avg_disk_usage: avg(|s| s.disk),
        }
    }
}

fn server_details<R: Rng + ?Sized>(rng: &mut R) -> ServerDetails {
    ServerDetails {
        uptime: format!("{} days", rng.gen_range(0..365)),
        os: "Ubuntu 22.04 LTS".to_string(),
        kernel: "5.15.0-72-generic".to_string(),
        architecture: "x86_64".to_string(),
        cores: rng.gen_range(4..20),
        total_memory: format!("{}GB", rng.gen_range(16..80)),
        total_disk: format!("{}GB", rng.gen_range(100..1100)),
    }
}

// ============================================================================
// Health report
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthExport {
    pub metadata: ExportMetadata,
    pub system_health: SystemHealthSection,
    pub performance: PerformanceSection,
    pub infrastructure: InfrastructureSection,
    pub database: DatabaseSection,
    pub alerts: AlertCountsSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealthSection {
    pub overall: ServerStatus,
    pub uptime: f64,
    pub active_services: u32,
    pub total_services: u32,
    pub last_incident: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSection {
    pub response_time: LatencyPercentiles,
    pub error_rate: f64,
    pub throughput: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureSection {
    pub total_servers: usize,
    pub healthy_servers: usize,
    pub warning_servers: usize,
    pub critical_servers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSection {
    pub connections: u32,
    pub max_connections: u32,
    pub query_time: f64,
    pub size: String,
    pub replication_lag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertCountsSection {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub acknowledged: usize,
}

// ============================================================================
// Bundle
// ============================================================================

/// Any export, serialized without a wrapper tag. Each variant has a
/// distinct top-level record key, so documents parse back unambiguously.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportBundle {
    Metrics(MetricsExport),
    Alerts(AlertsExport),
    Logs(LogsExport),
    Servers(ServersExport),
    Health(HealthExport),
}

impl ExportBundle {
    /// Generate a fresh bundle of `kind`
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, kind: ExportKind, params: &ExportParams) -> Self {
        let now = params.generated_at;
        match kind {
            ExportKind::Metrics => {
                let points = point_count_for(&params.time_range);
                let multiplier = environment_multiplier(&params.environment);
                let metrics = generate_metric_series(rng, points, multiplier, now);
                Self::Metrics(MetricsExport {
                    metadata: ExportMetadata {
                        export_type: kind,
                        time_range: Some(params.time_range.clone()),
                        environment: Some(params.environment.clone()),
                        exported_at: now,
                        record_count: Some(points),
                    },
                    summary: MetricsSummary::from_series(&metrics),
                    metrics,
                })
            }
            ExportKind::Alerts => {
                let alerts = generate_alerts(rng, None, now);
                let alerts = annotate_alerts(rng, alerts, now);
                Self::Alerts(AlertsExport {
                    metadata: ExportMetadata {
                        export_type: kind,
                        time_range: None,
                        environment: None,
                        exported_at: now,
                        record_count: Some(alerts.len()),
                    },
                    summary: AlertsSummary::from_alerts(&alerts),
                    alerts,
                })
            }
            ExportKind::Logs => {
                let logs = generate_log_batch(rng, log_export_count(&params.time_range), now);
                Self::Logs(LogsExport {
                    metadata: ExportMetadata {
                        export_type: kind,
                        time_range: Some(params.time_range.clone()),
                        environment: None,
                        exported_at: now,
                        record_count: Some(logs.len()),
                    },
                    summary: LogsSummary::from_logs(&logs),
                    logs,
                })
            }
            ExportKind::Servers => {
                let snapshots = generate_server_snapshots(rng);
                let summary = ServersSummary::from_servers(&snapshots);
                let servers: Vec<ExportedServer> = snapshots
                    .into_iter()
                    .map(|server| ExportedServer {
                        server,
                        details: server_details(rng),
                        last_updated: now,
                    })
                    .collect();
                Self::Servers(ServersExport {
                    metadata: ExportMetadata {
                        export_type: kind,
                        time_range: None,
                        environment: None,
                        exported_at: now,
                        record_count: Some(servers.len()),
                    },
                    servers,
                    summary,
                })
            }
            ExportKind::Health => Self::Health(generate_health_export(rng, now)),
        }
    }

    pub fn kind(&self) -> ExportKind {
        match self {
            Self::Metrics(_) => ExportKind::Metrics,
            Self::Alerts(_) => ExportKind::Alerts,
            Self::Logs(_) => ExportKind::Logs,
            Self::Servers(_) => ExportKind::Servers,
            Self::Health(_) => ExportKind::Health,
        }
    }

    /// Pretty-printed JSON document
    pub fn to_document(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Comma-separated rows for `kind`.
    ///
    /// A kind that is unknown, or that does not match this bundle, yields
    /// the compact JSON serialization instead.
    pub fn to_table(&self, kind: &str) -> Result<String> {
        let table = match (ExportKind::from_param(kind), self) {
            (Some(ExportKind::Metrics), Self::Metrics(export)) => metrics_table(&export.metrics),
            (Some(ExportKind::Alerts), Self::Alerts(export)) => alerts_table(&export.alerts),
            (Some(ExportKind::Logs), Self::Logs(export)) => logs_table(&export.logs),
            (Some(ExportKind::Servers), Self::Servers(export)) => servers_table(&export.servers),
            (Some(ExportKind::Health), Self::Health(export)) => health_table(export),
            _ => serde_json::to_string(self)?,
        };
        Ok(table)
    }

    pub fn render(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => self.to_document(),
            ExportFormat::Csv => self.to_table(self.kind().as_str()),
        }
    }
}

/// Suggested download name: kind, parameters, generation time in epoch ms
pub fn filename(kind: ExportKind, params: &ExportParams, format: ExportFormat) -> String {
    let millis = params.generated_at.timestamp_millis();
    let stem = match kind {
        ExportKind::Metrics => format!("metrics-{}-{}-{}", params.environment, params.time_range, millis),
        ExportKind::Alerts => format!("alerts-{}", millis),
        ExportKind::Logs => format!("logs-{}-{}", params.time_range, millis),
        ExportKind::Servers => format!("servers-{}", millis),
        ExportKind::Health => format!("health-report-{}", millis),
    };
    format!("{}.{}", stem, format.extension())
}

fn generate_health_export<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> HealthExport {
    let health = generate_health_snapshot(rng);
    let servers = ServersSummary::from_servers(&generate_server_snapshots(rng));
    let alerts = generate_alerts(rng, None, now);
    let alerts = AlertsSummary::from_alerts(&annotate_alerts(rng, alerts, now));

    HealthExport {
        metadata: ExportMetadata {
            export_type: ExportKind::Health,
            time_range: None,
            environment: None,
            exported_at: now,
            record_count: None,
        },
        system_health: SystemHealthSection {
            overall: health.overall,
            uptime: health.uptime,
            active_services: health.active_services,
            total_services: health.total_services,
            last_incident: now - Duration::days(7),
        },
        performance: PerformanceSection {
            response_time: health.response_time,
            error_rate: health.error_rate,
            throughput: health.throughput,
        },
        infrastructure: InfrastructureSection {
            total_servers: servers.healthy + servers.warning + servers.critical,
            healthy_servers: servers.healthy,
            warning_servers: servers.warning,
            critical_servers: servers.critical,
        },
        database: DatabaseSection {
            connections: health.database.connections,
            max_connections: health.database.max_connections,
            query_time: health.database.query_time,
            size: health.database.size,
            replication_lag: "0.5ms".to_string(),
        },
        alerts: AlertCountsSection {
            total: alerts.critical + alerts.warning + alerts.info,
            critical: alerts.critical,
            warning: alerts.warning,
            info: alerts.info,
            acknowledged: alerts.acknowledged,
        },
    }
}

// ============================================================================
// Table rendering
// ============================================================================

/// Quote a cell when it contains the delimiter, a quote or a line break
fn csv_field(value: &str) -> String {
    if value.contains(DELIMITER) || value.contains(['"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn table<I>(header: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut lines = vec![header.join(DELIMITER)];
    lines.extend(rows.into_iter().map(|row| {
        row.iter()
            .map(|cell| csv_field(cell))
            .collect::<Vec<_>>()
            .join(DELIMITER)
    }));
    lines.join("\n")
}

fn iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn metrics_table(series: &MetricSeries) -> String {
    let columns = series.columns();
    let longest = columns.iter().map(|c| c.len()).max().unwrap_or(0);

    let rows = (0..longest).map(|i| {
        let timestamp = columns
            .iter()
            .find_map(|c| c.get(i))
            .map(|p| iso(&p.timestamp))
            .unwrap_or_default();
        let mut row = vec![timestamp];
        row.extend(
            columns
                .iter()
                .map(|c| c.get(i).map(|p| p.value.to_string()).unwrap_or_default()),
        );
        row
    });

    table(&METRICS_COLUMNS, rows)
}

fn alerts_table(alerts: &[ExportedAlert]) -> String {
    let rows = alerts.iter().map(|a| {
        vec![
            a.alert.id.clone(),
            a.alert.title.clone(),
            a.alert.severity.as_str().to_string(),
            a.alert.service.clone(),
            a.alert.description.clone(),
            iso(&a.alert.timestamp),
            a.acknowledged.to_string(),
            a.resolved_at.as_ref().map(iso).unwrap_or_default(),
        ]
    });
    table(&ALERTS_COLUMNS, rows)
}

fn logs_table(logs: &[LogRecord]) -> String {
    let rows = logs.iter().map(|l| {
        vec![
            l.id.clone(),
            iso(&l.timestamp),
            l.level.as_str().to_string(),
            l.service.clone(),
            l.message.clone(),
            opt(&l.request_id),
            opt(&l.user_id),
            opt(&l.duration),
        ]
    });
    table(&LOGS_COLUMNS, rows)
}

fn servers_table(servers: &[ExportedServer]) -> String {
    let rows = servers.iter().map(|s| {
        vec![
            s.server.id.clone(),
            s.server.name.clone(),
            s.server.status.as_str().to_string(),
            s.server.cpu.to_string(),
            s.server.memory.to_string(),
            s.server.disk.to_string(),
            s.server.network.to_string(),
            s.details.uptime.clone(),
            s.details.os.clone(),
            s.details.cores.to_string(),
            s.details.total_memory.clone(),
        ]
    });
    table(&SERVERS_COLUMNS, rows)
}

fn health_table(report: &HealthExport) -> String {
    let system = &report.system_health;
    let perf = &report.performance;
    let infra = &report.infrastructure;

    let rows: Vec<(&str, String, &str)> = vec![
        ("overall_status", system.overall.as_str().to_string(), "system"),
        ("uptime_percentage", system.uptime.to_string(), "system"),
        ("active_services", system.active_services.to_string(), "system"),
        ("total_services", system.total_services.to_string(), "system"),
        ("avg_response_time", perf.response_time.avg.to_string(), "performance"),
        ("p95_response_time", perf.response_time.p95.to_string(), "performance"),
        ("p99_response_time", perf.response_time.p99.to_string(), "performance"),
        ("error_rate", perf.error_rate.to_string(), "performance"),
        ("throughput", perf.throughput.to_string(), "performance"),
        ("total_servers", infra.total_servers.to_string(), "infrastructure"),
        ("healthy_servers", infra.healthy_servers.to_string(), "infrastructure"),
        ("warning_servers", infra.warning_servers.to_string(), "infrastructure"),
        ("critical_servers", infra.critical_servers.to_string(), "infrastructure"),
    ];

    table(
        &HEALTH_COLUMNS,
        rows.into_iter()
            .map(|(metric, value, category)| vec![metric.to_string(), value, category.to_string()]),
    )
}
