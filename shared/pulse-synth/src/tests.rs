//! Unit tests for Pulse Synth

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::export::{
    filename, ALERTS_COLUMNS, HEALTH_COLUMNS, LOGS_COLUMNS, METRICS_COLUMNS, SERVERS_COLUMNS,
};
use crate::notifications::{dispatch_notification, notification_overview};
use crate::snapshots::{
    generate_analytics_snapshot, generate_database_snapshot, generate_health_snapshot,
    generate_infrastructure_snapshot,
};
use crate::*;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// ============================================================================
// Time series
// ============================================================================

#[test]
fn test_time_series_shape() {
    let now = fixed_now();
    let series = generate_time_series(&mut rng(1), 60, 150.0, 50.0, now);

    assert_eq!(series.len(), 60);
    assert_eq!(series.last().unwrap().timestamp, now);
    assert_eq!(series[0].timestamp, now - Duration::minutes(59));
    for pair in series.windows(2) {
        assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::minutes(1));
    }
}

#[test]
fn test_time_series_values_within_variance() {
    let series = generate_time_series(&mut rng(2), 500, 150.0, 50.0, fixed_now());
    for point in &series {
        assert!(point.value >= 125.0 && point.value <= 175.0, "{}", point.value);
        assert_eq!((point.value * 100.0).round() / 100.0, point.value);
    }
}

#[test]
fn test_time_series_clamped_at_zero() {
    let series = generate_time_series(&mut rng(3), 300, 0.5, 10.0, fixed_now());
    assert!(series.iter().all(|p| p.value >= 0.0));
    assert!(series.iter().any(|p| p.value == 0.0));
}

#[test]
fn test_time_series_empty() {
    assert!(generate_time_series(&mut rng(4), 0, 10.0, 1.0, fixed_now()).is_empty());
}

#[test]
fn test_point_counts_per_range() {
    assert_eq!(point_count_for("1h"), 60);
    assert_eq!(point_count_for("6h"), 72);
    assert_eq!(point_count_for("24h"), 96);
    assert_eq!(point_count_for("7d"), 168);
    assert_eq!(point_count_for("bogus"), 60);
}

#[test]
fn test_environment_multipliers() {
    assert_eq!(environment_multiplier("production"), 1.0);
    assert_eq!(environment_multiplier("staging"), 0.7);
    assert_eq!(environment_multiplier("development"), 0.3);
    assert_eq!(environment_multiplier("qa"), 1.0);
}

#[test]
fn test_metric_series_scaled_by_environment() {
    let series = generate_metric_series(&mut rng(5), 96, 0.3, fixed_now());

    for column in series.columns() {
        assert_eq!(column.len(), 96);
    }
    // base 1000 * 0.3 = 300, variance 200
    assert!(series.throughput.iter().all(|p| p.value >= 200.0 && p.value <= 400.0));
    assert!(series.cpu_usage.iter().all(|p| p.value <= 65.0 * 0.3 + 10.0));
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let now = fixed_now();
    let a = generate_metric_series(&mut rng(42), 60, 1.0, now);
    let b = generate_metric_series(&mut rng(42), 60, 1.0, now);
    assert_eq!(a, b);
}

// ============================================================================
// Alerts, servers, logs
// ============================================================================

#[test]
fn test_alerts_default_count_and_order() {
    let now = fixed_now();
    for seed in 0..50 {
        let alerts = generate_alerts(&mut rng(seed), None, now);
        assert!((3..=7).contains(&alerts.len()));
        for pair in alerts.windows(2) {
            assert!(pair[0].severity <= pair[1].severity);
        }
        for alert in &alerts {
            assert!(alert.timestamp <= now);
            assert!(now - alert.timestamp < Duration::hours(1));
        }
    }
}

#[test]
fn test_equal_severities_keep_sampled_order() {
    let now = fixed_now();
    for seed in 0..200 {
        let alerts = generate_alerts(&mut rng(seed), Some(30), now);
        for pair in alerts.windows(2) {
            if pair[0].severity != pair[1].severity {
                continue;
            }
            let index = |id: &str| id.trim_start_matches("alert-").parse::<usize>().unwrap();
            assert!(
                index(&pair[0].id) < index(&pair[1].id),
                "seed {}: {} before {}",
                seed,
                pair[0].id,
                pair[1].id
            );
        }
    }
}

#[test]
fn test_alerts_come_from_templates() {
    let alerts = generate_alerts(&mut rng(7), Some(40), fixed_now());
    assert_eq!(alerts.len(), 40);

    for alert in &alerts {
        let template = crate::templates::ALERT_TEMPLATES
            .iter()
            .find(|t| t.title == alert.title)
            .expect("alert title should come from a template");
        assert_eq!(template.description, alert.description);
        assert_eq!(template.service, alert.service);
        assert_eq!(template.severity, alert.severity);
    }
}

#[test]
fn test_alert_ids_are_distinct() {
    let alerts = generate_alerts(&mut rng(8), Some(20), fixed_now());
    let mut ids: Vec<_> = alerts.iter().map(|a| a.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn test_alerts_with_zero_count() {
    assert!(generate_alerts(&mut rng(9), Some(0), fixed_now()).is_empty());
}

#[test]
fn test_server_status_rule() {
    assert_eq!(ServerStatus::classify(50, 50, 50), ServerStatus::Healthy);
    assert_eq!(ServerStatus::classify(75, 75, 75), ServerStatus::Healthy);
    assert_eq!(ServerStatus::classify(76, 10, 10), ServerStatus::Warning);
    assert_eq!(ServerStatus::classify(10, 10, 90), ServerStatus::Warning);
    assert_eq!(ServerStatus::classify(10, 91, 10), ServerStatus::Critical);
    assert_eq!(ServerStatus::classify(95, 80, 20), ServerStatus::Critical);
}

#[test]
fn test_server_snapshots() {
    let servers = generate_server_snapshots(&mut rng(10));
    assert_eq!(servers.len(), 10);
    assert_eq!(servers[0].name, "web-server-01");
    assert_eq!(servers[9].name, "load-balancer");

    for server in &servers {
        assert!(server.cpu < 100 && server.memory < 100 && server.disk < 100);
        assert!(server.network < 1000);
        assert_eq!(
            server.status,
            ServerStatus::classify(server.cpu, server.memory, server.disk)
        );
    }
}

#[test]
fn test_log_record_fields() {
    let now = fixed_now();
    let logs = generate_log_batch(&mut rng(11), 200, now);
    assert_eq!(logs.len(), 200);

    for (i, log) in logs.iter().enumerate() {
        assert_eq!(log.id, format!("log-{}", i));
        assert!(log.timestamp <= now);
        assert!(crate::templates::LOG_SERVICES.contains(&log.service.as_str()));
        assert!(log.request_id.as_deref().unwrap().starts_with("req-"));
        assert_eq!(log.duration.is_some(), log.level == LogLevel::Info);

        let base = log.message.split(" (").next().unwrap();
        assert!(crate::templates::LOG_MESSAGES.contains(&base));
    }

    assert!(logs.iter().any(|l| l.user_id.is_some()));
    assert!(logs.iter().any(|l| l.user_id.is_none()));
    assert!(logs.iter().any(|l| l.message.ends_with("ms)")));
}

#[test]
fn test_log_record_json_shape() {
    let record = generate_log_record(&mut rng(12), "log-0".to_string(), fixed_now());
    let value = serde_json::to_value(&record).unwrap();

    assert!(value.get("requestId").is_some());
    assert!(value.get("request_id").is_none());
    if record.user_id.is_none() {
        assert!(value.get("userId").is_none());
    }
}

// ============================================================================
// Snapshots
// ============================================================================

#[test]
fn test_health_snapshot_ranges() {
    for seed in 0..30 {
        let health = generate_health_snapshot(&mut rng(seed));
        assert!(health.uptime > 99.4 && health.uptime <= 99.9);
        assert!((24..=25).contains(&health.active_services));
        assert_eq!(health.total_services, 25);
        assert_eq!(health.database.max_connections, 100);
    }
}

#[test]
fn test_infrastructure_snapshot_json() {
    let snapshot = generate_infrastructure_snapshot(&mut rng(13));
    assert_eq!(snapshot.kubernetes.pods.len(), 8);
    for pod in &snapshot.kubernetes.pods {
        let expected = if pod.replicas.ready == pod.replicas.desired { "Running" } else { "Pending" };
        assert_eq!(pod.status, expected);
    }

    let value = serde_json::to_value(&snapshot).unwrap();
    assert!(value["kubernetes"]["services"][0].get("clusterIP").is_some());
    assert_eq!(value["kubernetes"]["services"][0]["type"], "ClusterIP");
    assert!(value.get("loadBalancers").is_some());
}

#[test]
fn test_analytics_traffic_keys() {
    let snapshot = generate_analytics_snapshot(&mut rng(14), fixed_now());
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["traffic"]["byCountry"][0]["country"], "United States");
    assert_eq!(value["traffic"]["byDevice"][0]["device"], "Desktop");
    assert_eq!(value["traffic"]["byBrowser"][0]["browser"], "Chrome");
    assert_eq!(value["security"]["attacks"][0]["type"], "SQL Injection");
}

#[test]
fn test_database_snapshot_pool() {
    let snapshot = generate_database_snapshot(&mut rng(15), fixed_now());
    let pool = &snapshot.primary.metrics.connections;
    assert_eq!(pool.max, 100);
    assert_eq!(pool.usage, pool.active + pool.idle);
    assert_eq!(snapshot.replicas.len(), 2);
}

// ============================================================================
// Acknowledgement and notifications
// ============================================================================

#[test]
fn test_acknowledge_echoes_each_id() {
    let now = fixed_now();
    let ids = vec!["alert-1".to_string(), "alert-2".to_string()];
    let acks = acknowledge(&ids, "ops@example.com", Some("on it"), now);

    assert_eq!(acks.len(), 2);
    assert_eq!(acks[1].id, "alert-2");
    assert!(acks.iter().all(|a| a.acknowledged && a.acknowledged_at == now));
    assert_eq!(acks[0].notes.as_deref(), Some("on it"));
    assert_eq!(acks[0].status, "acknowledged");
}

#[test]
fn test_acknowledgement_history_counts() {
    let history = acknowledgement_history(fixed_now());
    assert_eq!(history.total, 2);
    assert_eq!(history.resolved + history.pending, history.total);
}

#[test]
fn test_notification_dispatch_echo() {
    let now = fixed_now();
    let sent = dispatch_notification(
        &mut rng(16),
        "email".to_string(),
        Some("alert-1".to_string()),
        Some(vec!["a@example.com".to_string()]),
        None,
        now,
    );
    assert_eq!(sent.id, format!("notif-{}", now.timestamp_millis()));
    assert_eq!(sent.channel_type, "email");

    let value = serde_json::to_value(&sent).unwrap();
    assert_eq!(value["type"], "email");
}

#[test]
fn test_notification_overview_stats() {
    let overview = notification_overview(fixed_now());
    assert_eq!(overview.stats.total, overview.stats.delivered + overview.stats.failed + overview.stats.pending);
    assert_eq!(overview.history.len(), 3);
}

// ============================================================================
// Exports
// ============================================================================

fn params(range: &str, env: &str) -> ExportParams {
    ExportParams::new(Some(range), Some(env), fixed_now())
}

#[test]
fn test_export_round_trips() {
    let kinds = [
        ExportKind::Metrics,
        ExportKind::Alerts,
        ExportKind::Logs,
        ExportKind::Servers,
        ExportKind::Health,
    ];
    for kind in kinds {
        let bundle = ExportBundle::generate(&mut rng(17), kind, &params("1h", "production"));
        let document = bundle.to_document().unwrap();
        let parsed: ExportBundle = serde_json::from_str(&document).unwrap();
        assert_eq!(parsed, bundle, "{} bundle should parse back", kind);
        assert_eq!(parsed.kind(), kind);
    }
}

#[test]
fn test_metrics_export_metadata_and_summary() {
    let bundle = ExportBundle::generate(&mut rng(18), ExportKind::Metrics, &params("6h", "staging"));
    let ExportBundle::Metrics(export) = bundle else {
        panic!("expected metrics bundle");
    };

    assert_eq!(export.metadata.export_type, ExportKind::Metrics);
    assert_eq!(export.metadata.time_range.as_deref(), Some("6h"));
    assert_eq!(export.metadata.environment.as_deref(), Some("staging"));
    assert_eq!(export.metadata.record_count, Some(72));
    assert_eq!(export.metrics.cpu_usage.len(), 72);

    let peak = export
        .metrics
        .cpu_usage
        .iter()
        .map(|p| p.value)
        .fold(0.0, f64::max);
    assert_eq!(export.summary.peak_cpu_usage, peak);
}

#[test]
fn test_log_export_size_follows_range() {
    let bundle = ExportBundle::generate(&mut rng(19), ExportKind::Logs, &params("6h", "production"));
    let ExportBundle::Logs(export) = bundle else {
        panic!("expected logs bundle");
    };

    assert_eq!(export.logs.len(), 500);
    assert_eq!(
        export.summary.info + export.summary.warning + export.summary.error,
        500
    );
    assert!(!export.summary.services.is_empty());
}

#[test]
fn test_alerts_export_summary_matches_records() {
    let bundle = ExportBundle::generate(&mut rng(20), ExportKind::Alerts, &params("1h", "production"));
    let ExportBundle::Alerts(export) = bundle else {
        panic!("expected alerts bundle");
    };

    let total = export.summary.critical + export.summary.warning + export.summary.info;
    assert_eq!(total, export.alerts.len());
    for alert in &export.alerts {
        assert_eq!(alert.acknowledged_by.is_some(), alert.acknowledged);
    }

    let value = serde_json::to_value(&export.alerts[0]).unwrap();
    assert!(value.get("title").is_some());
    assert!(value.get("resolvedAt").is_some());
}

#[test]
fn test_metrics_table_layout() {
    let bundle = ExportBundle::generate(&mut rng(21), ExportKind::Metrics, &params("1h", "production"));
    let table = bundle.to_table("metrics").unwrap();
    let lines: Vec<&str> = table.split('\n').collect();

    assert_eq!(
        lines[0],
        "timestamp,responseTime,errorRate,throughput,cpuUsage,memoryUsage,diskUsage"
    );
    assert_eq!(lines[0], METRICS_COLUMNS.join(","));
    assert_eq!(lines.len(), 61);
    assert!(!table.ends_with('\n'));
    assert!(lines[1].starts_with("2024-03-01T11:01:00.000Z,"));
    assert_eq!(lines[60].split(',').count(), 7);
}

#[test]
fn test_metrics_table_pads_short_series() {
    let bundle = ExportBundle::generate(&mut rng(22), ExportKind::Metrics, &params("1h", "production"));
    let ExportBundle::Metrics(mut export) = bundle else {
        panic!("expected metrics bundle");
    };
    export.metrics.response_time.truncate(4);
    export.metrics.disk_usage.clear();

    let table = ExportBundle::Metrics(export).to_table("metrics").unwrap();
    let lines: Vec<&str> = table.split('\n').collect();
    assert_eq!(lines.len(), 61);

    for line in &lines[1..] {
        let cells: Vec<&str> = line.split(',').collect();
        assert_eq!(cells.len(), 7, "{}", line);
        assert!(!cells[0].is_empty());
        assert!(cells[6].is_empty());
    }
    assert!(!lines[4].split(',').nth(1).unwrap().is_empty());
    assert!(lines[5].starts_with("2024-03-01T11:05:00.000Z,,"), "{}", lines[5]);
    assert!(lines[60].split(',').nth(1).unwrap().is_empty());
}

#[test]
fn test_metrics_columns_match_document_keys() {
    let series = generate_metric_series(&mut rng(23), 2, 1.0, fixed_now());
    let document = serde_json::to_value(&series).unwrap();
    for column in &METRICS_COLUMNS[1..] {
        assert!(document.get(*column).is_some(), "{}", column);
    }
}

#[test]
fn test_export_record_count_and_flat_server_fields() {
    let bundle = ExportBundle::generate(&mut rng(24), ExportKind::Servers, &params("1h", "production"));
    let document: serde_json::Value = serde_json::from_str(&bundle.to_document().unwrap()).unwrap();

    assert_eq!(document["metadata"]["recordCount"], 10);
    let server = &document["servers"][0];
    for key in ["cpu", "memory", "disk", "network", "status"] {
        assert!(server.get(key).is_some(), "{}", key);
    }
    assert!(server.get("metrics").is_none());
}

#[test]
fn test_table_headers_per_kind() {
    let cases = [
        (ExportKind::Alerts, ALERTS_COLUMNS.join(",")),
        (ExportKind::Logs, LOGS_COLUMNS.join(",")),
        (ExportKind::Servers, SERVERS_COLUMNS.join(",")),
        (ExportKind::Health, HEALTH_COLUMNS.join(",")),
    ];
    for (kind, header) in cases {
        let bundle = ExportBundle::generate(&mut rng(22), kind, &params("1h", "production"));
        let table = bundle.to_table(kind.as_str()).unwrap();
        assert_eq!(table.split('\n').next().unwrap(), header);
    }
}

#[test]
fn test_health_table_rows() {
    let bundle = ExportBundle::generate(&mut rng(23), ExportKind::Health, &params("1h", "production"));
    let table = bundle.to_table("health").unwrap();
    let lines: Vec<&str> = table.split('\n').collect();

    assert_eq!(lines.len(), 14);
    assert!(lines[1].starts_with("overall_status,"));
    assert!(lines[1].ends_with(",system"));
    assert!(lines[13].starts_with("critical_servers,"));
    assert!(lines[13].ends_with(",infrastructure"));
}

#[test]
fn test_table_unknown_kind_falls_back_to_json() {
    let bundle = ExportBundle::generate(&mut rng(24), ExportKind::Servers, &params("1h", "production"));

    let fallback = bundle.to_table("bogus").unwrap();
    assert_eq!(fallback, serde_json::to_string(&bundle).unwrap());

    let mismatched = bundle.to_table("metrics").unwrap();
    assert!(mismatched.starts_with('{'));
}

#[test]
fn test_export_filenames() {
    let p = params("24h", "staging");
    let ms = fixed_now().timestamp_millis();

    assert_eq!(
        filename(ExportKind::Metrics, &p, ExportFormat::Csv),
        format!("metrics-staging-24h-{}.csv", ms)
    );
    assert_eq!(filename(ExportKind::Alerts, &p, ExportFormat::Json), format!("alerts-{}.json", ms));
    assert_eq!(filename(ExportKind::Logs, &p, ExportFormat::Json), format!("logs-24h-{}.json", ms));
    assert_eq!(filename(ExportKind::Servers, &p, ExportFormat::Csv), format!("servers-{}.csv", ms));
    assert_eq!(
        filename(ExportKind::Health, &p, ExportFormat::Json),
        format!("health-report-{}.json", ms)
    );
}

#[test]
fn test_export_kind_and_format_params() {
    assert_eq!(ExportKind::from_param("servers"), Some(ExportKind::Servers));
    assert_eq!(ExportKind::from_param("Servers"), None);
    assert_eq!(ExportFormat::from_param("csv"), Some(ExportFormat::Csv));
    assert_eq!(ExportFormat::from_param("xml"), None);
    assert_eq!(ExportFormat::Csv.content_type(), "text/csv");
}
