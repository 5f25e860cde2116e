//! Telemetry generators
//!
//! Shapes are fixed, values are drawn from the caller's random source.
//! Generators never fail: unknown selectors fall back to defaults and
//! out-of-range values are clamped.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::model::{
    AlertRecord, Environment, LogLevel, LogRecord, MetricSeries, ServerSnapshot, ServerStatus,
    TimeRange, TimeSeriesPoint,
};
use crate::templates::{
    SeriesProfile, ALERT_TEMPLATES, LOG_MESSAGES, LOG_SERVICES, METRIC_PROFILES, SERVER_NAMES,
};

/// Point count used when the range selector is not recognised
pub const DEFAULT_POINT_COUNT: usize = 60;

/// Spacing between consecutive snapshot samples
const SAMPLE_STEP_SECS: i64 = 60;

/// Backdated records fall within this window before `now`
const LOOKBACK_MS: i64 = 3_600_000;

const REQUEST_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn point_count_for(range: &str) -> usize {
    TimeRange::from_param(range)
        .map(|r| r.point_count())
        .unwrap_or(DEFAULT_POINT_COUNT)
}

pub fn environment_multiplier(env: &str) -> f64 {
    Environment::from_param(env)
        .map(|e| e.multiplier())
        .unwrap_or(1.0)
}

/// `points` samples one minute apart, the last one at `end`.
///
/// Each value is `base` plus uniform noise in `[-variance/2, variance/2)`,
/// clamped at zero and rounded to two decimals.
pub fn generate_time_series<R: Rng + ?Sized>(
    rng: &mut R,
    points: usize,
    base: f64,
    variance: f64,
    end: DateTime<Utc>,
) -> Vec<TimeSeriesPoint> {
    (0..points)
        .rev()
        .map(|i| {
            let timestamp = end - Duration::seconds(i as i64 * SAMPLE_STEP_SECS);
            let value = base + (rng.gen::<f64>() - 0.5) * variance;
            TimeSeriesPoint {
                timestamp,
                value: round2(value.max(0.0)),
            }
        })
        .collect()
}

/// All six dashboard series, bases scaled by `multiplier`
pub fn generate_metric_series<R: Rng + ?Sized>(
    rng: &mut R,
    points: usize,
    multiplier: f64,
    end: DateTime<Utc>,
) -> MetricSeries {
    let [rt, er, tp, cpu, mem, disk] = &METRIC_PROFILES;
    let mut draw =
        |p: &SeriesProfile| generate_time_series(rng, points, p.base * multiplier, p.variance, end);

    MetricSeries {
        response_time: draw(rt),
        error_rate: draw(er),
        throughput: draw(tp),
        cpu_usage: draw(cpu),
        memory_usage: draw(mem),
        disk_usage: draw(disk),
    }
}

/// Sample alerts with replacement from the template table.
///
/// `count` defaults to a draw in `[3, 7]`. The result is ordered critical,
/// warning, info; equal severities keep their sampled order.
pub fn generate_alerts<R: Rng + ?Sized>(
    rng: &mut R,
    count: Option<usize>,
    now: DateTime<Utc>,
) -> Vec<AlertRecord> {
    let count = count.unwrap_or_else(|| rng.gen_range(3..=7));

    let mut alerts: Vec<AlertRecord> = (0..count)
        .map(|i| {
            let template = &ALERT_TEMPLATES[rng.gen_range(0..ALERT_TEMPLATES.len())];
            AlertRecord {
                id: format!("alert-{}", i),
                title: template.title.to_string(),
                description: template.description.to_string(),
                service: template.service.to_string(),
                severity: template.severity,
                timestamp: backdate(rng, now),
            }
        })
        .collect();

    alerts.sort_by_key(|a| a.severity);
    alerts
}

/// One snapshot per fixed server name, in table order
pub fn generate_server_snapshots<R: Rng + ?Sized>(rng: &mut R) -> Vec<ServerSnapshot> {
    SERVER_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let cpu = rng.gen_range(0..100);
            let memory = rng.gen_range(0..100);
            let disk = rng.gen_range(0..100);
            let network = rng.gen_range(0..1000);

            ServerSnapshot {
                id: format!("server-{}", index),
                name: name.to_string(),
                status: ServerStatus::classify(cpu, memory, disk),
                cpu,
                memory,
                disk,
                network,
            }
        })
        .collect()
}

/// A single log record stamped with `timestamp`
pub fn generate_log_record<R: Rng + ?Sized>(
    rng: &mut R,
    id: String,
    timestamp: DateTime<Utc>,
) -> LogRecord {
    let level = LogLevel::ALL[rng.gen_range(0..LogLevel::ALL.len())];
    let service = LOG_SERVICES[rng.gen_range(0..LOG_SERVICES.len())];
    let mut message = LOG_MESSAGES[rng.gen_range(0..LOG_MESSAGES.len())].to_string();

    if rng.gen::<f64>() > 0.7 {
        message = format!("{} ({}ms)", message, rng.gen_range(0..1000));
    }

    let request_id = Some(random_request_id(rng));
    let user_id = if rng.gen_bool(0.5) {
        Some(format!("user-{}", rng.gen_range(0..1000)))
    } else {
        None
    };
    let duration = match level {
        LogLevel::Info => Some(rng.gen_range(0..1000)),
        _ => None,
    };

    LogRecord {
        id,
        timestamp,
        level,
        service: service.to_string(),
        message,
        request_id,
        user_id,
        duration,
    }
}

/// `count` records backdated within the last hour, ids `log-0..`
pub fn generate_log_batch<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<LogRecord> {
    (0..count)
        .map(|i| {
            let timestamp = backdate(rng, now);
            generate_log_record(rng, format!("log-{}", i), timestamp)
        })
        .collect()
}

pub(crate) fn backdate<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::milliseconds(rng.gen_range(0..LOOKBACK_MS))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn random_request_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..9)
        .map(|_| REQUEST_ID_ALPHABET[rng.gen_range(0..REQUEST_ID_ALPHABET.len())] as char)
        .collect();
    format!("req-{}", suffix)
}
