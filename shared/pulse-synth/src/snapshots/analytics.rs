//! Traffic, performance, error and security analytics

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub overview: TrafficOverview,
    pub traffic: TrafficBreakdown,
    pub performance: PerformanceAnalytics,
    pub errors: ErrorAnalytics,
    pub security: SecurityAnalytics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficOverview {
    pub total_requests: u64,
    pub unique_users: u64,
    pub avg_response_time: f64,
    pub error_rate: f64,
    pub uptime: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficBreakdown {
    pub by_country: Vec<TrafficShare>,
    pub by_device: Vec<TrafficShare>,
    pub by_browser: Vec<TrafficShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficShare {
    #[serde(flatten)]
    pub segment: Segment,
    pub requests: u64,
    pub percentage: f64,
}

/// Serialized as `"country": "Germany"` and so on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Country(String),
    Device(String),
    Browser(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalytics {
    pub endpoints: Vec<EndpointPerformance>,
    pub slowest_queries: Vec<SlowQuerySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointPerformance {
    pub path: String,
    pub requests: u64,
    pub avg_response_time: f64,
    pub error_rate: f64,
    pub p95_response_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlowQuerySummary {
    pub query: String,
    pub avg_duration: u64,
    pub executions: u64,
    pub database: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorAnalytics {
    pub by_status_code: Vec<StatusCodeShare>,
    pub top_errors: Vec<TopError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCodeShare {
    pub code: u16,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopError {
    pub message: String,
    pub count: u64,
    pub last_occurred: DateTime<Utc>,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityAnalytics {
    pub threats: ThreatCounts,
    pub attacks: Vec<AttackSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatCounts {
    pub blocked: u64,
    pub suspicious: u64,
    pub malicious: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackSummary {
    #[serde(rename = "type")]
    pub attack_type: String,
    pub count: u64,
    pub blocked: u64,
    pub last_attempt: DateTime<Utc>,
}

pub fn generate_analytics_snapshot<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
) -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        overview: TrafficOverview {
            total_requests: 1_250_000 + rng.gen_range(0..100_000),
            unique_users: 45_000 + rng.gen_range(0..5_000),
            avg_response_time: 150.0 + rng.gen::<f64>() * 50.0,
            error_rate: rng.gen::<f64>() * 3.0,
            uptime: 99.9 - rng.gen::<f64>() * 0.5,
        },
        traffic: TrafficBreakdown {
            by_country: shares(Segment::Country, &[
                ("United States", 450_000, 36.0),
                ("United Kingdom", 200_000, 16.0),
                ("Germany", 150_000, 12.0),
                ("France", 125_000, 10.0),
                ("Canada", 100_000, 8.0),
                ("Others", 225_000, 18.0),
            ]),
            by_device: shares(Segment::Device, &[
                ("Desktop", 750_000, 60.0),
                ("Mobile", 375_000, 30.0),
                ("Tablet", 125_000, 10.0),
            ]),
            by_browser: shares(Segment::Browser, &[
                ("Chrome", 625_000, 50.0),
                ("Safari", 250_000, 20.0),
                ("Firefox", 187_500, 15.0),
                ("Edge", 125_000, 10.0),
                ("Others", 62_500, 5.0),
            ]),
        },
        performance: PerformanceAnalytics {
            endpoints: vec![
                endpoint("/api/users", 125_000, 120.0, 0.5, 250.0),
                endpoint("/api/orders", 87_500, 180.0, 1.2, 350.0),
                endpoint("/api/products", 200_000, 95.0, 0.3, 180.0),
                endpoint("/api/auth", 62_500, 75.0, 2.1, 150.0),
            ],
            slowest_queries: vec![
                SlowQuerySummary {
                    query: "SELECT * FROM orders JOIN users ON orders.user_id = users.id WHERE orders.created_at > ?".to_string(),
                    avg_duration: 2500,
                    executions: 1250,
                    database: "app_production".to_string(),
                },
                SlowQuerySummary {
                    query: "UPDATE inventory SET quantity = quantity - ? WHERE product_id = ?".to_string(),
                    avg_duration: 1800,
                    executions: 3500,
                    database: "app_production".to_string(),
                },
            ],
        },
        errors: ErrorAnalytics {
            by_status_code: vec![
                StatusCodeShare { code: 500, count: 1250, percentage: 45.0 },
                StatusCodeShare { code: 404, count: 875, percentage: 31.5 },
                StatusCodeShare { code: 403, count: 437, percentage: 15.7 },
                StatusCodeShare { code: 502, count: 218, percentage: 7.8 },
            ],
            top_errors: vec![
                top_error("Database connection timeout", 456, now - Duration::minutes(5), "user-service"),
                top_error("Invalid authentication token", 234, now - Duration::minutes(10), "auth-service"),
                top_error("Rate limit exceeded", 189, now - Duration::minutes(15), "api-gateway"),
            ],
        },
        security: SecurityAnalytics {
            threats: ThreatCounts {
                blocked: 1250,
                suspicious: 345,
                malicious: 89,
            },
            attacks: vec![
                attack("SQL Injection", 45, now - Duration::minutes(30)),
                attack("XSS", 23, now - Duration::hours(1)),
                attack("DDoS", 12, now - Duration::hours(2)),
            ],
        },
    }
}

fn shares(label: fn(String) -> Segment, rows: &[(&str, u64, f64)]) -> Vec<TrafficShare> {
    rows.iter()
        .map(|(segment, requests, percentage)| TrafficShare {
            segment: label(segment.to_string()),
            requests: *requests,
            percentage: *percentage,
        })
        .collect()
}

fn endpoint(path: &str, requests: u64, avg: f64, error_rate: f64, p95: f64) -> EndpointPerformance {
    EndpointPerformance {
        path: path.to_string(),
        requests,
        avg_response_time: avg,
        error_rate,
        p95_response_time: p95,
    }
}

fn top_error(message: &str, count: u64, last_occurred: DateTime<Utc>, service: &str) -> TopError {
    TopError {
        message: message.to_string(),
        count,
        last_occurred,
        service: service.to_string(),
    }
}

fn attack(attack_type: &str, count: u64, last_attempt: DateTime<Utc>) -> AttackSummary {
    AttackSummary {
        attack_type: attack_type.to_string(),
        count,
        blocked: count,
        last_attempt,
    }
}
