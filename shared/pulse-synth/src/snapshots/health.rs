//! Overall system health

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::ServerStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub overall: ServerStatus,
    pub uptime: f64,
    pub active_services: u32,
    pub total_services: u32,
    pub response_time: LatencyPercentiles,
    pub error_rate: f64,
    pub throughput: f64,
    pub database: DatabaseHealth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyPercentiles {
    pub avg: f64,
    pub p95: f64,
    pub p99: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub connections: u32,
    pub max_connections: u32,
    pub query_time: f64,
    pub size: String,
}

pub fn generate_health_snapshot<R: Rng + ?Sized>(rng: &mut R) -> HealthSnapshot {
    // Mostly healthy; the rest splits evenly between warning and critical.
    let overall = if rng.gen::<f64>() > 0.1 {
        ServerStatus::Healthy
    } else if rng.gen_bool(0.5) {
        ServerStatus::Warning
    } else {
        ServerStatus::Critical
    };

    HealthSnapshot {
        overall,
        uptime: 99.9 - rng.gen::<f64>() * 0.5,
        active_services: 24 + rng.gen_range(0..2),
        total_services: 25,
        response_time: LatencyPercentiles {
            avg: 150.0 + rng.gen::<f64>() * 100.0,
            p95: 300.0 + rng.gen::<f64>() * 200.0,
            p99: 500.0 + rng.gen::<f64>() * 300.0,
        },
        error_rate: rng.gen::<f64>() * 5.0,
        throughput: 1000.0 + rng.gen::<f64>() * 500.0,
        database: DatabaseHealth {
            connections: 45 + rng.gen_range(0..10),
            max_connections: 100,
            query_time: 50.0 + rng.gen::<f64>() * 100.0,
            size: "2.4TB".to_string(),
        },
    }
}
