//! Primary database, replicas and cache

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::LatencyPercentiles;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSnapshot {
    pub primary: PrimaryDatabase,
    pub replicas: Vec<ReplicaStatus>,
    pub cache: CacheTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryDatabase {
    pub id: String,
    pub name: String,
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub metrics: PrimaryMetrics,
    pub slow_queries: Vec<SlowQuery>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryMetrics {
    pub connections: ConnectionPool,
    pub performance: QueryPerformance,
    pub storage: StorageUsage,
    pub replication: ReplicationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionPool {
    pub active: u32,
    pub idle: u32,
    pub max: u32,
    /// Percentage of `max` held by active and idle connections
    pub usage: u32,
}

impl ConnectionPool {
    pub fn new(active: u32, idle: u32, max: u32) -> Self {
        let usage = if max == 0 {
            0
        } else {
            ((active + idle) as f64 / max as f64 * 100.0).round() as u32
        };
        Self {
            active,
            idle,
            max,
            usage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPerformance {
    pub query_time: LatencyPercentiles,
    pub throughput: QueryThroughput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryThroughput {
    pub reads: f64,
    pub writes: f64,
    pub transactions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageUsage {
    pub size: String,
    pub used: String,
    pub available: String,
    pub usage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationStatus {
    pub lag: String,
    pub status: String,
    pub replicas: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowQuery {
    pub id: String,
    pub query: String,
    pub duration: u64,
    pub timestamp: DateTime<Utc>,
    pub database: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaStatus {
    pub id: String,
    pub name: String,
    pub status: String,
    pub lag: String,
    pub connections: u32,
    pub query_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheTier {
    pub redis: RedisCluster,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedisCluster {
    pub id: String,
    pub name: String,
    pub status: String,
    pub version: String,
    pub nodes: u32,
    pub metrics: RedisMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisMetrics {
    pub hit_rate: f64,
    pub memory: RedisMemory,
    pub operations: RedisOperations,
    pub connections: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedisMemory {
    pub used: String,
    pub max: String,
    pub usage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedisOperations {
    pub gets: f64,
    pub sets: f64,
    pub deletes: f64,
}

pub fn generate_database_snapshot<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
) -> DatabaseSnapshot {
    let active = 45 + rng.gen_range(0..20);
    let idle = 15 + rng.gen_range(0..10);

    DatabaseSnapshot {
        primary: PrimaryDatabase {
            id: "db-primary".to_string(),
            name: "PostgreSQL Primary".to_string(),
            status: "healthy".to_string(),
            version: "15.3".to_string(),
            uptime: "45 days, 12 hours".to_string(),
            metrics: PrimaryMetrics {
                connections: ConnectionPool::new(active, idle, 100),
                performance: QueryPerformance {
                    query_time: LatencyPercentiles {
                        avg: 50.0 + rng.gen::<f64>() * 100.0,
                        p95: 150.0 + rng.gen::<f64>() * 200.0,
                        p99: 300.0 + rng.gen::<f64>() * 300.0,
                    },
                    throughput: QueryThroughput {
                        reads: 1000.0 + rng.gen::<f64>() * 500.0,
                        writes: 200.0 + rng.gen::<f64>() * 100.0,
                        transactions: 800.0 + rng.gen::<f64>() * 300.0,
                    },
                },
                storage: StorageUsage {
                    size: "2.4TB".to_string(),
                    used: "1.8TB".to_string(),
                    available: "600GB".to_string(),
                    usage: 75.0,
                },
                replication: ReplicationStatus {
                    lag: "0.5ms".to_string(),
                    status: "healthy".to_string(),
                    replicas: 2,
                },
            },
            slow_queries: vec![
                SlowQuery {
                    id: "sq-1".to_string(),
                    query: "SELECT * FROM users WHERE created_at > ?".to_string(),
                    duration: 2500,
                    timestamp: now - Duration::minutes(5),
                    database: "app_production".to_string(),
                },
                SlowQuery {
                    id: "sq-2".to_string(),
                    query: "UPDATE orders SET status = ? WHERE id IN (?)".to_string(),
                    duration: 1800,
                    timestamp: now - Duration::minutes(10),
                    database: "app_production".to_string(),
                },
            ],
        },
        replicas: vec![
            ReplicaStatus {
                id: "db-replica-01".to_string(),
                name: "PostgreSQL Replica 1".to_string(),
                status: "healthy".to_string(),
                lag: "0.3ms".to_string(),
                connections: 25 + rng.gen_range(0..15),
                query_time: 45.0 + rng.gen::<f64>() * 80.0,
            },
            ReplicaStatus {
                id: "db-replica-02".to_string(),
                name: "PostgreSQL Replica 2".to_string(),
                status: "healthy".to_string(),
                lag: "0.7ms".to_string(),
                connections: 30 + rng.gen_range(0..20),
                query_time: 55.0 + rng.gen::<f64>() * 90.0,
            },
        ],
        cache: CacheTier {
            redis: RedisCluster {
                id: "redis-cluster".to_string(),
                name: "Redis Cluster".to_string(),
                status: "healthy".to_string(),
                version: "7.0.11".to_string(),
                nodes: 3,
                metrics: RedisMetrics {
                    hit_rate: 85.0 + rng.gen::<f64>() * 10.0,
                    memory: RedisMemory {
                        used: "2.1GB".to_string(),
                        max: "4GB".to_string(),
                        usage: 52.5,
                    },
                    operations: RedisOperations {
                        gets: 5000.0 + rng.gen::<f64>() * 2000.0,
                        sets: 1000.0 + rng.gen::<f64>() * 500.0,
                        deletes: 100.0 + rng.gen::<f64>() * 50.0,
                    },
                    connections: 150 + rng.gen_range(0..50),
                },
            },
        },
    }
}
