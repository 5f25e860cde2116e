//! Fixed template tables the generators sample from

use crate::model::Severity;

pub struct AlertTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub service: &'static str,
    pub severity: Severity,
}

pub static ALERT_TEMPLATES: [AlertTemplate; 7] = [
    AlertTemplate {
        title: "High CPU Usage",
        description: "CPU usage exceeded 90% threshold",
        service: "web-server-01",
        severity: Severity::Critical,
    },
    AlertTemplate {
        title: "Database Connection Pool Full",
        description: "All database connections are in use",
        service: "postgres-primary",
        severity: Severity::Warning,
    },
    AlertTemplate {
        title: "Disk Space Low",
        description: "Available disk space below 10%",
        service: "storage-node-03",
        severity: Severity::Warning,
    },
    AlertTemplate {
        title: "API Response Time High",
        description: "Average response time exceeded 2 seconds",
        service: "api-gateway",
        severity: Severity::Critical,
    },
    AlertTemplate {
        title: "Memory Usage High",
        description: "Memory usage exceeded 85% threshold",
        service: "app-server-02",
        severity: Severity::Warning,
    },
    AlertTemplate {
        title: "Service Health Check Failed",
        description: "Health check endpoint returning 500 errors",
        service: "user-service",
        severity: Severity::Critical,
    },
    AlertTemplate {
        title: "Cache Hit Rate Low",
        description: "Redis cache hit rate below 80%",
        service: "redis-cluster",
        severity: Severity::Info,
    },
];

pub static SERVER_NAMES: [&str; 10] = [
    "web-server-01",
    "web-server-02",
    "api-gateway-01",
    "api-gateway-02",
    "db-primary",
    "db-replica-01",
    "cache-redis-01",
    "worker-node-01",
    "worker-node-02",
    "load-balancer",
];

pub static LOG_SERVICES: [&str; 5] = [
    "api-gateway",
    "user-service",
    "payment-service",
    "notification-service",
    "auth-service",
];

pub static LOG_MESSAGES: [&str; 15] = [
    "Request processed successfully",
    "Database connection established",
    "Cache miss for key: user_session_",
    "Authentication token validated",
    "Payment processing initiated",
    "Email notification sent",
    "Rate limit exceeded for IP",
    "Database query timeout",
    "Invalid request parameters",
    "Service health check passed",
    "Memory usage threshold exceeded",
    "Connection pool exhausted",
    "SSL certificate expires in 30 days",
    "Backup process completed",
    "Configuration reloaded",
];

/// Base value and spread for each dashboard series, in table column order.
/// `name` is the series key in documents and the metrics table header.
pub struct SeriesProfile {
    pub name: &'static str,
    pub base: f64,
    pub variance: f64,
}

pub const METRIC_PROFILES: [SeriesProfile; 6] = [
    SeriesProfile { name: "responseTime", base: 150.0, variance: 50.0 },
    SeriesProfile { name: "errorRate", base: 2.0, variance: 1.0 },
    SeriesProfile { name: "throughput", base: 1000.0, variance: 200.0 },
    SeriesProfile { name: "cpuUsage", base: 65.0, variance: 20.0 },
    SeriesProfile { name: "memoryUsage", base: 70.0, variance: 15.0 },
    SeriesProfile { name: "diskUsage", base: 45.0, variance: 10.0 },
];

pub static POD_NAMES: [&str; 8] = [
    "api-gateway",
    "user-service",
    "payment-service",
    "notification-service",
    "auth-service",
    "frontend-app",
    "worker-queue",
    "scheduler",
];

pub static CLUSTER_SERVICE_NAMES: [&str; 4] = [
    "api-gateway-svc",
    "user-service-svc",
    "payment-service-svc",
    "auth-service-svc",
];
