//! Pulse Telemetry
//!
//! Structured logging setup and in-process service metrics.

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{Counter, Gauge};
pub use tracing_setup::init_tracing;

/// Install logging for `service_name` using `LOG_LEVEL` and `JSON_LOGS`
pub fn init(service_name: &str) -> Result<(), TelemetryError> {
    init_tracing(service_name, &TelemetryConfig::from_env())
}

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Tracing initialization failed: {0}")]
    TracingInit(String),
}
