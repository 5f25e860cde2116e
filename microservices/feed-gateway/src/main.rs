//! Feed Gateway
//!
//! Synthetic telemetry feed for the monitoring dashboard:
//! - Snapshot endpoints (metrics, alerts, servers, logs, health, infrastructure, analytics, database)
//! - Alert acknowledgement and notification echoes
//! - JSON / CSV export downloads
//! - Server-sent-event log stream with a bounded session lifetime

use pulse_core::{MicroserviceRuntime, PulseError, PulseService, Result, ServiceConfig};
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod error;
mod metrics;
mod stream;

#[cfg(test)]
mod tests;

pub use config::FeedConfig;

const SERVICE_ID: &str = "feed-gateway";

#[tokio::main]
async fn main() -> Result<()> {
    let service_config = ServiceConfig::from_env(SERVICE_ID)?;
    pulse_telemetry::init(&service_config.service_name)
        .map_err(|e| PulseError::Internal(e.to_string()))?;

    info!(service = %service_config.service_name, "Starting Feed Gateway");

    let service = Arc::new(FeedGatewayService::new(&service_config.service_name)?);
    MicroserviceRuntime::run(service, service_config).await
}

pub struct FeedGatewayService {
    state: api::AppState,
}

impl FeedGatewayService {
    pub fn new(service_name: &str) -> Result<Self> {
        let config = FeedConfig {
            service_name: service_name.to_string(),
            ..FeedConfig::from_env()?
        };

        info!(
            seeded = config.seed.is_some(),
            burst = config.stream.initial_burst,
            lifetime_secs = config.stream.lifetime.as_secs(),
            "Feed configuration loaded"
        );

        Ok(Self {
            state: api::AppState::new(config),
        })
    }
}

#[async_trait::async_trait]
impl PulseService for FeedGatewayService {
    fn service_id(&self) -> &'static str {
        SERVICE_ID
    }

    async fn shutdown(&self) -> Result<()> {
        info!(
            active_streams = self.state.metrics.active_streams.get(),
            "Shutting down Feed Gateway"
        );
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        let bind = self.state.config.http_bind.clone();
        info!(http = %bind, "Starting Feed Gateway server");

        let app = api::create_router(self.state.clone());
        let listener = tokio::net::TcpListener::bind(&bind).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
