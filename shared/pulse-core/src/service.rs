//! Service infrastructure for all microservices

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use crate::config::ServiceConfig;
use crate::error::{PulseError, Result};

/// Health status for liveness probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub service_id: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Readiness status for readiness probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessStatus {
    pub ready: bool,
    pub service_id: String,
}

/// Standard trait all microservices must implement
#[async_trait]
pub trait PulseService: Send + Sync + 'static {
    /// Service identifier (e.g., "feed-gateway")
    fn service_id(&self) -> &'static str;

    /// Service version
    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Graceful shutdown
    async fn shutdown(&self) -> Result<()>;

    /// Start the service (HTTP servers, background loops, etc.)
    async fn start(&self) -> Result<()>;
}

/// Standard microservice runtime bootstrap
pub struct MicroserviceRuntime {
    config: ServiceConfig,
    start_time: std::time::Instant,
}

impl MicroserviceRuntime {
    /// Run a microservice with standard lifecycle management.
    ///
    /// Returns when a shutdown signal arrives or when `start` itself returns,
    /// whichever happens first. A failed `start` is reported to the caller.
    pub async fn run<S: PulseService>(service: Arc<S>, config: ServiceConfig) -> Result<()> {
        let runtime = Self {
            config,
            start_time: std::time::Instant::now(),
        };

        info!(
            service = %runtime.config.service_name,
            service_id = service.service_id(),
            version = service.version(),
            deploy_env = %runtime.config.deploy_env,
            "Starting microservice"
        );

        let service_clone = service.clone();
        let mut service_handle = tokio::spawn(async move { service_clone.start().await });

        let outcome = tokio::select! {
            _ = Self::wait_for_shutdown() => {
                info!("Shutdown signal received, gracefully stopping...");
                Ok(())
            }
            joined = &mut service_handle => match joined {
                Ok(Ok(())) => {
                    info!("Service exited");
                    Ok(())
                }
                Ok(Err(e)) => {
                    error!(error = %e, "Service error");
                    Err(e)
                }
                Err(e) => Err(PulseError::Internal(format!("service task failed: {}", e))),
            },
        };

        match tokio::time::timeout(runtime.config.shutdown_grace(), service.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Error during shutdown: {}", e),
            Err(_) => warn!(
                grace_secs = runtime.config.shutdown_grace_secs,
                "Shutdown did not finish within grace period"
            ),
        }

        service_handle.abort();

        info!(
            service = %runtime.config.service_name,
            uptime_seconds = runtime.start_time.elapsed().as_secs(),
            "Microservice stopped"
        );

        outcome
    }

    async fn wait_for_shutdown() {
        let ctrl_c = async {
            signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to listen for SIGTERM")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    }
}
