//! Configuration management for microservices

use crate::error::{PulseError, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Service label carried by every startup and shutdown log line
    pub service_name: String,
    pub deploy_env: String,
    pub shutdown_grace_secs: u64,
}

impl ServiceConfig {
    /// Load from the environment; `SERVICE_NAME` falls back to `default_name`
    pub fn from_env(default_name: &str) -> Result<Self> {
        Ok(Self {
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| default_name.to_string()),
            deploy_env: env::var("DEPLOY_ENV").unwrap_or_else(|_| "production".to_string()),
            shutdown_grace_secs: env::var("SHUTDOWN_GRACE_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|e| PulseError::Config(format!("Invalid SHUTDOWN_GRACE_SECS: {}", e)))?,
        })
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
