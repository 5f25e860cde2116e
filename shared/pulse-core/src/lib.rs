//! Pulse Core - shared service infrastructure
//!
//! This crate provides:
//! - Standard service trait every Pulse microservice implements
//! - Liveness and readiness probe bodies
//! - Error handling and environment-driven configuration

pub mod config;
pub mod error;
pub mod service;

pub use config::ServiceConfig;
pub use error::{PulseError, Result};
pub use service::{HealthStatus, MicroserviceRuntime, PulseService, ReadinessStatus};
