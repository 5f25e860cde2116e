//! Error types for synthetic telemetry

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SynthError>;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
