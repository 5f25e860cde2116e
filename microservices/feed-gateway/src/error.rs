//! Error types for Feed Gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pulse_synth::SynthError;
use serde_json::json;

/// Result type alias
pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Rejected before anything is generated
    #[error("{0}")]
    InvalidInput(String),

    #[error("Generation failed: {0}")]
    Generation(String),
}

impl From<SynthError> for FeedError {
    fn from(err: SynthError) -> Self {
        FeedError::Generation(err.to_string())
    }
}

impl FeedError {
    pub fn invalid(message: impl Into<String>) -> Self {
        FeedError::InvalidInput(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            FeedError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            FeedError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            FeedError::InvalidInput(message) => {
                tracing::debug!(reason = %message, "Rejected request");
                message.clone()
            }
            FeedError::Generation(_) => {
                tracing::error!("Internal error: {:?}", self);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}
