//! Unified error handling
//!
//! `ApiError` is the HTTP-facing error envelope; `GenerationError` is the
//! taxonomy the generation pipeline works with internally. Transient
//! generation failures are retried inside the controller and never cross the
//! API boundary individually.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised inside the generation pipeline.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The provider call exceeded the configured deadline.
    #[error("generation request timed out")]
    Timeout,

    /// Network-level failure talking to the provider.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider returned something that is not JSON (HTML error page,
    /// truncated text, unparseable payload).
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The payload parsed but violates the itinerary schema.
    #[error("invalid itinerary: {}", .0.join("; "))]
    InvalidItinerary(Vec<String>),

    /// All retries and the fallback attempt failed.
    #[error("itinerary generation failed after {attempts} attempts: {message}")]
    Exhausted { attempts: u32, message: String },
}

impl GenerationError {
    /// Whether the controller may retry after this failure.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, GenerationError::Exhausted { .. })
    }

    /// Network conditions get a longer backoff base than validation
    /// failures.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            GenerationError::Timeout | GenerationError::Transport(_)
        )
    }
}

/// HTTP-facing API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Itinerary generation failed")]
    Generation(#[from] GenerationError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Generation(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Generation(_) => "GENERATION_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Validation(_) => "Validation failed".to_string(),
            Self::NotFound(msg) => msg.clone(),
            // Don't leak the underlying provider error; the stored record
            // keeps it for diagnostics.
            Self::Generation(_) => {
                "Failed to generate itinerary. Please try again.".to_string()
            }
            Self::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Generation(e) => {
                tracing::error!(error = %e, "Itinerary generation failed");
            }
            Self::Internal(e) => {
                tracing::error!(error = ?e, "Internal server error");
            }
            _ => {
                tracing::warn!(error = %self, "API error");
            }
        }

        let status = self.status_code();
        let details = match &self {
            Self::Validation(errors) => Some(errors.clone()),
            _ => None,
        };
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_are_flagged_for_longer_backoff() {
        assert!(GenerationError::Timeout.is_network());
        assert!(GenerationError::Transport("connection refused".into()).is_network());
        assert!(!GenerationError::MalformedResponse("<html>".into()).is_network());
        assert!(!GenerationError::InvalidItinerary(vec!["days: empty".into()]).is_network());
    }

    #[test]
    fn exhausted_is_terminal() {
        let err = GenerationError::Exhausted {
            attempts: 3,
            message: "transport error: dns".into(),
        };
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("after 3 attempts"));
        assert!(err.to_string().contains("transport error: dns"));
    }
}
