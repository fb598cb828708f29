//! Voting Error Types
//!
//! This module provides voting-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Voting-specific result type alias
pub type VotingResult<T> = Result<T, VotingError>;

/// Voting-specific error variants
///
/// These are domain-specific errors that map to appropriate HTTP status
/// codes and stable machine-readable codes at the transport boundary.
#[derive(Debug, Error)]
pub enum VotingError {
    /// Creation-time validation failed
    #[error("invalid polling: {0}")]
    InvalidPolling(String),

    /// Request body could not be read as a vote
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Lookup against a polling that does not exist
    #[error("polling not found")]
    PollingNotFound,

    /// Contestant is not part of the polling
    #[error("contestant not found in polling")]
    UnknownContestant,

    /// Vote arrived outside the polling window
    #[error("polling is closed for votes")]
    PollingClosed,

    /// Anti-fraud rejected the fingerprint
    #[error("vote limit reached")]
    RateLimited,

    /// Queue payload the consumer cannot decode; fatal for the worker
    #[error("malformed queue payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// Tally store error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Fast store error (queue, counters, rate limiter)
    #[error("fast store error: {0}")]
    FastStore(#[from] redis::RedisError),

    /// Cancellation observed
    #[error("operation cancelled")]
    Cancelled,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl VotingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            VotingError::InvalidPolling(_)
            | VotingError::InvalidPayload(_)
            | VotingError::UnknownContestant => StatusCode::BAD_REQUEST,
            VotingError::PollingNotFound => StatusCode::NOT_FOUND,
            VotingError::PollingClosed => StatusCode::CONFLICT,
            VotingError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            VotingError::MalformedPayload(_)
            | VotingError::Database(_)
            | VotingError::FastStore(_)
            | VotingError::Cancelled
            | VotingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            VotingError::InvalidPolling(_)
            | VotingError::InvalidPayload(_)
            | VotingError::UnknownContestant => ErrorKind::BadRequest,
            VotingError::PollingNotFound => ErrorKind::NotFound,
            VotingError::PollingClosed => ErrorKind::Conflict,
            VotingError::RateLimited => ErrorKind::TooManyRequests,
            VotingError::MalformedPayload(_)
            | VotingError::Database(_)
            | VotingError::FastStore(_)
            | VotingError::Cancelled
            | VotingError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable code surfaced to clients and metrics
    pub fn code(&self) -> &'static str {
        match self {
            VotingError::InvalidPolling(_) => "invalid_polling",
            VotingError::InvalidPayload(_) => "invalid_payload",
            VotingError::PollingNotFound => "not_found",
            VotingError::UnknownContestant => "unknown_contestant",
            VotingError::PollingClosed => "polling_closed",
            VotingError::RateLimited => "rate_limited",
            VotingError::MalformedPayload(_)
            | VotingError::Database(_)
            | VotingError::FastStore(_)
            | VotingError::Cancelled
            | VotingError::Internal(_) => "internal_error",
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            VotingError::Database(e) => {
                tracing::error!(error = %e, "Voting database error");
            }
            VotingError::FastStore(e) => {
                tracing::error!(error = %e, "Voting fast store error");
            }
            VotingError::MalformedPayload(e) => {
                tracing::error!(error = %e, "Malformed vote payload");
            }
            VotingError::Internal(msg) => {
                tracing::error!(message = %msg, "Voting internal error");
            }
            VotingError::RateLimited => {
                tracing::warn!("Vote rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Voting error");
            }
        }
    }
}

impl From<VotingError> for AppError {
    fn from(err: VotingError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for VotingError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = Json(serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
