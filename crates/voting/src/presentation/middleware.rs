//! Operator Middleware

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::crypto::constant_time_eq;

/// Middleware guarding operator endpoints with a bearer token.
///
/// With no token configured the guard admits everything; operators are
/// expected to set one outside local development.
pub async fn require_operator_token(
    State(expected): State<Option<String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(expected) = expected else {
        return Ok(next.run(req).await);
    };

    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match presented {
        Some(token) if constant_time_eq(token.as_bytes(), expected.as_bytes()) => {
            Ok(next.run(req).await)
        }
        _ => {
            tracing::warn!("Operator endpoint called without a valid token");
            Err(AppError::unauthorized("Operator token required")
                .with_action("Send Authorization: Bearer <token>")
                .into_response())
        }
    }
}
