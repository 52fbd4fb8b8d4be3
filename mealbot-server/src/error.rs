//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! Upstream failures are reported to the caller with diagnostic detail.
//! Store errors are logged in full and surfaced only as a generic message so
//! SQL and file paths never reach clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mealbot_gateway::GatewayError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Longest slice of an upstream body echoed back to the caller.
const MAX_DIAGNOSTIC_BYTES: usize = 2048;

/// All errors that can occur in the mealbot-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or malformed request.
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller referenced a resource that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The LLM gateway could not be reached (or did not answer in time).
    #[error("transport error: {0}")]
    Transport(String),

    /// The gateway answered with a non-JSON body or a failure status.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The gateway's JSON reply lacks a usable `message` field.
    #[error("upstream schema error: {0}")]
    UpstreamSchema(String),

    /// A store write or read failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            // Client-facing errors: expose the message directly.
            ServerError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),

            ServerError::Transport(m) => {
                error!(error = %m, "LLM gateway unreachable");
                (StatusCode::BAD_GATEWAY, format!("LLM gateway unreachable: {m}"))
            }
            ServerError::Upstream(m) => {
                error!(error = %m, "LLM gateway failure");
                (StatusCode::BAD_GATEWAY, m.clone())
            }
            ServerError::UpstreamSchema(m) => {
                error!(error = %m, "LLM gateway reply has no message");
                (StatusCode::BAD_GATEWAY, m.clone())
            }

            // Internal errors: log the full detail, return a generic message.
            ServerError::Persistence(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

impl From<GatewayError> for ServerError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Transport(e) => ServerError::Transport(e.to_string()),
            GatewayError::NonJson { status, body } => ServerError::Upstream(format!(
                "LLM gateway reply is not JSON (status {status}): {}",
                truncate(&body)
            )),
            GatewayError::Status { status, body } => ServerError::Upstream(format!(
                "LLM gateway returned status {status}: {}",
                truncate(&body)
            )),
            GatewayError::Decode(e) => {
                ServerError::UpstreamSchema(format!("unexpected LLM gateway reply: {e}"))
            }
            GatewayError::InvalidConfig { message } => ServerError::Internal(message),
        }
    }
}

impl From<validator::ValidationErrors> for ServerError {
    fn from(e: validator::ValidationErrors) -> Self {
        ServerError::Validation(e.to_string())
    }
}

/// Cut `body` to at most [`MAX_DIAGNOSTIC_BYTES`] on a char boundary.
fn truncate(body: &str) -> &str {
    if body.len() <= MAX_DIAGNOSTIC_BYTES {
        return body;
    }
    let mut end = MAX_DIAGNOSTIC_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
