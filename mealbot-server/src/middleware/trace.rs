use crate::state::AppState;
use crate::error::ServerError;
use axum::{
    body::{to_bytes, Body, HttpBody},
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

pub static X_TRACE_ID: &str = "x-trace-id";

/// JSON bodies up to this size are written to the debug log.
const MAX_LOGGED_BODY: usize = 1024;

/// Tag every request with a trace ID (taken from `x-trace-id` when the caller
/// sent a valid UUID) and run it inside an `http_request` span.
pub async fn trace_middleware(
    State(_state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %method,
        path = %path,
    );

    async move {
        info!("→ request started");
        let header_value = HeaderValue::from_str(&trace_id.to_string()).ok();

        let (parts, body) = req.into_parts();
        let body = match log_small_json("request", &parts.headers, body).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to read request body");
                return ServerError::Validation("failed to read request body".into())
                    .into_response();
            }
        };
        let mut req = Request::from_parts(parts, body);
        if let Some(v) = header_value.clone() {
            req.headers_mut().insert(X_TRACE_ID, v);
        }

        let response = next.run(req).await;

        let (parts, body) = response.into_parts();
        let mut response = match log_small_json("response", &parts.headers, body).await {
            Ok(body) => Response::from_parts(parts, body),
            Err(e) => ServerError::Internal(format!("failed to read response body: {e}"))
                .into_response(),
        };
        if let Some(v) = header_value {
            response.headers_mut().insert(X_TRACE_ID, v);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// Log a JSON body at debug level when its exact size is known and small.
///
/// Only such bodies are buffered.  Streamed, large or non-JSON bodies pass
/// through untouched, so size limits stay with the extractors.
async fn log_small_json(
    direction: &str,
    headers: &header::HeaderMap,
    body: Body,
) -> Result<Body, axum::Error> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let small = body
        .size_hint()
        .exact()
        .is_some_and(|n| n > 0 && n <= MAX_LOGGED_BODY as u64);

    if !(is_json && small) {
        return Ok(body);
    }

    let bytes = to_bytes(body, MAX_LOGGED_BODY).await?;
    if let Ok(text) = std::str::from_utf8(&bytes) {
        debug!(direction, body = %text, "body");
    }
    Ok(Body::from(bytes))
}
