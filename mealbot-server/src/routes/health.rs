//! Liveness endpoint.
//!
//! The server is only useful while its SQLite store answers, so the check
//! runs `SELECT 1` and reports 503 when it fails.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health))]
pub struct HealthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// Version plus store reachability.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server and store are up", body = Value),
        (status = 503, description = "Store unreachable", body = Value)
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let (status, label, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok", "ok"),
        Err(e) => {
            warn!(error = %e, "health check: store unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };
    (
        status,
        Json(json!({
            "status": label,
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
        })),
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::entities::memory_store;

    async fn state() -> Arc<AppState> {
        let store = memory_store().await;
        Arc::new(AppState::new(Config::for_tests("http://127.0.0.1:9"), store).unwrap())
    }

    #[tokio::test]
    async fn reachable_store_reports_ok() {
        let (status, Json(body)) = get_health(State(state().await)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn closed_store_reports_503() {
        let state = state().await;
        state.store.close().await;

        let (status, Json(body)) = get_health(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["database"], "unavailable");
    }
}
