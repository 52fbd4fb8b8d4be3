//! Prompt/model experiments.
//!
//! The gateway runs the evaluation; this server only keeps the scores.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use mealbot_types::{ExperimentRequest, ExperimentResult};
use tracing::info;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::entities::{ExperimentRecord, ExperimentStore};
use crate::error::ServerError;
use crate::schemas::v1::experiment::ExperimentResponse;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(run_experiment, list_experiments),
    components(schemas(ExperimentRequest, ExperimentResult, ExperimentResponse))
)]
pub struct ExperimentsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/experiments", get(list_experiments))
        .route("/experiments/test", post(run_experiment))
}

/// Evaluate a prompt/model pair on the gateway and store the scores.
#[utoipa::path(
    post,
    path = "/api/v1/experiments/test",
    tag = "experiments",
    request_body = ExperimentRequest,
    responses(
        (status = 200, description = "Experiment evaluated and stored", body = ExperimentResult),
        (status = 502, description = "Gateway failure"),
        (status = 500, description = "Store error"),
    )
)]
pub async fn run_experiment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExperimentRequest>,
) -> Result<Json<ExperimentResult>, ServerError> {
    let result = state.gateway.run_experiment(&req).await?;

    let record = ExperimentRecord {
        id: Uuid::new_v4().to_string(),
        result: result.clone(),
        created_at: Utc::now(),
    };
    state.store.insert_experiment(record).await?;

    info!(
        provider = %result.provider,
        model = %result.model,
        average_score = result.average_score,
        "experiment stored"
    );
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/experiments",
    tag = "experiments",
    responses(
        (status = 200, description = "Stored experiments, newest first", body = Vec<ExperimentResponse>),
    )
)]
pub async fn list_experiments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ExperimentResponse>>, ServerError> {
    let records = state.store.list_experiments().await?;
    Ok(Json(records.iter().map(|r| r.to_response()).collect()))
}
