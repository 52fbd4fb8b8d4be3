pub mod chat;
pub mod experiments;
pub mod recipes;
pub mod session;

use crate::state::AppState;
use utoipa::OpenApi;

use axum::Router;
use std::sync::Arc;

/// Routes nested under `/api/v1`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(chat::router())
        .merge(recipes::router())
        .merge(session::router())
        .merge(experiments::router())
}

#[derive(OpenApi)]
#[openapi()]
pub struct V1Api;

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut docs = V1Api::openapi();
    docs.merge(chat::ChatApi::openapi());
    docs.merge(recipes::RecipesApi::openapi());
    docs.merge(session::SessionApi::openapi());
    docs.merge(experiments::ExperimentsApi::openapi());

    docs
}
