//! Chat proxy route.
//!
//! Forwards the conversation to the LLM gateway through
//! [`crate::handlers::ChatProxy`].  When `session_id` is set, the last user
//! turn and the assistant reply are recorded in the chat log.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use mealbot_types::{ChatTurn, ProxyResponse};
use tracing::info;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::v1::chat::ProxyChatRequest;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(proxy_chat),
    components(schemas(ProxyChatRequest, ProxyResponse, ChatTurn))
)]
pub struct ChatApi;

/// Register chat routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/proxy-chat", post(proxy_chat))
}

/// Proxy a conversation to the LLM gateway (`POST /api/v1/proxy-chat`).
///
/// When the gateway flags its reply as a recipe list, every recipe is stored
/// and `message` carries the stored recipes (with ids) as a JSON array.
#[utoipa::path(
    post,
    path = "/api/v1/proxy-chat",
    tag = "chat",
    request_body = ProxyChatRequest,
    responses(
        (status = 200, description = "Gateway reply", body = ProxyResponse),
        (status = 400, description = "Empty or oversized conversation"),
        (status = 502, description = "LLM gateway unreachable or returned an unusable reply"),
    )
)]
pub async fn proxy_chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProxyChatRequest>,
) -> Result<Json<ProxyResponse>, ServerError> {
    info!(
        session_id = ?req.session_id,
        feature = ?req.feature,
        turns = req.messages.len(),
        "proxy chat request"
    );
    let resp = state.chat_proxy().run(req).await?;
    info!(is_recipe = resp.is_recipe, len = resp.message.len(), "proxy chat done");
    Ok(Json(resp))
}
