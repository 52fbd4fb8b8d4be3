use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::entities::ChatStore;
use crate::error::ServerError;
use crate::schemas::v1::session::MessageResponse;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_session_messages),
    components(schemas(MessageResponse))
)]
pub struct SessionApi;

/// Register session routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/sessions/{id}/messages", get(list_session_messages))
}

/// Chat history of one session, oldest first.  Unknown sessions are empty.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{id}/messages",
    tag = "sessions",
    params(("id" = String, Path, description = "Chat session id")),
    responses(
        (status = 200, description = "Session messages retrieved", body = Vec<MessageResponse>),
        (status = 500, description = "Store error"),
    )
)]
pub async fn list_session_messages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MessageResponse>>, ServerError> {
    let messages = state.store.list_messages(&id).await?;
    Ok(Json(messages.into_iter().map(|m| m.to_response()).collect()))
}
