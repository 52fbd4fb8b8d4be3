use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use mealbot_types::{NewRecipe, Recipe};
use tracing::info;
use utoipa::OpenApi;

use crate::entities::RecipeStore;
use crate::error::ServerError;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(save_recipe, get_recipe),
    components(schemas(NewRecipe, Recipe))
)]
pub struct RecipesApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recipes/save", post(save_recipe))
        .route("/recipes/{id}", get(get_recipe))
}

/// Store a recipe.  Any `id` in the body is ignored; a new one is assigned.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/save",
    tag = "recipes",
    request_body = NewRecipe,
    responses(
        (status = 201, description = "Recipe stored", body = Recipe),
        (status = 422, description = "Body is not a recipe"),
        (status = 500, description = "Store error"),
    )
)]
pub async fn save_recipe(
    State(state): State<Arc<AppState>>,
    Json(recipe): Json<NewRecipe>,
) -> Result<(StatusCode, Json<Recipe>), ServerError> {
    let stored = state.store.create_recipe(recipe).await?;
    info!(recipe_id = %stored.id, title = %stored.fields.title, "recipe stored");
    Ok((StatusCode::CREATED, Json(stored)))
}

#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    tag = "recipes",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe found", body = Recipe),
        (status = 404, description = "No such recipe"),
    )
)]
pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ServerError> {
    state
        .store
        .get_recipe(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("recipe '{id}' not found")))
}
