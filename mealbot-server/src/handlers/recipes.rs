//! Where extracted recipes are written.
//!
//! The chat proxy only needs "store this recipe, give me back its id"; it
//! does not care whether the recipe lands in the local SQLite store or in a
//! recipe service reached over HTTP.

use std::future::Future;

use mealbot_gateway::{GatewayError, RemoteRecipeClient};
use mealbot_types::{NewRecipe, Recipe};
use thiserror::Error;

use crate::entities::{RecipeStore, SqliteStore};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("local store: {0}")]
    Store(#[from] sqlx::Error),

    #[error("recipe service: {0}")]
    Remote(#[from] GatewayError),
}

pub trait RecipeWriter: Send + Sync + 'static {
    fn write_recipe(
        &self,
        recipe: NewRecipe,
    ) -> impl Future<Output = Result<Recipe, SaveError>> + Send;
}

impl RecipeWriter for SqliteStore {
    async fn write_recipe(&self, recipe: NewRecipe) -> Result<Recipe, SaveError> {
        Ok(self.create_recipe(recipe).await?)
    }
}

impl RecipeWriter for RemoteRecipeClient {
    async fn write_recipe(&self, recipe: NewRecipe) -> Result<Recipe, SaveError> {
        Ok(RemoteRecipeClient::save(self, &recipe).await?)
    }
}

/// The writer chosen at startup from `MEALBOT_RECIPE_STORE_URL`.
#[derive(Debug, Clone)]
pub enum RecipeSink {
    Local(SqliteStore),
    Remote(RemoteRecipeClient),
}

impl RecipeWriter for RecipeSink {
    async fn write_recipe(&self, recipe: NewRecipe) -> Result<Recipe, SaveError> {
        match self {
            RecipeSink::Local(store) => store.write_recipe(recipe).await,
            RecipeSink::Remote(client) => client.write_recipe(recipe).await,
        }
    }
}
