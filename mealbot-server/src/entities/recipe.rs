use std::future::Future;

use chrono::Utc;
use mealbot_types::{NewRecipe, Recipe};
use uuid::Uuid;

use crate::entities::SqliteStore;

/// Recipe persistence.  Identity is assigned here and nowhere else.
pub trait RecipeStore: Send + Sync + 'static {
    /// Store `recipe` under a freshly generated id.
    fn create_recipe(
        &self,
        recipe: NewRecipe,
    ) -> impl Future<Output = Result<Recipe, sqlx::Error>> + Send;

    fn get_recipe(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Recipe>, sqlx::Error>> + Send;
}

impl RecipeStore for SqliteStore {
    async fn create_recipe(&self, recipe: NewRecipe) -> Result<Recipe, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let body = serde_json::to_string(&recipe).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let created_at = Utc::now().to_rfc3339();
        sqlx::query("INSERT INTO recipes (id, title, body, created_at) VALUES (?1, ?2, ?3, ?4)")
            .bind(&id)
            .bind(&recipe.title)
            .bind(&body)
            .bind(&created_at)
            .execute(&self.pool)
            .await?;
        Ok(Recipe::new(id, recipe))
    }

    async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>, sqlx::Error> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT id, body FROM recipes WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|(id, body)| {
            let fields: NewRecipe =
                serde_json::from_str(&body).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
            Ok(Recipe::new(id, fields))
        })
        .transpose()
    }
}
