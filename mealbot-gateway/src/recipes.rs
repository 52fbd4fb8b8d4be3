use mealbot_types::{NewRecipe, Recipe};
use reqwest::Client;

use crate::client::read_json;
use crate::error::GatewayError;

/// Client for a recipe store running behind its own HTTP service.
///
/// Each call stores exactly one recipe; the service assigns the id.
#[derive(Debug, Clone)]
pub struct RemoteRecipeClient {
    client: Client,
    base_url: String,
}

impl RemoteRecipeClient {
    pub(crate) fn from_parts(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub fn save_url(&self) -> String {
        format!("{}/recipes/save", self.base_url)
    }

    pub async fn save(&self, recipe: &NewRecipe) -> Result<Recipe, GatewayError> {
        let resp = self.client.post(self.save_url()).json(recipe).send().await?;
        let raw = read_json(resp).await?.ensure_success()?;
        Ok(serde_json::from_value(raw.body)?)
    }
}
