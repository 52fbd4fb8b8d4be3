//! Recipe records.
//!
//! [`NewRecipe`] is what a client (or the LLM gateway) proposes; [`Recipe`] is
//! what a store hands back after assigning identity.  `NewRecipe` has no `id`
//! field, so an `id` present in incoming JSON is ignored during
//! deserialization and can never reach storage.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Recipe fields without identity.  JSON keys are camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    pub cook_time: String,
    pub ingredients: Vec<String>,
    pub image: String,
    pub rating: f64,
    pub suitable_for: String,
    #[serde(default)]
    pub suitable_body_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub tags: Vec<String>,
    pub steps: Vec<String>,
    pub servings: String,
    pub nutritional_info: String,
}

/// A stored recipe: the proposed fields plus the store-assigned `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub id: String,
    #[serde(flatten)]
    pub fields: NewRecipe,
}

impl Recipe {
    pub fn new(id: impl Into<String>, fields: NewRecipe) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}
