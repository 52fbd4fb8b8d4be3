use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A prompt/model combination to evaluate against a recorded QA history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExperimentRequest {
    /// QA history as the JSON string the evaluator expects.
    pub qa_history_json: String,
    pub provider: String,
    pub model: String,
    pub prompt_str: String,
}

/// Scores returned by the gateway's evaluation run.
///
/// Missing scores default to `0` and missing result lists to empty, matching
/// how partial evaluator output is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExperimentResult {
    #[serde(default)]
    pub prompt_str: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub qa_result: Vec<serde_json::Value>,
    #[serde(default)]
    pub qa_score: f64,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub recipe_result: Vec<serde_json::Value>,
    #[serde(default)]
    pub recipe_score: f64,
    #[serde(default)]
    pub average_score: f64,
}
