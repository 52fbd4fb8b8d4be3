use crate::entities::ExperimentRecord;
use mealbot_types::ExperimentResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored experiment run.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExperimentResponse {
    pub id: String,
    #[serde(flatten)]
    pub result: ExperimentResult,
    pub created_at: String,
}

impl ExperimentRecord {
    pub fn to_response(&self) -> ExperimentResponse {
        ExperimentResponse {
            id: self.id.clone(),
            result: self.result.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}
