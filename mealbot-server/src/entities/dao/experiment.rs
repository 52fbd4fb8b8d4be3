use chrono::{DateTime, Utc};
use mealbot_types::ExperimentResult;

/// A row in the `experiments` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentRecord {
    pub id: String,
    pub result: ExperimentResult,
    pub created_at: DateTime<Utc>,
}
