use std::future::Future;

use mealbot_types::ExperimentResult;

use crate::entities::{dao::ExperimentRecord, parse_timestamp, SqliteStore};

pub trait ExperimentStore: Send + Sync + 'static {
    fn insert_experiment(
        &self,
        record: ExperimentRecord,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Newest first.
    fn list_experiments(
        &self,
    ) -> impl Future<Output = Result<Vec<ExperimentRecord>, sqlx::Error>> + Send;
}

type ExperimentRow = (String, String, String, String, String, f64, String, f64, f64, String);

impl ExperimentStore for SqliteStore {
    async fn insert_experiment(&self, record: ExperimentRecord) -> Result<(), sqlx::Error> {
        let r = &record.result;
        let qa_result =
            serde_json::to_string(&r.qa_result).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let recipe_result = serde_json::to_string(&r.recipe_result)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let created_at = record.created_at.to_rfc3339();
        sqlx::query(
            "INSERT INTO experiments (id, prompt_str, provider, model, qa_result, qa_score, \
             recipe_result, recipe_score, average_score, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&record.id)
        .bind(&r.prompt_str)
        .bind(&r.provider)
        .bind(&r.model)
        .bind(&qa_result)
        .bind(r.qa_score)
        .bind(&recipe_result)
        .bind(r.recipe_score)
        .bind(r.average_score)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_experiments(&self) -> Result<Vec<ExperimentRecord>, sqlx::Error> {
        let rows: Vec<ExperimentRow> = sqlx::query_as(
            "SELECT id, prompt_str, provider, model, qa_result, qa_score, \
             recipe_result, recipe_score, average_score, created_at \
             FROM experiments ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(
                |(
                    id,
                    prompt_str,
                    provider,
                    model,
                    qa_result,
                    qa_score,
                    recipe_result,
                    recipe_score,
                    average_score,
                    created_at,
                )| {
                    Ok(ExperimentRecord {
                        id,
                        result: ExperimentResult {
                            prompt_str,
                            provider,
                            model,
                            qa_result: decode_list(&qa_result)?,
                            qa_score,
                            recipe_result: decode_list(&recipe_result)?,
                            recipe_score,
                            average_score,
                        },
                        created_at: parse_timestamp(&created_at, "experiments.created_at"),
                    })
                },
            )
            .collect()
    }
}

fn decode_list(raw: &str) -> Result<Vec<serde_json::Value>, sqlx::Error> {
    serde_json::from_str(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
