use std::future::Future;
use std::str::FromStr;

use mealbot_types::ChatRole;

use crate::entities::{dao::ChatMessage, parse_timestamp, SqliteStore};

/// Append-only log of chat turns.
///
/// Appends are not idempotent: every call writes a new row.
pub trait ChatStore: Send + Sync + 'static {
    fn append_message(
        &self,
        msg: ChatMessage,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// All turns of `session_id` in insertion order.
    fn list_messages(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Vec<ChatMessage>, sqlx::Error>> + Send;
}

impl ChatStore for SqliteStore {
    async fn append_message(&self, msg: ChatMessage) -> Result<(), sqlx::Error> {
        let created_at = msg.created_at.to_rfc3339();
        sqlx::query(
            "INSERT INTO chat_messages (id, session_id, role, content, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&msg.id)
        .bind(&msg.session_id)
        .bind(msg.role.to_string())
        .bind(&msg.content)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let rows: Vec<(String, String, String, String, String)> = sqlx::query_as(
            "SELECT id, session_id, role, content, created_at \
             FROM chat_messages WHERE session_id = ?1 ORDER BY seq ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(id, session_id, role, content, created_at)| {
                let role = match ChatRole::from_str(&role) {
                    Ok(r) => r,
                    Err(_) => {
                        tracing::warn!(message_id = %id, role = %role, "skipping message with unknown role");
                        return None;
                    }
                };
                Some(ChatMessage {
                    id,
                    session_id,
                    role,
                    content,
                    created_at: parse_timestamp(&created_at, "chat_messages.created_at"),
                })
            })
            .collect())
    }
}
