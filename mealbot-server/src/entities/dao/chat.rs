use chrono::{DateTime, Utc};
use mealbot_types::ChatRole;
use uuid::Uuid;

/// A single message row in the `chat_messages` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub session_id: String,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// A fresh turn stamped with a new id and the current time.
    pub fn new(session_id: impl Into<String>, role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}
