use crate::entities::ChatMessage;
use mealbot_types::ChatRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub id: String,
    pub session_id: String,
    pub role: ChatRole,
    pub content: String,
    pub created_at: String,
}

impl ChatMessage {
    pub fn to_response(&self) -> MessageResponse {
        MessageResponse {
            id: self.id.clone(),
            session_id: self.session_id.clone(),
            role: self.role,
            content: self.content.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}
