//! Request types for the chat proxy.

use mealbot_types::ChatTurn;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Maximum allowed size of one turn's content, to prevent memory exhaustion.
pub const MAX_TURN_BYTES: usize = 128 * 1024; // 128 KiB

/// Request body for `POST /api/v1/proxy-chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct ProxyChatRequest {
    /// Chat session to record both turns under.  Empty means "no session".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Gateway feature switch, forwarded verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    /// The whole conversation, oldest first.
    #[validate(
        length(min = 1, message = "messages must not be empty"),
        custom(function = "validate_turn_sizes")
    )]
    pub messages: Vec<ChatTurn>,
}

fn validate_turn_sizes(turns: &[ChatTurn]) -> Result<(), ValidationError> {
    if turns.iter().any(|t| t.content.len() > MAX_TURN_BYTES) {
        let mut err = ValidationError::new("turn_too_large");
        err.message = Some(format!("a message exceeds {MAX_TURN_BYTES} bytes").into());
        return Err(err);
    }
    Ok(())
}
