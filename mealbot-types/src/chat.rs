use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Author of a persisted chat turn.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the conversation a client submits.
///
/// The role is kept as a free-form string: the gateway decides what it
/// accepts (`"system"` turns are forwarded untouched).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// `true` when the turn was written by the end user.
    pub fn is_user(&self) -> bool {
        self.role.parse::<ChatRole>() == Ok(ChatRole::User)
    }
}

/// Body sent to the LLM gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProxyPayload {
    pub messages: Vec<ChatTurn>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub feature: Option<String>,
}

/// What the proxy endpoint returns to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProxyResponse {
    /// Plain assistant text, or a JSON-encoded array of stored recipes when
    /// `is_recipe` is set.
    pub message: String,
    #[serde(default)]
    pub is_recipe: bool,
}
