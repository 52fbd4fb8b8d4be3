//! Chat proxy orchestration.
//!
//! One call forwards a conversation to the LLM gateway and returns its reply.
//! Around that call it records the user turn (before) and the assistant turn
//! (after) in the chat log, and when the gateway flags the reply as a recipe
//! list it stores every recipe and swaps the message for the stored records.
//!
//! Upstream problems fail the request.  Chat-log and recipe writes are
//! best-effort: their failures are logged and the reply still goes out.

use futures::{future, stream, StreamExt};
use mealbot_gateway::{ChatGateway, ProxyReply, ReplyBody};
use mealbot_types::{ChatRole, NewRecipe, ProxyPayload, ProxyResponse, Recipe};
use serde_json::Value;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::entities::{ChatMessage, ChatStore};
use crate::error::ServerError;
use crate::handlers::best_effort::{self, BestEffort};
use crate::handlers::recipes::RecipeWriter;
use crate::schemas::v1::chat::ProxyChatRequest;

/// Borrowed collaborators for one proxied chat call.
pub struct ChatProxy<'a, G, C, W> {
    pub gateway: &'a G,
    pub chat_log: &'a C,
    pub recipes: &'a W,
    /// Recipe saves allowed in flight at once.
    pub recipe_concurrency: usize,
}

impl<'a, G, C, W> ChatProxy<'a, G, C, W>
where
    G: ChatGateway,
    C: ChatStore + Clone,
    W: RecipeWriter,
{
    pub async fn run(&self, req: ProxyChatRequest) -> Result<ProxyResponse, ServerError> {
        req.validate()?;

        let session_id = non_empty(req.session_id);
        let feature = non_empty(req.feature);

        if let Some(sid) = session_id.as_deref() {
            if let Some(last) = req.messages.last().filter(|t| t.is_user()) {
                self.append(sid, ChatRole::User, &last.content)
                    .await
                    .log("persist user turn");
            }
        }

        let payload = ProxyPayload {
            messages: req.messages,
            session_id: session_id.clone(),
            feature,
        };
        let raw = self.gateway.send(&payload).await?.ensure_success()?;

        let (message, is_recipe) = match raw.into_reply() {
            ProxyReply::WellFormed { message, is_recipe } => (message, is_recipe),
            ProxyReply::Malformed(body) => {
                return Err(ServerError::UpstreamSchema(format!(
                    "LLM gateway reply has no 'message' field: {body}"
                )));
            }
        };
        debug!(is_recipe, len = message.len(), "gateway reply accepted");

        let message = match ReplyBody::decode(&message, is_recipe) {
            ReplyBody::PlainText(text) => text,
            ReplyBody::RecipeList(items) => self.store_recipes(items).await.unwrap_or(message),
        };

        if let Some(sid) = session_id.as_deref() {
            self.append(sid, ChatRole::Assistant, &message)
                .await
                .log("persist assistant turn");
        }

        Ok(ProxyResponse { message, is_recipe })
    }

    /// Store every recipe-shaped item and return the stored list as JSON.
    ///
    /// Items are saved with bounded concurrency; `buffered` yields results in
    /// input order regardless of completion order.  Items that fail are
    /// dropped from the result.  `None` means the message must stay as-is.
    async fn store_recipes(&self, items: Vec<Value>) -> Option<String> {
        let total = items.len();
        let stored: Vec<Recipe> = stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| self.store_one(index, item))
            .buffered(self.recipe_concurrency.max(1))
            .filter_map(future::ready)
            .collect()
            .await;

        info!(stored = stored.len(), total, "extracted recipes stored");

        match serde_json::to_string(&stored) {
            Ok(json) => Some(json),
            Err(e) => {
                warn!(error = %e, "failed to encode stored recipes; keeping original message");
                None
            }
        }
    }

    async fn store_one(&self, index: usize, item: Value) -> Option<Recipe> {
        let recipe: NewRecipe = match serde_json::from_value(item) {
            Ok(r) => r,
            Err(e) => {
                warn!(index, error = %e, "skipping list item that is not a recipe");
                return None;
            }
        };
        match self.recipes.write_recipe(recipe).await {
            Ok(stored) => Some(stored),
            Err(e) => {
                warn!(index, error = %e, "failed to store extracted recipe; continuing");
                None
            }
        }
    }

    async fn append(&self, session_id: &str, role: ChatRole, content: &str) -> BestEffort {
        let store = self.chat_log.clone();
        let msg = ChatMessage::new(session_id, role, content);
        best_effort::detached(async move { store.append_message(msg).await }).await
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
