//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use mealbot_gateway::{Builder, GatewayClient, GatewayError};

use crate::config::Config;
use crate::entities::SqliteStore;
use crate::handlers::{ChatProxy, RecipeSink};

/// State shared across all HTTP handlers.
///
/// Built once at startup; the store and clients are never replaced.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Chat log, recipe and experiment store.
    pub store: SqliteStore,
    /// LLM gateway client.
    pub gateway: GatewayClient,
    /// Destination for recipes extracted from chat replies.
    pub recipes: RecipeSink,
}

impl AppState {
    /// Wire the outbound clients described by `config` around `store`.
    pub fn new(config: Config, store: SqliteStore) -> Result<Self, GatewayError> {
        let gateway = Builder::new(&config.gateway_url)
            .set_chat_path(&config.gateway_chat_path)
            .set_timeout_secs(config.gateway_timeout_secs)
            .gateway()?;

        let recipes = match &config.recipe_store_url {
            Some(url) => RecipeSink::Remote(
                Builder::new(url)
                    .set_timeout_secs(config.gateway_timeout_secs)
                    .recipe_store()?,
            ),
            None => RecipeSink::Local(store.clone()),
        };

        Ok(Self {
            config: Arc::new(config),
            store,
            gateway,
            recipes,
        })
    }

    /// The chat proxy bound to this state's collaborators.
    pub fn chat_proxy(&self) -> ChatProxy<'_, GatewayClient, SqliteStore, RecipeSink> {
        ChatProxy {
            gateway: &self.gateway,
            chat_log: &self.store,
            recipes: &self.recipes,
            recipe_concurrency: self.config.recipe_concurrency,
        }
    }
}
