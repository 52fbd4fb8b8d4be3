use std::env;
use std::time::Duration;

use reqwest::Client;

use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::recipes::RemoteRecipeClient;

/// Path appended to the gateway base URL for chat turns.
pub const DEFAULT_CHAT_PATH: &str = "/constitution-recipe";

/// Default upper bound on one upstream call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Builder shared by every outbound client in this crate.
///
/// # Example
/// ```rust,no_run
/// use mealbot_gateway::Builder;
/// let gateway = Builder::new("http://127.0.0.1:8000/api/v1")
///     .set_timeout_secs(120)
///     .gateway()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    pub(crate) base_url: String,
    pub(crate) chat_path: String,
    pub(crate) timeout: Option<Duration>,
    pub(crate) proxy: Option<String>,
}

impl Builder {
    /// Create a builder for `base_url`.
    ///
    /// Proxy is automatically read from `HTTP_PROXY` / `HTTPS_PROXY` environment variables.
    pub fn new(base_url: impl Into<String>) -> Self {
        let proxy = env::var("HTTP_PROXY")
            .ok()
            .or_else(|| env::var("HTTPS_PROXY").ok());

        Self {
            base_url: base_url.into(),
            chat_path: DEFAULT_CHAT_PATH.to_owned(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            proxy,
        }
    }

    /// Override the chat path (default: [`DEFAULT_CHAT_PATH`]).
    pub fn set_chat_path(mut self, path: impl Into<String>) -> Self {
        self.chat_path = path.into();
        self
    }

    /// Bound every request to `secs` seconds.  `0` removes the bound.
    pub fn set_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }

    /// Override the HTTP/HTTPS proxy URL.
    pub fn set_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the LLM gateway client.
    pub fn gateway(self) -> Result<GatewayClient, GatewayError> {
        let base_url = normalize_base(&self.base_url)?;
        let chat_path = normalize_path(&self.chat_path);
        let client = self.http_client()?;
        Ok(GatewayClient::from_parts(client, base_url, chat_path))
    }

    /// Build a client for a recipe store exposed over HTTP.
    pub fn recipe_store(self) -> Result<RemoteRecipeClient, GatewayError> {
        let base_url = normalize_base(&self.base_url)?;
        let client = self.http_client()?;
        Ok(RemoteRecipeClient::from_parts(client, base_url))
    }

    fn http_client(&self) -> Result<Client, GatewayError> {
        let mut builder = Client::builder()
            .user_agent(concat!("mealbot-gateway/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(ref proxy_url) = self.proxy {
            match reqwest::Proxy::all(proxy_url) {
                Ok(p) => {
                    builder = builder.proxy(p.no_proxy(reqwest::NoProxy::from_env()));
                }
                Err(e) => {
                    tracing::warn!(proxy = %proxy_url, error = %e, "ignoring invalid proxy URL");
                }
            }
        }

        Ok(builder.build()?)
    }
}

fn normalize_base(raw: &str) -> Result<String, GatewayError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(GatewayError::InvalidConfig {
            message: format!("base URL must start with http:// or https://, got {raw:?}"),
        });
    }
    Ok(trimmed.to_owned())
}

fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}
