use std::future::Future;

use mealbot_types::{ExperimentRequest, ExperimentResult, ProxyPayload};
use reqwest::{Client, Response};
use tracing::debug;

use crate::error::GatewayError;
use crate::reply::RawReply;

/// Anything that can carry a conversation to the LLM gateway.
///
/// [`GatewayClient`] is the HTTP implementation; tests substitute their own.
pub trait ChatGateway: Send + Sync + 'static {
    /// Send the whole conversation and return the decoded reply.
    ///
    /// A non-2xx status is *not* an error here: the caller decides, after the
    /// body has been confirmed to be JSON.
    fn send(
        &self,
        payload: &ProxyPayload,
    ) -> impl Future<Output = Result<RawReply, GatewayError>> + Send;
}

/// HTTP client for the LLM gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
    chat_path: String,
}

impl GatewayClient {
    pub(crate) fn from_parts(client: Client, base_url: String, chat_path: String) -> Self {
        Self {
            client,
            base_url,
            chat_path,
        }
    }

    /// Full URL chat turns are posted to.
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, self.chat_path)
    }

    /// Full URL experiments are posted to.
    pub fn experiment_url(&self) -> String {
        format!("{}/test", self.chat_url())
    }

    /// Evaluate a prompt/model combination on the gateway.
    pub async fn run_experiment(
        &self,
        req: &ExperimentRequest,
    ) -> Result<ExperimentResult, GatewayError> {
        let resp = self.client.post(self.experiment_url()).json(req).send().await?;
        let raw = read_json(resp).await?.ensure_success()?;
        Ok(serde_json::from_value(raw.body)?)
    }
}

impl ChatGateway for GatewayClient {
    async fn send(&self, payload: &ProxyPayload) -> Result<RawReply, GatewayError> {
        let url = self.chat_url();
        debug!(%url, turns = payload.messages.len(), "forwarding conversation to gateway");
        let resp = self.client.post(&url).json(payload).send().await?;
        let raw = read_json(resp).await?;
        debug!(status = raw.status, "gateway replied");
        Ok(raw)
    }
}

/// Read the full body and decode it as JSON, keeping the raw text on failure.
pub(crate) async fn read_json(resp: Response) -> Result<RawReply, GatewayError> {
    let status = resp.status().as_u16();
    let text = resp.text().await?;
    match serde_json::from_str(&text) {
        Ok(body) => Ok(RawReply { status, body }),
        Err(_) => Err(GatewayError::NonJson { status, body: text }),
    }
}
