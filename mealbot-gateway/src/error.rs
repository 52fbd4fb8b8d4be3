use thiserror::Error;

/// Errors that can be returned by mealbot-gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response (connect failure, timeout, reset).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered, but the body was not JSON.
    #[error("upstream returned a non-JSON body (status {status}): {body}")]
    NonJson { status: u16, body: String },

    /// The upstream answered with a non-2xx status.
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was JSON but did not have the expected shape.
    #[error("unexpected upstream response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// A client was configured with an unusable base URL.
    #[error("invalid gateway configuration: {message}")]
    InvalidConfig { message: String },
}

impl GatewayError {
    /// `true` when the error came from the network layer timing out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Transport(e) if e.is_timeout())
    }
}
