//! Side effects that must never fail a request.
//!
//! A [`BestEffort`] can only be consumed by logging it, so a best-effort
//! write cannot be `?`-propagated into the response path by accident.

use std::fmt::Display;
use std::future::Future;

use tracing::warn;

/// Outcome of an auxiliary write.
#[derive(Debug)]
#[must_use = "log the outcome with `.log(..)`"]
pub struct BestEffort(Result<(), String>);

impl BestEffort {
    /// Log a failure at `warn` and report whether the write went through.
    pub fn log(self, action: &'static str) -> bool {
        match self.0 {
            Ok(()) => true,
            Err(error) => {
                warn!(action, %error, "best-effort write failed; continuing");
                false
            }
        }
    }
}

/// Run `write` on its own task and wait for it.
///
/// The write is owned by the runtime, so it still completes if the request
/// future is dropped (client disconnect) after the write was issued.
pub async fn detached<F, E>(write: F) -> BestEffort
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    match tokio::spawn(write).await {
        Ok(Ok(())) => BestEffort(Ok(())),
        Ok(Err(e)) => BestEffort(Err(e.to_string())),
        Err(e) => BestEffort(Err(format!("write task did not finish: {e}"))),
    }
}
