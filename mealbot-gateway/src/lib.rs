//! Outbound HTTP clients for mealbot.
//!
//! * [`GatewayClient`] talks to the LLM gateway (chat turns, experiments).
//! * [`RemoteRecipeClient`] stores recipes through a recipe service.
//!
//! Both are built from the same [`Builder`], which owns timeout and proxy
//! settings.

pub mod builder;
pub mod client;
pub mod error;
pub mod recipes;
pub mod reply;

pub use builder::{Builder, DEFAULT_CHAT_PATH, DEFAULT_TIMEOUT_SECS};
pub use client::{ChatGateway, GatewayClient};
pub use error::GatewayError;
pub use recipes::RemoteRecipeClient;
pub use reply::{ProxyReply, RawReply, ReplyBody};

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use tokio::net::TcpListener;

    /// Serve `app` on an ephemeral local port and return its base URL.
    pub async fn spawn(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// A URL nothing is listening on.
    pub async fn refused_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }
}
