//! Request-independent logic behind the routes.

pub mod best_effort;
pub mod chat_proxy;
pub mod recipes;

pub use chat_proxy::ChatProxy;
pub use recipes::RecipeSink;
