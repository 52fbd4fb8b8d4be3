//! Shared types for mealbot.
//!
//! Everything that crosses a process boundary lives here: the turns a client
//! sends, the payload forwarded to the LLM gateway, recipe records and prompt
//! experiments.  Both `mealbot-gateway` and `mealbot-server` depend on this
//! crate so the two sides of every HTTP call agree on one definition.

pub mod chat;
pub mod experiment;
pub mod recipe;

pub use chat::{ChatRole, ChatTurn, ProxyPayload, ProxyResponse};
pub use experiment::{ExperimentRequest, ExperimentResult};
pub use recipe::{NewRecipe, Recipe};
