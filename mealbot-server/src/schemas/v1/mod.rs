pub mod chat;
pub mod experiment;
pub mod session;
