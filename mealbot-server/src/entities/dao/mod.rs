pub mod chat;
pub mod experiment;

pub use chat::ChatMessage;
pub use experiment::ExperimentRecord;
