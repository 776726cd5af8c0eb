//! Outbound HTTP adapter for the hosted chat-completion API.

pub mod chat_client;

pub use chat_client::ChatCompletionClient;
