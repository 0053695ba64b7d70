//! Chat model seam. Concrete clients (OpenAI-compatible servers, Ollama, ...)
//! live outside this crate and implement [`ChatModel`].

mod error;
mod types;

pub use error::ModelError;
pub use types::{ChatMessage, Role};

use async_trait::async_trait;

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier, as callers request it
    fn name(&self) -> &str;

    /// Run one chat completion and return the assistant's text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ModelError>;
}
