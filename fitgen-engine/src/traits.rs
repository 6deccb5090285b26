use crate::error::RelayError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One non-streaming, single-turn completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    // Sent as the only user message.
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// The external text-completion capability.
///
/// Implementations return the provider's top-choice text untouched; on failure
/// the error's display text should be the provider's own message when it gave one.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, api_key: &str, request: &CompletionRequest)
    -> anyhow::Result<String>;
}

/// Anything that turns a prompt into generated text: the in-process relay, or
/// an HTTP client talking to a relay server.
#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn relay(&self, prompt: &str) -> Result<String, RelayError>;
}
