use crate::error::RelayError;
use crate::traits::{CompletionProvider, CompletionRequest, RelayClient};
use std::sync::Arc;
use std::time::Instant;

pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 2000;

#[derive(Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub api_key: Option<String>,
    pub model: String,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .finish()
    }
}

impl RelayConfig {
    /// The credential, if one is configured and not blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Server-side boundary between prompt builders and the completion provider.
///
/// Holds the credential and pins generation parameters so every caller gets the
/// same output shape. One provider call per `relay`; no retries, no caching.
pub struct Relay {
    cfg: RelayConfig,
    provider: Arc<dyn CompletionProvider>,
}

impl Relay {
    pub fn new(cfg: RelayConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { cfg, provider }
    }

    pub fn has_credential(&self) -> bool {
        self.cfg.credential().is_some()
    }

    pub fn model(&self) -> &str {
        &self.cfg.model
    }

    pub fn completion_request(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.cfg.model.clone(),
            prompt: prompt.to_string(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    pub async fn relay(&self, prompt: &str) -> Result<String, RelayError> {
        let Some(api_key) = self.cfg.credential() else {
            log::error!("relay refused: completion API key is not configured");
            return Err(RelayError::Configuration);
        };

        let request = self.completion_request(prompt);
        let started = Instant::now();
        match self.provider.complete(api_key, &request).await {
            Ok(text) => {
                let text = text.trim().to_string();
                log::info!(
                    "relay ok: model={} prompt_len={} result_len={} elapsed_ms={}",
                    request.model,
                    prompt.len(),
                    text.len(),
                    started.elapsed().as_millis()
                );
                Ok(text)
            }
            Err(e) => {
                let message = format!("{e:#}");
                log::warn!(
                    "relay failed: model={} elapsed_ms={} error={message}",
                    request.model,
                    started.elapsed().as_millis()
                );
                Err(RelayError::upstream(message))
            }
        }
    }
}

#[async_trait::async_trait]
impl RelayClient for Relay {
    async fn relay(&self, prompt: &str) -> Result<String, RelayError> {
        Relay::relay(self, prompt).await
    }
}
