use fitgen_engine::traits::{CompletionProvider, CompletionRequest};
use fitgen_providers::openai_compatible::{
    ChatMessage, GenerationParams, OpenAiCompatibleChatConfig, build_chat_completions_request,
};
use fitgen_providers::parse::{parse_api_error_message, parse_openai_chat_completion};

pub const MALFORMED_RESPONSE: &str = "Completion provider returned an unexpected response";

/// Chat-completions provider for Groq or any OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleCompletionProvider {
    base_url: String,
}

impl OpenAiCompatibleCompletionProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiCompatibleCompletionProvider {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> anyhow::Result<String> {
        let cfg = OpenAiCompatibleChatConfig {
            base_url: self.base_url.clone(),
            api_key: api_key.to_string(),
            model: request.model.clone(),
        };

        let req = build_chat_completions_request(
            &cfg,
            &[ChatMessage::user(request.prompt.clone())],
            GenerationParams {
                temperature: request.temperature,
                max_tokens: request.max_tokens,
            },
        );
        log::debug!("completion request: {req:?}");

        let resp = fitgen_providers::runtime::execute(&req).await?;

        if !resp.is_success() {
            log::warn!(
                "completion provider answered status={} body={}",
                resp.status,
                resp.body_text()
            );
            let message = parse_api_error_message(&resp.body).unwrap_or_else(|| {
                format!("Completion provider request failed with status {}", resp.status)
            });
            return Err(anyhow::anyhow!(message));
        }

        parse_openai_chat_completion(&resp.body).map_err(|e| {
            log::warn!("undecodable completion response: {e:#}");
            anyhow::anyhow!(MALFORMED_RESPONSE)
        })
    }
}
