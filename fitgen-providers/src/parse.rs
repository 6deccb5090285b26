use anyhow::{Context, anyhow};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

/// Extracts the top choice's message content, untrimmed.
pub fn parse_openai_chat_completion(body: &[u8]) -> anyhow::Result<String> {
    let resp: OpenAiChatResponse = serde_json::from_slice(body).context("decode chat JSON")?;
    let content = resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| anyhow!("no content in chat completion response"))?;
    Ok(content)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiErrorBody {
    Nested { error: ApiErrorDetail },
    Flat { error: String },
    Message { message: String },
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// Best-effort extraction of the provider's human-readable error message.
///
/// Handles `{"error":{"message":..}}` (OpenAI/Groq), `{"error":".."}` and
/// `{"message":".."}`. Returns `None` for anything else or for blank messages.
pub fn parse_api_error_message(body: &[u8]) -> Option<String> {
    let parsed: ApiErrorBody = serde_json::from_slice(body).ok()?;
    let msg = match parsed {
        ApiErrorBody::Nested { error } => error.message?,
        ApiErrorBody::Flat { error } => error,
        ApiErrorBody::Message { message } => message,
    };
    let msg = msg.trim();
    (!msg.is_empty()).then(|| msg.to_string())
}
