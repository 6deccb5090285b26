use crate::settings::RelaySettings;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3000";

pub fn default_relay_settings() -> RelaySettings {
    RelaySettings {
        bind: DEFAULT_BIND.into(),
        llm_base_url: DEFAULT_LLM_BASE_URL.into(),
        llm_model: DEFAULT_LLM_MODEL.into(),
        api_key: None,
    }
}
