use crate::config_store::SettingsStore;
use crate::defaults::default_relay_settings;
use anyhow::Context;
use fitgen_engine::relay::RelayConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

pub const ENV_API_KEY: &str = "GROQ_API_KEY";
pub const ENV_BIND: &str = "FITGEN_BIND";
pub const ENV_LLM_BASE_URL: &str = "FITGEN_LLM_BASE_URL";
pub const ENV_LLM_MODEL: &str = "FITGEN_LLM_MODEL";
pub const ENV_CONFIG: &str = "FITGEN_CONFIG";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    pub bind: String,
    pub llm_base_url: String,
    pub llm_model: String,

    // Only ever taken from the environment; never read from or written to disk.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for RelaySettings {
    fn default() -> Self {
        default_relay_settings()
    }
}

impl std::fmt::Debug for RelaySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelaySettings")
            .field("bind", &self.bind)
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_model", &self.llm_model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RelaySettings {
    /// Resolves settings from an optional JSON file named by `FITGEN_CONFIG`,
    /// then environment overrides. `lookup` stands in for the environment.
    pub fn load<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match non_blank(&lookup, ENV_CONFIG) {
            Some(path) => SettingsStore::at_path(path).load()?,
            None => Self::default(),
        };
        settings.apply_env(&lookup);
        Ok(settings)
    }

    pub fn from_process_env() -> anyhow::Result<Self> {
        Self::load(|key| std::env::var(key).ok())
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = non_blank(&lookup, ENV_BIND) {
            self.bind = v;
        }
        if let Some(v) = non_blank(&lookup, ENV_LLM_BASE_URL) {
            self.llm_base_url = v;
        }
        if let Some(v) = non_blank(&lookup, ENV_LLM_MODEL) {
            self.llm_model = v;
        }
        self.api_key = non_blank(&lookup, ENV_API_KEY);
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind
            .parse()
            .with_context(|| format!("invalid bind address: {}", self.bind))
    }

    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            api_key: self.api_key.clone(),
            model: self.llm_model.clone(),
        }
    }
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
