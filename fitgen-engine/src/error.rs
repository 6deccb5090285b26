use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const UPSTREAM_FALLBACK: &str = "Completion request failed";
pub const NETWORK_FALLBACK: &str = "Failed to fetch relay response";

/// Why a prompt did not come back as generated text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum RelayError {
    /// The relay has no credential for the completion provider. No call was made.
    #[error("Completion API key is missing on the server.")]
    Configuration,

    /// The completion provider failed or returned something unusable.
    #[error("{0}")]
    Upstream(String),

    /// The relay itself could not be reached or answered with garbage.
    #[error("{0}")]
    Network(String),
}

impl RelayError {
    pub fn upstream(message: impl AsRef<str>) -> Self {
        let message = message.as_ref().trim();
        if message.is_empty() {
            Self::Upstream(UPSTREAM_FALLBACK.into())
        } else {
            Self::Upstream(message.into())
        }
    }

    pub fn network(detail: impl AsRef<str>) -> Self {
        let detail = detail.as_ref().trim();
        if detail.is_empty() {
            Self::Network(NETWORK_FALLBACK.into())
        } else {
            Self::Network(format!("{NETWORK_FALLBACK}: {detail}"))
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Upstream(_) => "upstream",
            Self::Network(_) => "network",
        }
    }
}
