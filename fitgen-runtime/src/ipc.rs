//! JSON bodies exchanged between form clients and the relay server.

use serde::{Deserialize, Serialize};

pub const RELAY_PATH: &str = "/api/relay";
pub const HEALTH_PATH: &str = "/healthz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub prompt: String,
}

/// HTTP 200 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySuccess {
    pub result: String,
}

/// HTTP 500 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayFailure {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    // Whether a completion API key is configured. Never the key itself.
    pub credential: bool,
}
