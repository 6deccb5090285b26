//! HTTP front for the prompt relay.
//!
//! ```text
//! form client                    relay server                  completion API
//! ┌──────────────┐  POST         ┌──────────────────┐  POST     ┌──────────────┐
//! │ FormSession  ├──────────────►│ /api/relay       ├──────────►│ /chat/       │
//! │ HttpRelay-   │ {"prompt"}    │ holds API key    │ Bearer    │ completions  │
//! │ Client       │◄──────────────┤ pins temperature │◄──────────┤              │
//! └──────────────┘ 200 {result}  │ and max_tokens   │           └──────────────┘
//!                  500 {error}   └──────────────────┘
//! ```
//!
//! Every request gets a JSON body back: 200 with `result` or 500 with `error`,
//! including requests whose body cannot be read or decoded. Prompt size is not
//! capped.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use fitgen_engine::relay::Relay;
use fitgen_runtime::ipc::{
    HEALTH_PATH, HealthStatus, RELAY_PATH, RelayFailure, RelayRequest, RelaySuccess,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared state passed to all request handlers
#[derive(Clone)]
struct AppState {
    relay: Arc<Relay>,
}

pub fn router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route(RELAY_PATH, post(handle_relay))
        .route(HEALTH_PATH, get(handle_health))
        .layer(DefaultBodyLimit::disable())
        .with_state(AppState { relay })
}

/// Serves until `shutdown` resolves, then drains in-flight requests.
pub async fn serve<S>(listener: TcpListener, relay: Arc<Relay>, shutdown: S) -> anyhow::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(relay))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn handle_relay(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            log::warn!("failed to read relay request body: {e}");
            return failure(format!("Invalid request body: {e}"));
        }
    };
    let req: RelayRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            log::warn!("rejecting undecodable relay request: {e}");
            return failure(format!("Invalid request body: {e}"));
        }
    };

    match state.relay.relay(&req.prompt).await {
        Ok(result) => (StatusCode::OK, Json(RelaySuccess { result })).into_response(),
        Err(e) => failure(e.to_string()),
    }
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".into(),
        credential: state.relay.has_credential(),
    })
}

fn failure(error: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(RelayFailure { error }),
    )
        .into_response()
}
