use fitgen_core::prompt::fields;
use fitgen_core::types::Flow;
use fitgen_engine::relay::{Relay, RelayConfig};
use fitgen_engine::session::{FormSession, GenerationState};
use fitgen_engine::traits::{CompletionProvider, CompletionRequest};
use fitgen_runtime::llm::OpenAiCompatibleCompletionProvider;
use fitgen_runtime::relay_client::HttpRelayClient;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FixedProvider {
    calls: AtomicUsize,
    reply: Result<&'static str, &'static str>,
}

#[async_trait::async_trait]
impl CompletionProvider for FixedProvider {
    async fn complete(
        &self,
        _api_key: &str,
        _request: &CompletionRequest,
    ) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .map(String::from)
            .map_err(|e| anyhow::anyhow!(e))
    }
}

fn relay(api_key: Option<&str>, provider: Arc<dyn CompletionProvider>) -> Arc<Relay> {
    Arc::new(Relay::new(
        RelayConfig {
            api_key: api_key.map(String::from),
            model: "llama-3.1-8b-instant".into(),
        },
        provider,
    ))
}

/// Starts the server on an ephemeral port and returns its base URL.
async fn spawn_server(relay: Arc<Relay>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(fitgen_server::serve(
        listener,
        relay,
        std::future::pending(),
    ));
    format!("http://{addr}")
}

async fn post_relay(base: &str, body: &str) -> (u16, serde_json::Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/relay"))
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn success_returns_trimmed_result() {
    let provider = Arc::new(FixedProvider {
        calls: AtomicUsize::new(0),
        reply: Ok(" Plan text \n"),
    });
    let base = spawn_server(relay(Some("k"), provider.clone())).await;

    let (status, body) = post_relay(&base, r#"{"prompt":"make a plan"}"#).await;
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({"result": "Plan text"}));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_key_answers_500_without_calling_provider() {
    let provider = Arc::new(FixedProvider {
        calls: AtomicUsize::new(0),
        reply: Ok("unused"),
    });
    let base = spawn_server(relay(None, provider.clone())).await;

    let (status, body) = post_relay(&base, r#"{"prompt":"make a plan"}"#).await;
    assert_eq!(status, 500);
    assert_eq!(
        body["error"],
        "Completion API key is missing on the server."
    );
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upstream_failure_answers_500_with_message() {
    let provider = Arc::new(FixedProvider {
        calls: AtomicUsize::new(0),
        reply: Err("Rate limit reached"),
    });
    let base = spawn_server(relay(Some("k"), provider)).await;

    let (status, body) = post_relay(&base, r#"{"prompt":"make a plan"}"#).await;
    assert_eq!(status, 500);
    assert_eq!(body, serde_json::json!({"error": "Rate limit reached"}));
}

#[tokio::test]
async fn undecodable_body_still_gets_json_error() {
    let provider = Arc::new(FixedProvider {
        calls: AtomicUsize::new(0),
        reply: Ok("unused"),
    });
    let base = spawn_server(relay(Some("k"), provider.clone())).await;

    for body in ["not json", r#"{"text":"x"}"#] {
        let (status, json) = post_relay(&base, body).await;
        assert_eq!(status, 500);
        assert!(
            json["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request body")
        );
    }
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn prompt_larger_than_default_body_limit_is_forwarded() {
    let provider = Arc::new(FixedProvider {
        calls: AtomicUsize::new(0),
        reply: Ok("Day 1"),
    });
    let base = spawn_server(relay(Some("k"), provider.clone())).await;

    let prompt = "x".repeat(3 * 1024 * 1024);
    let body = serde_json::json!({ "prompt": prompt }).to_string();
    let (status, json) = post_relay(&base, &body).await;
    assert_eq!(status, 200);
    assert_eq!(json, serde_json::json!({"result": "Day 1"}));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn health_reports_credential_presence() {
    let provider = Arc::new(FixedProvider {
        calls: AtomicUsize::new(0),
        reply: Ok("unused"),
    });
    let base = spawn_server(relay(None, provider)).await;

    let body: serde_json::Value = reqwest::get(format!("{base}/healthz"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, serde_json::json!({"status": "ok", "credential": false}));
}

#[tokio::test]
async fn diet_form_to_completion_api_and_back() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"choices":[{"message":{"content":"\nDay 1: Oatmeal\n"}}]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&upstream)
        .await;

    let provider = Arc::new(OpenAiCompatibleCompletionProvider::new(upstream.uri()));
    let base = spawn_server(relay(Some("gsk-test"), provider)).await;

    let session = FormSession::new(Flow::Diet, Arc::new(HttpRelayClient::new(&base)));
    session.set_field(fields::WEIGHT, "82");
    session.set_field(fields::ALLERGIES, "");

    let state = session.generate().await.unwrap();
    assert_eq!(
        state,
        GenerationState::Success {
            text: "Day 1: Oatmeal".into()
        }
    );

    let received = upstream.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    let prompt = body["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("- Current weight: 82 kg"));
    assert!(prompt.contains("- Allergies: None"));
    assert_eq!(
        received[0].headers.get("authorization").unwrap(),
        "Bearer gsk-test"
    );
}

#[tokio::test]
async fn workout_form_sees_relay_failure_text() {
    let provider = Arc::new(FixedProvider {
        calls: AtomicUsize::new(0),
        reply: Err("model overloaded"),
    });
    let base = spawn_server(relay(Some("k"), provider)).await;

    let session = FormSession::new(Flow::Workout, Arc::new(HttpRelayClient::new(&base)));
    session.set_field(fields::GOAL, "run a 10k");
    let state = session.generate().await.unwrap();
    assert_eq!(state.error(), Some("model overloaded"));
    assert_eq!(session.request().get(fields::GOAL), Some("run a 10k"));
}
