use crate::ipc::{RELAY_PATH, RelayFailure, RelayRequest, RelaySuccess};
use fitgen_engine::error::RelayError;
use fitgen_engine::traits::RelayClient;
use fitgen_providers::request::{HttpRequest, join_url};

/// Form-side client for a relay server's `POST /api/relay`.
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    endpoint: String,
}

impl HttpRelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: join_url(base_url, RELAY_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl RelayClient for HttpRelayClient {
    async fn relay(&self, prompt: &str) -> Result<String, RelayError> {
        let payload = serde_json::to_value(RelayRequest {
            prompt: prompt.to_string(),
        })
        .map_err(|e| RelayError::network(e.to_string()))?;
        let req = HttpRequest::post_json(&self.endpoint, &payload);

        let resp = fitgen_providers::runtime::execute(&req)
            .await
            .map_err(|e| RelayError::network(format!("{e:#}")))?;

        if resp.is_success() {
            return serde_json::from_slice::<RelaySuccess>(&resp.body)
                .map(|ok| ok.result)
                .map_err(|e| {
                    log::warn!("undecodable relay success body: {e}");
                    RelayError::network("relay sent an unreadable response")
                });
        }

        match serde_json::from_slice::<RelayFailure>(&resp.body) {
            Ok(failure) if failure.error == RelayError::Configuration.to_string() => {
                Err(RelayError::Configuration)
            }
            Ok(failure) if failure.error.trim().is_empty() => Err(RelayError::network("")),
            Ok(failure) => Err(RelayError::upstream(failure.error)),
            Err(_) => Err(RelayError::network(format!(
                "relay answered HTTP {}",
                resp.status
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(status: u16, body: &str) -> (MockServer, HttpRelayClient) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/relay"))
            .and(body_json(serde_json::json!({"prompt": "make a plan"})))
            .respond_with(
                ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = HttpRelayClient::new(&server.uri());
        (server, client)
    }

    #[tokio::test]
    async fn returns_result_on_200() {
        let (_server, client) = client_for(200, r#"{"result":"Day 1"}"#).await;
        assert_eq!(client.relay("make a plan").await.unwrap(), "Day 1");
    }

    #[tokio::test]
    async fn surfaces_relay_error_text() {
        let (_server, client) = client_for(500, r#"{"error":"Rate limit reached"}"#).await;
        assert_eq!(
            client.relay("make a plan").await,
            Err(RelayError::Upstream("Rate limit reached".into()))
        );
    }

    #[tokio::test]
    async fn recognises_configuration_error() {
        let body = r#"{"error":"Completion API key is missing on the server."}"#;
        let (_server, client) = client_for(500, body).await;
        assert_eq!(
            client.relay("make a plan").await,
            Err(RelayError::Configuration)
        );
    }

    #[tokio::test]
    async fn empty_relay_error_is_fetch_failure() {
        for body in [r#"{"error":""}"#, r#"{"error":"  "}"#] {
            let (_server, client) = client_for(500, body).await;
            assert_eq!(
                client.relay("make a plan").await,
                Err(RelayError::Network("Failed to fetch relay response".into()))
            );
        }
    }

    #[tokio::test]
    async fn unparsable_failure_is_network_error() {
        let (_server, client) = client_for(502, "<html>Bad Gateway</html>").await;
        let err = client.relay("make a plan").await.unwrap_err();
        assert_eq!(err.kind(), "network");
        assert!(err.to_string().starts_with("Failed to fetch relay response"));
    }

    #[tokio::test]
    async fn unreachable_relay_is_network_error() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let client = HttpRelayClient::new(&format!("http://{addr}"));
        let err = client.relay("make a plan").await.unwrap_err();
        assert_eq!(err.kind(), "network");
    }

    #[test]
    fn endpoint_joins_relay_path() {
        let c = HttpRelayClient::new("http://localhost:3000/");
        assert_eq!(c.endpoint(), "http://localhost:3000/api/relay");
    }
}
