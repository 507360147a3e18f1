//! Ollama backend — non-streaming `POST /api/chat`, health via `GET /api/tags`.
//!
//! Response envelope:
//! ```json
//! {"model":"phi3:mini","message":{"role":"assistant","content":"Hi"},"done":true}
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{BackendError, BackendResponse, ChatPayload, InferenceBackend};

/// HTTP client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl OllamaClient {
    /// Create a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_err(&self, err: reqwest::Error) -> BackendError {
        BackendError::from_reqwest(err, self.timeout.as_secs())
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn chat(&self, payload: &ChatPayload) -> Result<BackendResponse, BackendError> {
        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(payload)
            .send()
            .await
            .map_err(|e| self.map_err(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_err(e))?;
        Ok(BackendResponse { status, body })
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        let response = self
            .http
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(|e| self.map_err(e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(BackendError::Unhealthy(response.status().as_u16()))
        }
    }
}

/// Reply text and model name pulled from a successful chat body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// `message.content`, or `""` when absent.
    pub content: String,
    /// `model` as echoed by the server, if present.
    pub model: Option<String>,
}

/// Parse a 2xx chat body. Only a body that is not JSON is an error; a
/// missing or non-string `message.content` / `model` falls back to empty
/// content / no model.
pub fn parse_chat_reply(body: &str) -> Result<ChatReply, BackendError> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

    Ok(ChatReply {
        content: envelope
            .pointer("/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        model: envelope
            .get("model")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(String::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> ChatPayload {
        ChatPayload::new("phi3:mini", vec![ChatMessage::user("hi")])
    }

    #[tokio::test]
    async fn test_chat_posts_payload_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({
                "model": "phi3:mini",
                "stream": false,
                "options": {"num_gpu": 0, "gpu_layers": 0, "num_ctx": 1024}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"model":"phi3:mini","message":{"role":"assistant","content":"Hello"},"done":true}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = OllamaClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let response = client.chat(&payload()).await.unwrap();

        assert!(response.is_success());
        let reply = parse_chat_reply(&response.body).unwrap();
        assert_eq!(reply.content, "Hello");
        assert_eq!(reply.model.as_deref(), Some("phi3:mini"));
    }

    #[tokio::test]
    async fn test_chat_non_2xx_is_ok_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string(r#"{"error":"CUDA out of memory"}"#),
            )
            .mount(&server)
            .await;

        let client = OllamaClient::new(&format!("{}/", server.uri()), Duration::from_secs(5))
            .unwrap();
        let response = client.chat(&payload()).await.unwrap();

        assert_eq!(response.status, 500);
        assert!(response.body.contains("CUDA out of memory"));
    }

    #[tokio::test]
    async fn test_chat_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1500)))
            .mount(&server)
            .await;

        let client = OllamaClient::new(&server.uri(), Duration::from_millis(200)).unwrap();
        let err = client.chat(&payload()).await.unwrap_err();
        assert!(matches!(err, BackendError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_transport_error_when_unreachable() {
        let client = OllamaClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client.chat(&payload()).await.unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"models":[]}"#))
            .mount(&server)
            .await;

        let client = OllamaClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        assert!(client.health_check().await.is_ok());

        let down = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&down)
            .await;
        let client = OllamaClient::new(&down.uri(), Duration::from_secs(5)).unwrap();
        assert!(matches!(
            client.health_check().await,
            Err(BackendError::Unhealthy(503))
        ));
    }

    #[test]
    fn test_parse_reply_tolerates_missing_fields() {
        let reply = parse_chat_reply(r#"{"done":true}"#).unwrap();
        assert_eq!(reply.content, "");
        assert_eq!(reply.model, None);

        for body in [
            "null",
            r#"{"message":"hi","model":"m"}"#,
            r#"{"message":{"content":42}}"#,
            r#"{"model":"","message":null}"#,
        ] {
            let reply = parse_chat_reply(body).unwrap();
            assert_eq!(reply.content, "", "{}", body);
        }

        let reply = parse_chat_reply(r#"{"model":7,"message":{"content":"x"}}"#).unwrap();
        assert_eq!(reply.content, "x");
        assert_eq!(reply.model, None);

        assert!(matches!(
            parse_chat_reply("not json"),
            Err(BackendError::MalformedResponse(_))
        ));
    }
}
