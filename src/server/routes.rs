//! Axum route handlers for the chat bridge.
//!
//! # Routes
//!
//! - `GET    /api/health`    — `{"ok": true, "model": "...", "cpu_only": true, ...}`
//! - `POST   /api/chat_once` — see [`crate::chat`]
//! - `GET    /api/memory`    — `{"ok": true, "short_term": [...], "long_term": [...]}`
//! - `DELETE /api/memory`    — `{"ok": true}`

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::chat::{chat_handler, ChatService};
use crate::config::ServerConfig;
use crate::kernel::KERNEL_VERSION;
use crate::llms::{BackendError, InferenceBackend, OllamaClient};
use crate::memory::MemoryStore;

/// Request bodies above this size are rejected.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Chat pipeline with its injected backend and memory.
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(chat: ChatService) -> Self {
        Self {
            chat: Arc::new(chat),
        }
    }

    /// Wire an Ollama backend and a fresh memory store from `config`.
    pub fn from_config(config: &ServerConfig) -> Result<Self, BackendError> {
        let backend: Arc<dyn InferenceBackend> =
            Arc::new(OllamaClient::new(&config.ollama_host, config.request_timeout)?);
        let chat = ChatService::new(backend, Arc::new(MemoryStore::new()), config.model.clone())
            .with_debug_kernel(config.debug_kernel);
        Ok(Self::new(chat))
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/health", get(health_handler))
        .route("/api/chat_once", post(chat_handler))
        .route("/chat", post(chat_handler))
        .route("/api/memory", get(memory_handler).delete(clear_memory_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /api/health — probe the backend.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.chat.backend().health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "ok": true,
                "model": state.chat.model(),
                "cpu_only": true,
                "kernel": KERNEL_VERSION,
                "version": crate::VERSION,
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "ok": false,
                    "error": e.to_string(),
                })),
            )
        }
    }
}

/// GET /api/memory — snapshot both memory lists.
async fn memory_handler(State(state): State<AppState>) -> impl IntoResponse {
    let memory = state.chat.memory();
    Json(serde_json::json!({
        "ok": true,
        "short_term": memory.get_short_term(),
        "long_term": memory.get_long_term(),
    }))
}

/// DELETE /api/memory — clear both memory lists.
async fn clear_memory_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.chat.memory().clear();
    tracing::info!("Memory cleared via API");
    Json(serde_json::json!({ "ok": true }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llms::retry::testing::ScriptedBackend;
    use crate::llms::BackendResponse;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    const OK_BODY: &str =
        r#"{"model":"phi3:mini","message":{"role":"assistant","content":"Here for you."},"done":true}"#;

    fn state_with(
        script: Vec<Result<BackendResponse, BackendError>>,
    ) -> (AppState, Arc<ScriptedBackend>) {
        let backend = Arc::new(ScriptedBackend::new(script));
        let chat = ChatService::new(backend.clone(), Arc::new(MemoryStore::new()), "phi3:mini");
        (AppState::new(chat), backend)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (state, _) = state_with(vec![]);
        let app = app_router(state);

        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
        assert_eq!(json["model"], "phi3:mini");
        assert_eq!(json["cpu_only"], true);
        assert_eq!(json["kernel"], KERNEL_VERSION);
    }

    #[tokio::test]
    async fn test_health_reports_unreachable_backend() {
        let mut backend = ScriptedBackend::new(vec![]);
        backend.healthy = false;
        let chat = ChatService::new(Arc::new(backend), Arc::new(MemoryStore::new()), "phi3:mini");
        let app = app_router(AppState::new(chat));

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["ok"], false);
        assert!(json["error"].as_str().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_chat_support_end_to_end() {
        let (state, _) = state_with(vec![ScriptedBackend::reply(200, OK_BODY)]);
        let app = app_router(state);

        let response = app
            .oneshot(post_json(
                "/api/chat_once",
                r#"{"messages":[{"role":"user","content":"Can you help me, I'm stuck and overwhelmed"}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
        assert_eq!(json["done"], true);
        assert_eq!(json["content"], "Here for you.");
        assert_eq!(json["state"]["intent"], "support");
        assert_eq!(json["state"]["communion"], "acknowledge_first");
        assert_eq!(json["state"]["emotion"], "warm");
        assert_eq!(json["state"]["cognitionMode"], "analytical");
    }

    #[tokio::test]
    async fn test_chat_alias_route() {
        let (state, backend) = state_with(vec![ScriptedBackend::reply(200, OK_BODY)]);
        let app = app_router(state);

        let response = app
            .oneshot(post_json("/chat", r#"{"messages":[{"role":"user","content":"hey"}]}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_chat_validation_errors() {
        for body in [r#"{}"#, r#"{"messages":[]}"#, r#"{"messages":"hi"}"#, "not json"] {
            let (state, backend) = state_with(vec![]);
            let response = app_router(state)
                .oneshot(post_json("/api/chat_once", body))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
            let json = body_json(response).await;
            assert_eq!(json["ok"], false);
            assert_eq!(json["error"], "messages[] required");
            assert_eq!(backend.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_chat_upstream_failure_envelope() {
        let (state, backend) = state_with(vec![
            ScriptedBackend::reply(500, r#"{"error":"CUDA out of memory"}"#),
            ScriptedBackend::reply(500, r#"{"error":"CUDA out of memory (again)"}"#),
        ]);
        let response = app_router(state)
            .oneshot(post_json(
                "/api/chat_once",
                r#"{"messages":[{"role":"user","content":"invest the budget"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["ok"], false);
        assert_eq!(json["upstream_status"], 500);
        assert_eq!(json["upstream_text"], r#"{"error":"CUDA out of memory (again)"}"#);
        assert_eq!(json["state"]["counsel"], "required");
        assert_eq!(json["state"]["cognitionMode"], "operator");
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_chat_transport_failure_envelope() {
        let (state, _) = state_with(vec![Err(BackendError::Timeout(120))]);
        let response = app_router(state)
            .oneshot(post_json(
                "/api/chat_once",
                r#"{"messages":[{"role":"user","content":"hi"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "Backend call timed out after 120s");
        assert_eq!(json["state"]["intent"], "conversation");
    }

    #[tokio::test]
    async fn test_memory_routes() {
        let (state, _) = state_with(vec![ScriptedBackend::reply(200, OK_BODY)]);
        let app = app_router(state.clone());

        app.clone()
            .oneshot(post_json(
                "/api/chat_once",
                r#"{"messages":[{"role":"user","content":"remember my studio is in Atlanta"}]}"#,
            ))
            .await
            .unwrap();

        let request = Request::builder().uri("/api/memory").body(Body::empty()).unwrap();
        let json = body_json(app.clone().oneshot(request).await.unwrap()).await;
        assert_eq!(json["long_term"][0]["entry"], "remember my studio is in Atlanta");
        assert_eq!(json["short_term"].as_array().unwrap().len(), 1);

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/memory")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.chat.memory().get_long_term().is_empty());
    }
}
