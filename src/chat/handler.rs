//! Chat handler — the request pipeline behind `POST /api/chat_once`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use super::error::ChatError;
use super::types::{ChatRequest, ChatSuccess};
use crate::kernel::{self, build_kernel_prompt, DerivedState, KernelInput};
use crate::llms::{call_with_resource_retry, ollama::parse_chat_reply, ChatPayload, InferenceBackend};
use crate::memory::{detect_memory_command, MemoryCommand, MemoryStore};
use crate::server::AppState;

/// Everything a chat request needs, injected once at startup.
pub struct ChatService {
    backend: Arc<dyn InferenceBackend>,
    memory: Arc<MemoryStore>,
    model: String,
    debug_kernel: bool,
}

impl ChatService {
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        memory: Arc<MemoryStore>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            memory,
            model: model.into(),
            debug_kernel: false,
        }
    }

    /// Log the derived kernel state for every request.
    pub fn with_debug_kernel(mut self, enabled: bool) -> Self {
        self.debug_kernel = enabled;
        self
    }

    pub fn backend(&self) -> &Arc<dyn InferenceBackend> {
        &self.backend
    }

    pub fn memory(&self) -> &Arc<MemoryStore> {
        &self.memory
    }

    /// Resolved model name sent with every payload.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one request through the full pipeline.
    pub async fn handle(&self, body: &Value) -> Result<ChatSuccess, ChatError> {
        let incoming = ChatRequest::from_body(body)?.without_system_messages();

        let memory_context = self.apply_memory(&incoming);
        let prompt = build_kernel_prompt(
            KernelInput::new(&incoming).with_memory_context(&memory_context),
        );
        let state = prompt.state;
        self.log_state(&state);

        let payload = ChatPayload::new(self.model.clone(), prompt.messages);
        let response = call_with_resource_retry(self.backend.as_ref(), &payload)
            .await
            .map_err(|source| {
                tracing::warn!(error = %source, "Backend call failed");
                ChatError::Backend { state, source }
            })?;

        if !response.is_success() {
            tracing::warn!(
                status = response.status,
                text = %truncate(&response.body, 200),
                "Upstream returned an error"
            );
            return Err(ChatError::Upstream {
                state,
                status: response.status,
                text: response.body,
            });
        }

        let reply = parse_chat_reply(&response.body).map_err(|source| {
            tracing::warn!(error = %source, "Unreadable backend reply");
            ChatError::Backend { state, source }
        })?;

        Ok(ChatSuccess::new(
            reply.content,
            reply.model.unwrap_or_else(|| self.model.clone()),
            state,
        ))
    }

    /// Apply any memory command in the latest user turn, record the turn,
    /// and return the rendered context from before this turn.
    fn apply_memory(&self, incoming: &Value) -> String {
        let history = kernel::sanitize_history(Some(incoming));
        let Some(text) = kernel::last_user_text(&history) else {
            return self.memory.build_memory_context();
        };

        match detect_memory_command(text) {
            Some(MemoryCommand::Store) => {
                self.memory.add_long_term(text);
                tracing::debug!("Stored long-term memory entry");
            }
            Some(MemoryCommand::Forget) => {
                self.memory.clear();
                tracing::debug!("Cleared memory on request");
            }
            None => {}
        }

        let context = self.memory.build_memory_context();
        self.memory.add_short_term(text);
        context
    }

    fn log_state(&self, state: &DerivedState) {
        if !self.debug_kernel {
            return;
        }
        tracing::info!(
            model = %self.model,
            intent = %state.intent,
            will_state = %state.will_state,
            emotion = %state.emotion,
            counsel = %state.counsel,
            operator_mode = %state.operator_mode,
            communion = %state.communion,
            cognition_mode = %state.cognition_mode,
            "Kernel state"
        );
    }
}

/// POST /api/chat_once — run the chat pipeline.
///
/// Any body that is not valid JSON is reported with the same validation
/// envelope as a missing `messages` field.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatSuccess>, ChatError> {
    let Json(body) = body.map_err(|e| {
        tracing::debug!(error = %e, "Rejected chat body");
        ChatError::Validation("messages[] required".into())
    })?;

    let request_id = Uuid::new_v4();
    state
        .chat
        .handle(&body)
        .instrument(tracing::info_span!("chat", %request_id))
        .await
        .map(Json)
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
