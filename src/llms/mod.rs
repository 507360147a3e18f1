//! Inference backend seam.
//!
//! - [`InferenceBackend`] — the trait the chat handler talks to
//! - [`ollama`] — HTTP implementation against a local Ollama server
//! - [`retry`] — the single resource-error retry around a backend call
//!
//! Backends report every HTTP exchange as a [`BackendResponse`], including
//! non-2xx ones; only transport-level failures are errors. Deciding whether
//! a status or body is a failure belongs to the caller.

pub mod error;
pub mod ollama;
pub mod retry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::ChatMessage;

pub use error::BackendError;
pub use ollama::OllamaClient;
pub use retry::{call_with_resource_retry, looks_like_resource_error};

/// Inference options pinned on every call: CPU only, small context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceOptions {
    pub num_gpu: u32,
    pub gpu_layers: u32,
    pub num_ctx: u32,
}

/// CPU-only inference constraints.
pub const CPU_SAFE_OPTIONS: InferenceOptions = InferenceOptions {
    num_gpu: 0,
    gpu_layers: 0,
    num_ctx: 1024,
};

/// Body of a non-streaming chat call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub model: String,
    pub stream: bool,
    pub messages: Vec<ChatMessage>,
    pub options: InferenceOptions,
}

impl ChatPayload {
    /// Non-streaming payload with [`CPU_SAFE_OPTIONS`].
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            stream: false,
            messages,
            options: CPU_SAFE_OPTIONS,
        }
    }
}

/// Raw outcome of one HTTP exchange with the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: String,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A language-model server the chat handler can forward to.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Human-readable backend name, for logs.
    fn name(&self) -> &str;

    /// Send one chat payload. Non-2xx responses are `Ok`.
    async fn chat(&self, payload: &ChatPayload) -> Result<BackendResponse, BackendError>;

    /// Verify the backend is reachable and answering 2xx.
    async fn health_check(&self) -> Result<(), BackendError>;
}
