//! Request / response types for the chat endpoint.

use serde::Serialize;
use serde_json::Value;

use super::error::ChatError;
use crate::kernel::DerivedState;
use crate::types::Role;

/// Validated chat request: a non-empty message list, still untyped per entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<Value>,
}

impl ChatRequest {
    /// Accept `{ "messages": [ ... ] }` with at least one entry.
    pub fn from_body(body: &Value) -> Result<Self, ChatError> {
        match body.get("messages") {
            Some(Value::Array(items)) if !items.is_empty() => Ok(Self {
                messages: items.clone(),
            }),
            _ => Err(ChatError::Validation("messages[] required".into())),
        }
    }

    /// Drop every entry whose role is `system`; client system prompts are
    /// never trusted.
    pub fn without_system_messages(self) -> Value {
        let system = Role::System.as_str();
        Value::Array(
            self.messages
                .into_iter()
                .filter(|m| m.get("role").and_then(Value::as_str) != Some(system))
                .collect(),
        )
    }
}

/// Successful chat response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatSuccess {
    pub ok: bool,
    pub content: String,
    pub model: String,
    pub state: DerivedState,
    pub done: bool,
}

impl ChatSuccess {
    pub fn new(content: String, model: String, state: DerivedState) -> Self {
        Self {
            ok: true,
            content,
            model,
            state,
            done: true,
        }
    }
}
