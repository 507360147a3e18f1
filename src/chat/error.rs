//! Chat endpoint errors and their JSON envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::kernel::DerivedState;
use crate::llms::BackendError;

/// Every way a chat request can fail. All variants render as
/// `{ "ok": false, ... }`.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Malformed request; no backend call was made.
    #[error("{0}")]
    Validation(String),

    /// The backend answered non-2xx (after any retry).
    #[error("Upstream returned {status}")]
    Upstream {
        state: DerivedState,
        status: u16,
        text: String,
    },

    /// Network failure, timeout, or unreadable success body.
    #[error("{source}")]
    Backend {
        state: DerivedState,
        #[source]
        source: BackendError,
    },
}

impl ChatError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatError::Validation(_) => StatusCode::BAD_REQUEST,
            ChatError::Upstream { .. } | ChatError::Backend { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ChatError::Validation(error) => json!({
                "ok": false,
                "error": error,
            }),
            ChatError::Upstream { state, status, text } => json!({
                "ok": false,
                "state": state,
                "upstream_status": status,
                "upstream_text": text,
            }),
            ChatError::Backend { state, source } => json!({
                "ok": false,
                "state": state,
                "error": source.to_string(),
            }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ChatError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        let upstream = ChatError::Upstream {
            state: DerivedState::default(),
            status: 500,
            text: "boom".into(),
        };
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream.to_string(), "Upstream returned 500");
    }

    #[test]
    fn test_backend_error_message_passthrough() {
        let err = ChatError::Backend {
            state: DerivedState::default(),
            source: BackendError::Timeout(30),
        };
        assert_eq!(err.to_string(), "Backend call timed out after 30s");
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
