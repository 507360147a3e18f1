//! Backend error types.

use thiserror::Error;

/// Failures that never produced an HTTP response, or produced one that
/// could not be read.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection refused, DNS failure, broken stream.
    #[error("Backend transport error: {0}")]
    Transport(String),

    /// The call exceeded the configured timeout.
    #[error("Backend call timed out after {0}s")]
    Timeout(u64),

    /// A 2xx body that is not the expected JSON envelope.
    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    /// Health probe got a non-2xx answer.
    #[error("Backend not responding (status {0})")]
    Unhealthy(u16),
}

impl BackendError {
    /// Map a reqwest failure, distinguishing timeouts.
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            BackendError::Timeout(timeout_secs)
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}
