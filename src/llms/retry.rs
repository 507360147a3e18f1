//! One-shot retry for backend resource pressure.
//!
//! A failed call is repeated exactly once, with the identical payload, when
//! its body looks like a memory/GPU load failure. Anything else, including
//! transport errors, is returned as-is. The two attempts are sequential.

use super::{BackendError, BackendResponse, ChatPayload, InferenceBackend};

/// Lower-cased substrings that mark a resource/memory failure.
pub const RESOURCE_ERROR_MARKERS: &[&str] = &[
    "requires more system memory",
    "unable to load full model",
    "no suitable device",
    "cuda",
    "vram",
];

/// Case-insensitive check of a failure body against [`RESOURCE_ERROR_MARKERS`].
pub fn looks_like_resource_error(text: &str) -> bool {
    let t = text.to_lowercase();
    RESOURCE_ERROR_MARKERS.iter().any(|m| t.contains(m))
}

/// Call `backend`, retrying once if the first response is a resource error.
///
/// Returns the final response (success or not). The caller decides how to
/// surface a non-2xx result.
pub async fn call_with_resource_retry(
    backend: &dyn InferenceBackend,
    payload: &ChatPayload,
) -> Result<BackendResponse, BackendError> {
    let first = backend.chat(payload).await?;
    if first.is_success() || !looks_like_resource_error(&first.body) {
        return Ok(first);
    }

    tracing::warn!(
        backend = backend.name(),
        status = first.status,
        "Retrying once due to memory/GPU error"
    );
    backend.chat(payload).await
}
