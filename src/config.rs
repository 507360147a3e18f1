//! Environment configuration for the chat bridge.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 3001)
//! - `OLLAMA_HOST` — Inference host (default: `http://127.0.0.1:11434`)
//! - `OLLAMA_PRIMARY_MODEL` — Primary model name
//! - `OLLAMA_MODEL` — Fallback model name when no primary is set
//! - `DEBUG_KERNEL` — `"1"` logs the derived kernel state per request
//! - `OLLAMA_TIMEOUT_SECS` — Per-call backend timeout (default: 120)

use std::time::Duration;

/// Model used when neither `OLLAMA_PRIMARY_MODEL` nor `OLLAMA_MODEL` is set.
pub const DEFAULT_MODEL: &str = "phi3:mini";
/// Default inference host.
pub const DEFAULT_OLLAMA_HOST: &str = "http://127.0.0.1:11434";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 3001;
/// Default backend timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Where the resolved model name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    Primary,
    Fallback,
    BuiltIn,
}

/// Server configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Base URL of the Ollama server, without trailing slash.
    pub ollama_host: String,
    /// Model name sent with every backend call.
    pub model: String,
    /// Which variable supplied `model`.
    pub model_source: ModelSource,
    /// Log the derived kernel state for every chat request.
    pub debug_kernel: bool,
    /// Hard timeout for each backend HTTP call.
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Load from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (model, model_source) = resolve_model(
            lookup("OLLAMA_PRIMARY_MODEL").as_deref(),
            lookup("OLLAMA_MODEL").as_deref(),
        );

        Self {
            port: parse_or("PORT", lookup("PORT"), DEFAULT_PORT, |_| true),
            ollama_host: lookup("OLLAMA_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_OLLAMA_HOST.into())
                .trim_end_matches('/')
                .to_string(),
            model,
            model_source,
            debug_kernel: lookup("DEBUG_KERNEL").as_deref() == Some("1"),
            request_timeout: Duration::from_secs(parse_or(
                "OLLAMA_TIMEOUT_SECS",
                lookup("OLLAMA_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
                |secs| *secs > 0,
            )),
        }
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Resolve the model name: primary, then fallback, then [`DEFAULT_MODEL`].
/// Empty values count as unset.
pub fn resolve_model(primary: Option<&str>, fallback: Option<&str>) -> (String, ModelSource) {
    let non_empty = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(String::from);

    if let Some(model) = non_empty(primary) {
        (model, ModelSource::Primary)
    } else if let Some(model) = non_empty(fallback) {
        (model, ModelSource::Fallback)
    } else {
        (DEFAULT_MODEL.to_string(), ModelSource::BuiltIn)
    }
}

/// Parse `raw`, falling back to `default` when it is missing, unparseable,
/// or rejected by `accept`.
fn parse_or<T>(key: &str, raw: Option<String>, default: T, accept: fn(&T) -> bool) -> T
where
    T: std::str::FromStr + Copy,
{
    let Some(value) = raw else {
        return default;
    };
    match value.trim().parse() {
        Ok(parsed) if accept(&parsed) => parsed,
        _ => {
            tracing::warn!(key, value = %value, "Invalid value, using default");
            default
        }
    }
}
