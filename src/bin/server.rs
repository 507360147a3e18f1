//! V.I.B.E. chat bridge server binary.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 3001)
//! - `OLLAMA_HOST` — Ollama base URL (default: `http://127.0.0.1:11434`)
//! - `OLLAMA_PRIMARY_MODEL` / `OLLAMA_MODEL` — model resolution (default: `phi3:mini`)
//! - `DEBUG_KERNEL` — `1` logs kernel state per request
//! - `OLLAMA_TIMEOUT_SECS` — backend timeout (default: 120)
//! - `RUST_LOG` — Tracing filter (default: "info,vibe=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use anyhow::Context;
use vibe::config::ModelSource;
use vibe::server::{app_router, AppState};
use vibe::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vibe=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::from_config(&config).context("Failed to build backend client")?;
    let app = app_router(state);

    let source = match config.model_source {
        ModelSource::Primary => "OLLAMA_PRIMARY_MODEL",
        ModelSource::Fallback => "OLLAMA_MODEL",
        ModelSource::BuiltIn => "built-in default",
    };

    tracing::info!("V.I.B.E. backend starting on {}", config.bind_addr());
    tracing::info!("Ollama -> {}", config.ollama_host);
    tracing::info!("Model -> {} (from {})", config.model, source);
    tracing::info!("CPU-only enforced, timeout {:?}", config.request_timeout);
    tracing::info!("Kernel v{} active", vibe::kernel::KERNEL_VERSION);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
