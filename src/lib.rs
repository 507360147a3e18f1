//! # V.I.B.E. chat bridge
//!
//! A thin HTTP service in front of a local Ollama server. Every chat request
//! is classified by a rule-based conversation kernel into a structured
//! state (intent, will, emotion, counsel, operator mode, communion,
//! cognition mode), wrapped in a governed prompt stack, forwarded to the
//! model, and answered together with the derived state.
//!
//! ```text
//! client messages → chat::ChatService → kernel (pure) → llms backend → reply + state
//!                          ↕
//!                    memory::MemoryStore
//! ```

pub mod chat;
pub mod config;
pub mod kernel;
pub mod llms;
pub mod memory;
pub mod persona;
pub mod server;
pub mod types;

pub use chat::{ChatError, ChatService, ChatSuccess};
pub use config::ServerConfig;
pub use kernel::{build_kernel_prompt, DerivedState, KernelInput, KernelPrompt};
pub use llms::{InferenceBackend, OllamaClient};
pub use memory::MemoryStore;
pub use persona::get_base_persona;
pub use types::{ChatMessage, Role};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
