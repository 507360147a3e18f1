//! Chat module — `POST /api/chat_once` (alias `POST /chat`).
//!
//! Per request:
//!
//! ```text
//! body
//!   → validate (messages must be a non-empty array)
//!   → strip client system messages
//!   → memory commands + memory context
//!   → kernel (classify + assemble prompt stack)
//!   → backend call (one retry on memory/GPU errors)
//!   → { ok, content, model, state, done } or a JSON error envelope
//! ```

pub mod error;
pub mod handler;
pub mod types;

pub use error::ChatError;
pub use handler::{chat_handler, ChatService};
pub use types::{ChatRequest, ChatSuccess};
