//! Memory system for the chat bridge.
//!
//! Two volatile, bounded note lists live in a [`MemoryStore`]:
//!
//! - **short-term** — recent user turns, captured automatically (cap 20)
//! - **long-term** — notes the user explicitly asked to keep (cap 50)
//!
//! Nothing is persisted; both lists reset with the process or via
//! [`MemoryStore::clear`]. The store is owned by the server state and
//! injected into the chat handler, so tests build isolated instances.

pub mod command;
pub mod store;

pub use command::{detect_memory_command, MemoryCommand};
pub use store::{MemoryEntry, MemoryStore, MAX_LONG_TERM, MAX_SHORT_TERM};

/// Memory layer revision.
pub const MEMORY_VERSION: &str = "1.0";
