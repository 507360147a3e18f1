//! Shared wire types.

pub mod message;

pub use message::{ChatMessage, Role};
