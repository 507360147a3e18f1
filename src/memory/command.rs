//! Detection of explicit memory commands in user text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static REMEMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bremember\b").unwrap());
static FORGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bforget\b").unwrap());

/// What the user asked the memory layer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryCommand {
    Store,
    Forget,
}

impl MemoryCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryCommand::Store => "store",
            MemoryCommand::Forget => "forget",
        }
    }
}

/// Whole-word, case-insensitive match on "remember" / "forget".
/// "remember" is checked first, so text containing both stores.
pub fn detect_memory_command(text: &str) -> Option<MemoryCommand> {
    if REMEMBER.is_match(text) {
        Some(MemoryCommand::Store)
    } else if FORGET.is_match(text) {
        Some(MemoryCommand::Forget)
    } else {
        None
    }
}
