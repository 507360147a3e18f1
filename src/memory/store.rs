//! Bounded short-term / long-term note lists.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

/// Recent conversational facts kept in short-term memory.
pub const MAX_SHORT_TERM: usize = 20;
/// Explicitly approved notes kept in long-term memory.
pub const MAX_LONG_TERM: usize = 50;

/// A single remembered note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryEntry {
    pub entry: String,
    pub timestamp: DateTime<Utc>,
}

impl MemoryEntry {
    fn now(entry: &str) -> Self {
        Self {
            entry: entry.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Process-wide volatile memory. Each list is FIFO-evicted at its cap.
///
/// Appends from concurrent requests are serialized by a per-list lock; the
/// only ordering guarantee is lock acquisition order.
#[derive(Debug)]
pub struct MemoryStore {
    short_term: Mutex<VecDeque<MemoryEntry>>,
    long_term: Mutex<VecDeque<MemoryEntry>>,
    short_term_cap: usize,
    long_term_cap: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SHORT_TERM, MAX_LONG_TERM)
    }

    pub fn with_capacity(short_term_cap: usize, long_term_cap: usize) -> Self {
        Self {
            short_term: Mutex::new(VecDeque::with_capacity(short_term_cap + 1)),
            long_term: Mutex::new(VecDeque::with_capacity(long_term_cap + 1)),
            short_term_cap,
            long_term_cap,
        }
    }

    /// Append a note to short-term memory. Empty entries are ignored.
    pub fn add_short_term(&self, entry: &str) {
        if entry.is_empty() {
            return;
        }
        push_bounded(&mut self.short_term.lock(), MemoryEntry::now(entry), self.short_term_cap);
    }

    /// Oldest first.
    pub fn get_short_term(&self) -> Vec<MemoryEntry> {
        self.short_term.lock().iter().cloned().collect()
    }

    /// Append a note to long-term memory. Returns `false` for an empty entry.
    ///
    /// Only called on an explicit "remember" request; never inferred.
    pub fn add_long_term(&self, entry: &str) -> bool {
        if entry.is_empty() {
            return false;
        }
        push_bounded(&mut self.long_term.lock(), MemoryEntry::now(entry), self.long_term_cap);
        true
    }

    /// Oldest first.
    pub fn get_long_term(&self) -> Vec<MemoryEntry> {
        self.long_term.lock().iter().cloned().collect()
    }

    /// Render both lists as a prompt block, or `""` when both are empty.
    pub fn build_memory_context(&self) -> String {
        let stm = render_bullets(&self.short_term.lock());
        let ltm = render_bullets(&self.long_term.lock());

        if stm.is_empty() && ltm.is_empty() {
            return String::new();
        }

        format!(
            "Memory Context\nShort-Term:\n{}\n\nLong-Term:\n{}",
            or_none(&stm),
            or_none(&ltm)
        )
    }

    /// Empty both lists.
    pub fn clear(&self) {
        self.short_term.lock().clear();
        self.long_term.lock().clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn push_bounded(list: &mut VecDeque<MemoryEntry>, entry: MemoryEntry, cap: usize) {
    list.push_back(entry);
    while list.len() > cap {
        list.pop_front();
    }
}

fn render_bullets(list: &VecDeque<MemoryEntry>) -> String {
    list.iter()
        .map(|m| format!("- {}", m.entry))
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_none(section: &str) -> &str {
    if section.is_empty() {
        "(none)"
    } else {
        section
    }
}
