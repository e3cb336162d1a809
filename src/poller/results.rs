//! Newest-first result list backing the display.

use std::collections::VecDeque;

/// Ordered list of published strings, most recent first, never evicted
#[derive(Debug, Default, Clone)]
pub struct ResultList {
    entries: VecDeque<String>,
}

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the head
    pub fn publish(&mut self, entry: impl Into<String>) {
        self.entries.push_front(entry.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries newest-first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
