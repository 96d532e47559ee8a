//! Append-only history of terminal lines.

use termfolio_types::line::{LineEntry, ProjectCard};

/// Ordered log of every line the terminal has shown since the last reset.
///
/// Lines are never reordered or deduplicated. `reset()` is the only way to
/// remove them, and it bumps `epoch()` so incremental renderers know the
/// lines they already drew are gone.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<LineEntry>,
    epoch: u64,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LineEntry) {
        self.entries.push(entry);
    }

    /// Append entries in iteration order.
    pub fn append(&mut self, entries: impl IntoIterator<Item = LineEntry>) {
        self.entries.extend(entries);
    }

    /// Discard every entry.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.epoch += 1;
    }

    pub fn entries(&self) -> &[LineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of resets so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Project cards in log order.
    pub fn cards(&self) -> impl Iterator<Item = &ProjectCard> {
        self.entries.iter().filter_map(LineEntry::as_card)
    }
}
