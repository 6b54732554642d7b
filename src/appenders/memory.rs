//! In-memory appender for embedding and tests

use crate::core::{Appender, LogEntry, LogLevel, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Captures entries in a shared buffer.
///
/// Clones share the same buffer, so one handle can be given to a
/// [`Logger`](crate::core::Logger) while another is kept for inspection.
#[derive(Clone, Default)]
pub struct MemoryAppender {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().iter().map(|e| e.message.clone()).collect()
    }

    pub fn entries_at(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let handle = MemoryAppender::new();
        let mut writer = handle.clone();

        writer.append(&LogEntry::new(LogLevel::Info, "a", "one")).unwrap();
        writer.append(&LogEntry::new(LogLevel::Error, "a", "two")).unwrap();

        assert_eq!(handle.len(), 2);
        assert_eq!(handle.messages(), vec!["one", "two"]);
        assert_eq!(handle.entries_at(LogLevel::Error).len(), 1);

        handle.clear();
        assert!(writer.is_empty());
    }
}
