//! Mock log sink for testing.

use crate::application::ports::LogSink;
use std::sync::{Arc, Mutex};

/// Mock sink that records appended lines in memory.
///
/// Clones share the same line buffer, so a test can hand one clone to a
/// logger and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MockSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MockSink {
    /// Create an empty mock sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines appended so far, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock")
            .clone()
    }

    /// Discard all recorded lines.
    pub fn clear(&self) {
        self.lines
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock")
            .clear();
    }
}

impl LogSink for MockSink {
    fn append(&self, line: &str) {
        self.lines
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock")
            .push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_lines_in_order() {
        let sink = MockSink::new();
        sink.append("a");
        sink.append("b");

        assert_eq!(sink.lines(), vec!["a", "b"]);

        sink.clear();
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_clones_share_buffer() {
        let sink = MockSink::new();
        let clone = sink.clone();

        clone.append("shared");
        assert_eq!(sink.lines(), vec!["shared"]);
    }
}
