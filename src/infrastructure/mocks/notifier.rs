//! Mock notifier for testing.

use crate::application::ports::Notifier;
use std::sync::{Arc, Mutex};

/// Mock notifier that records presented messages instead of showing them.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    presented: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockNotifier {
    /// Create an empty mock notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(title, body)` pairs presented so far, in order.
    pub fn presented(&self) -> Vec<(String, String)> {
        self.presented
            .lock()
            .expect("MockNotifier mutex poisoned - a test thread panicked while holding the lock")
            .clone()
    }
}

impl Notifier for MockNotifier {
    fn present(&self, title: &str, body: &str) {
        self.presented
            .lock()
            .expect("MockNotifier mutex poisoned - a test thread panicked while holding the lock")
            .push((title.to_string(), body.to_string()));
    }
}
