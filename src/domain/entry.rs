//! Remembered error entries for duplicate suppression.

use std::time::{Duration, Instant};

/// A single remembered error message and when it was first seen.
///
/// Entries are immutable after creation; the cache drops them once their
/// age exceeds its threshold.
#[derive(Debug, Clone)]
pub struct LoggedError {
    message: String,
    recorded_at: Instant,
}

impl LoggedError {
    /// Record an error message at the given instant.
    pub fn new(message: String, recorded_at: Instant) -> Self {
        Self {
            message,
            recorded_at,
        }
    }

    /// The exact message text this entry matches against.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// When this entry was recorded.
    pub fn recorded_at(&self) -> Instant {
        self.recorded_at
    }

    /// How old this entry is at `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.recorded_at)
    }
}
