//! Time-windowed duplicate suppression of error messages.
//!
//! The cache remembers every distinct message seen within its age
//! threshold and answers one question: has this exact text been logged
//! recently? Entries live in insertion order, which equals time order
//! because submissions are processed sequentially under one lock, so the
//! purge only ever inspects the oldest end.

use crate::application::ports::Clock;
use crate::domain::entry::LoggedError;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Default maximum entry age: repeats are suppressed for one day.
pub const DEFAULT_AGE_THRESHOLD: Duration = Duration::from_secs(24 * 60 * 60);

/// Result of submitting a message to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// True when the message was not a recent duplicate and must be logged.
    pub is_new: bool,
}

#[derive(Debug)]
struct CacheInner {
    /// Entries in strictly non-decreasing recorded-at order.
    order: VecDeque<LoggedError>,
    /// Exact-text lookup over the same entries.
    seen: HashSet<String, ahash::RandomState>,
}

/// Cache of recently logged error messages with lazy ordered eviction.
///
/// All state mutates under a single per-instance lock, held for the whole
/// purge + lookup + insert sequence, so the time-ordering invariant holds
/// under concurrent submissions.
#[derive(Debug)]
pub struct DuplicateCache {
    inner: Mutex<CacheInner>,
    clock: Arc<dyn Clock>,
    age_threshold: Duration,
}

impl DuplicateCache {
    /// Create a cache with the default one-day age threshold.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_age_threshold(clock, DEFAULT_AGE_THRESHOLD)
    }

    /// Create a cache with an explicit age threshold.
    pub fn with_age_threshold(clock: Arc<dyn Clock>, age_threshold: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                order: VecDeque::new(),
                seen: HashSet::default(),
            }),
            clock,
            age_threshold,
        }
    }

    /// The configured maximum entry age.
    pub fn age_threshold(&self) -> Duration {
        self.age_threshold
    }

    /// Submit a message: purge expired entries, then record the message if
    /// it is not already present.
    ///
    /// Matching is exact string equality over the full message text. Pure
    /// state mutation; no I/O, no failure modes.
    pub fn submit(&self, message: &str) -> SubmitOutcome {
        let now = self.clock.now();
        let mut inner = self.lock();

        // Entries are time ordered, so stop at the first non-expired one.
        while inner
            .order
            .front()
            .is_some_and(|oldest| oldest.age(now) > self.age_threshold)
        {
            if let Some(expired) = inner.order.pop_front() {
                inner.seen.remove(expired.message());
            }
        }

        if inner.seen.contains(message) {
            return SubmitOutcome { is_new: false };
        }

        inner
            .order
            .push_back(LoggedError::new(message.to_string(), now));
        inner.seen.insert(message.to_string());
        SubmitOutcome { is_new: true }
    }

    /// Number of remembered messages, without purging.
    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    /// Whether the cache currently remembers nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget all remembered messages.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.order.clear();
        inner.seen.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        // A poisoned lock means another thread panicked mid-submit; the
        // cache state is still a consistent set of entries.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
