//! Mock clock for testing.

use crate::application::ports::Clock;
use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Mock clock for testing.
///
/// Allows tests to control time progression explicitly, enabling
/// deterministic testing of age-based purging and timing aggregation.
/// The wall clock advances in lockstep with the monotonic instant.
///
/// # Thread Safety
///
/// `MockClock` is thread-safe and can be cloned to share across threads.
/// All clones share the same underlying time value, so advancing time in
/// one clone affects all clones.
#[derive(Debug, Clone)]
pub struct MockClock {
    inner: Arc<Mutex<MockClockInner>>,
}

#[derive(Debug)]
struct MockClockInner {
    instant: Instant,
    wall: DateTime<Local>,
}

impl MockClock {
    /// Create a mock clock starting at a specific instant. The wall clock
    /// starts at the real current time and advances with the instant.
    pub fn new(start: Instant) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockClockInner {
                instant: start,
                wall: Local::now(),
            })),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, duration: Duration) {
        let mut inner = self
            .inner
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        inner.instant += duration;
        inner.wall += chrono::Duration::from_std(duration)
            .expect("advance duration out of chrono range");
    }

    /// Set the monotonic clock to a specific instant.
    pub fn set(&self, instant: Instant) {
        let mut inner = self
            .inner
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        inner.instant = instant;
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.inner
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
            .instant
    }

    fn wall_time(&self) -> DateTime<Local> {
        self.inner
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
            .wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_clock_advances_explicitly() {
        let start = Instant::now();
        let clock = MockClock::new(start);

        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_secs(10));
        assert_eq!(clock.now(), start + Duration::from_secs(10));

        let new_time = start + Duration::from_secs(100);
        clock.set(new_time);
        assert_eq!(clock.now(), new_time);
    }

    #[test]
    fn test_wall_time_advances_with_instant() {
        let clock = MockClock::new(Instant::now());
        let before = clock.wall_time();

        clock.advance(Duration::from_secs(60));
        assert_eq!(clock.wall_time() - before, chrono::Duration::seconds(60));
    }

    #[test]
    fn test_clones_share_time() {
        let start = Instant::now();
        let clock = MockClock::new(start);
        let clone = clock.clone();

        clone.advance(Duration::from_secs(5));
        assert_eq!(clock.now(), start + Duration::from_secs(5));
    }
}
