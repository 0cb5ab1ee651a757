//! Rate-limited logging of elapsed-time measurements.
//!
//! `TimedLogger` wraps an [`AggregationWindow`] and emits one debug log
//! entry every `interval` completed samples, then starts a fresh window.
//! It performs no I/O of its own beyond that single entry.

use crate::application::debug_log::DebugLogger;
use crate::application::ports::Clock;
use crate::domain::policy::Severity;
use crate::domain::window::AggregationWindow;
use std::sync::{Arc, Mutex, MutexGuard};

/// Default number of samples between log entries.
pub const DEFAULT_LOG_INTERVAL: u32 = 100;

/// Logs the average duration of a repeating operation every N samples.
///
/// All operations run under a single per-instance lock, so concurrent
/// `start`/`finish` calls cannot lose samples or double-flush.
#[derive(Debug)]
pub struct TimedLogger {
    window: Mutex<AggregationWindow>,
    debug: Arc<DebugLogger>,
    clock: Arc<dyn Clock>,
    name: String,
    interval: u32,
    severity: Severity,
}

impl TimedLogger {
    /// Create a timed logger with the default interval (100) and severity
    /// (`Informational`).
    pub fn new(name: impl Into<String>, debug: Arc<DebugLogger>, clock: Arc<dyn Clock>) -> Self {
        Self {
            window: Mutex::new(AggregationWindow::new()),
            debug,
            clock,
            name: name.into(),
            interval: DEFAULT_LOG_INTERVAL,
            severity: Severity::Informational,
        }
    }

    /// Set the number of samples between log entries. A zero interval is
    /// coerced to the default of 100.
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = if interval == 0 {
            DEFAULT_LOG_INTERVAL
        } else {
            interval
        };
        self
    }

    /// Set the severity the summary entry is logged at. Default:
    /// `Informational`.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The configured flush interval.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// The name recorded in each summary entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether sampling is currently enabled.
    pub fn enabled(&self) -> bool {
        self.lock().enabled()
    }

    /// Enable or disable sampling. While disabled, `start` and `finish`
    /// are no-ops.
    pub fn set_enabled(&self, enabled: bool) {
        self.lock().set_enabled(enabled);
    }

    /// Start timing a new sample; an unfinished one is discarded.
    pub fn start(&self) {
        let now = self.clock.now();
        self.lock().start(now);
    }

    /// Finish the pending sample and flush a summary entry when the
    /// interval has been reached.
    pub fn finish(&self) {
        let now = self.clock.now();
        let mut window = self.lock();
        window.finish(now);
        if window.sample_count() < self.interval {
            return;
        }
        self.debug.log_action(
            &format!("TimedLogger({})", self.name),
            &format!(
                "#Events={} Avg.Time={}",
                window.sample_count(),
                window.average_millis()
            ),
            self.severity,
        );
        window.clear();
    }

    /// Average milliseconds per sample in the current window; `0.0` when
    /// the window is empty.
    pub fn average_millis(&self) -> f64 {
        self.lock().average_millis()
    }

    /// Completed samples in the current window.
    pub fn sample_count(&self) -> u32 {
        self.lock().sample_count()
    }

    fn lock(&self) -> MutexGuard<'_, AggregationWindow> {
        self.window.lock().unwrap_or_else(|e| e.into_inner())
    }
}
