//! Elapsed-time aggregation over a window of samples.

use std::time::Instant;

/// Accumulates elapsed-time samples between periodic flushes.
///
/// A window tracks total elapsed milliseconds and a sample count, plus at
/// most one pending start. Starting while a start is already pending
/// discards the old one; finishing without a pending start is a no-op.
#[derive(Debug, Clone)]
pub struct AggregationWindow {
    enabled: bool,
    total_millis: f64,
    sample_count: u32,
    pending_start: Option<Instant>,
}

impl AggregationWindow {
    /// Create an empty, enabled window.
    pub fn new() -> Self {
        Self {
            enabled: true,
            total_millis: 0.0,
            sample_count: 0,
            pending_start: None,
        }
    }

    /// Whether samples are currently being recorded.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable sample recording. While disabled, `start` and
    /// `finish` are no-ops.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Begin timing a new sample, discarding any unfinished one.
    pub fn start(&mut self, now: Instant) {
        if !self.enabled {
            return;
        }
        self.pending_start = Some(now);
    }

    /// Finish the pending sample and fold its elapsed time into the window.
    pub fn finish(&mut self, now: Instant) {
        if !self.enabled {
            return;
        }
        let Some(started) = self.pending_start.take() else {
            return;
        };
        let elapsed = now.saturating_duration_since(started);
        self.total_millis += elapsed.as_secs_f64() * 1_000.0;
        self.sample_count += 1;
    }

    /// Total elapsed milliseconds since the last reset.
    pub fn total_millis(&self) -> f64 {
        self.total_millis
    }

    /// Number of completed samples since the last reset.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Average milliseconds per sample; `0.0` for an empty window.
    pub fn average_millis(&self) -> f64 {
        if self.sample_count == 0 {
            return 0.0;
        }
        self.total_millis / f64::from(self.sample_count)
    }

    /// Reset all tracking, including any pending start.
    pub fn clear(&mut self) {
        self.total_millis = 0.0;
        self.sample_count = 0;
        self.pending_start = None;
    }
}

impl Default for AggregationWindow {
    fn default() -> Self {
        Self::new()
    }
}
