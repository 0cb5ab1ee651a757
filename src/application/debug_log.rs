//! Severity-filtered debug logging with stack and thread-state dumps.
//!
//! Every accepted entry is appended to the injected sink and mirrored as a
//! `tracing` event at the mapped level, so the toolkit's output is visible
//! to whatever subscriber the host program has installed.

use crate::application::ports::{Clock, LogSink, StackCapture};
use crate::domain::ascii::{asciify, LogValue};
use crate::domain::policy::Severity;
use crate::domain::stack;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Debug logger with a severity threshold and an enable switch.
///
/// Entries below the threshold, or any entry while disabled, are dropped
/// without touching the sink. The threshold is fixed at construction; the
/// enable switch can be flipped at runtime from any thread.
#[derive(Debug)]
pub struct DebugLogger {
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
    capture: Arc<dyn StackCapture>,
    threshold: Severity,
    enabled: AtomicBool,
}

impl DebugLogger {
    /// Create a debug logger with the default `Critical` threshold.
    pub fn new(
        sink: Arc<dyn LogSink>,
        clock: Arc<dyn Clock>,
        capture: Arc<dyn StackCapture>,
    ) -> Self {
        Self::with_threshold(sink, clock, capture, Severity::Critical)
    }

    /// Create a debug logger with an explicit severity threshold.
    pub fn with_threshold(
        sink: Arc<dyn LogSink>,
        clock: Arc<dyn Clock>,
        capture: Arc<dyn StackCapture>,
        threshold: Severity,
    ) -> Self {
        Self {
            sink,
            clock,
            capture,
            threshold,
            enabled: AtomicBool::new(true),
        }
    }

    /// The severity below which entries are dropped.
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Whether logging is currently enabled.
    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enable or disable all logging through this instance.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Log a single action.
    pub fn log_action(&self, source: &str, what: &str, severity: Severity) {
        if !self.accepts(severity) {
            return;
        }
        self.sink.append(&self.report(source, what, ""));
        mirror(severity, source, what);
    }

    /// Log a single action together with serialized data.
    ///
    /// The data is rendered through the ASCII serializer, so any value
    /// shape is safe to pass.
    pub fn log_action_with_data(
        &self,
        source: &str,
        what: &str,
        data: &LogValue,
        severity: Severity,
    ) {
        if !self.accepts(severity) {
            return;
        }
        self.sink.append(&self.report(source, what, &asciify(data)));
        mirror(severity, source, what);
    }

    /// Log the calling thread's call stack.
    pub fn log_call_stack(&self, info: &str) {
        self.log_thread_state(info);
    }

    /// Log the calling thread's identity, run state, and call stack.
    ///
    /// Capture failures never propagate; the stack body degrades to a
    /// single fallback line naming the failure.
    pub fn log_thread_state(&self, info: &str) {
        if !self.enabled() {
            return;
        }
        let snapshot = self.capture.current_thread();
        let stack_body = match self.capture.capture_current() {
            Ok(frames) => stack::format_frames(&frames),
            Err(e) => {
                tracing::debug!(target: "logfold", error = %e, "stack capture failed");
                format!("      No call stack available. {e}\n")
            }
        };
        let mut block = self.report(info, "", "");
        block.push('\n');
        block.push_str(&stack::format_thread_state(&snapshot, &stack_body));
        self.sink.append(&block);
    }

    /// Log a run-state summary of every thread in the process.
    pub fn log_process_threads(&self, info: &str) {
        if !self.enabled() {
            return;
        }
        let body = match self.capture.process_threads() {
            Ok(threads) => stack::format_process_threads(&threads),
            Err(e) => {
                tracing::debug!(target: "logfold", error = %e, "thread snapshot failed");
                format!("   No thread information available. {e}\n")
            }
        };
        let mut block = self.report(info, "", "");
        block.push('\n');
        block.push_str(&body);
        self.sink.append(&block);
    }

    fn accepts(&self, severity: Severity) -> bool {
        self.enabled() && severity >= self.threshold
    }

    /// Build one report line:
    /// `<iso timestamp> \t<thread>(<id>)\t<source>\t<what>\t<extra>`.
    fn report(&self, source: &str, what: &str, extra: &str) -> String {
        let stamp = self.clock.wall_time().format("%Y-%m-%dT%H:%M:%S");
        let thread = self.capture.current_thread();
        format!(
            "{stamp} \t{}({})\t{source}\t{what}\t{extra}",
            thread.display_name(),
            thread.id
        )
    }
}

/// Mirror an accepted entry into the `tracing` ecosystem.
fn mirror(severity: Severity, source: &str, message: &str) {
    match severity {
        Severity::Informational => {
            tracing::debug!(target: "logfold", source, "{message}");
        }
        Severity::Warning => {
            tracing::warn!(target: "logfold", source, "{message}");
        }
        Severity::Alarm | Severity::Critical => {
            tracing::error!(target: "logfold", source, "{message}");
        }
    }
}
