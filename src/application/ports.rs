//! Ports (interfaces) for the application layer.
//!
//! The loggers in this layer never touch files, screens, or platform stack
//! walkers directly; those concerns sit behind the narrow traits defined
//! here, and infrastructure adapters implement them. Tests inject mock
//! implementations (see `crate::infrastructure::mocks`).

use crate::domain::stack::{StackFrame, ThreadSnapshot};
use chrono::{DateTime, Local};
use std::fmt;
use std::fmt::Debug;
use std::time::Instant;

/// Port for obtaining current time.
///
/// Supplies both a monotonic instant (for ages and elapsed-time samples)
/// and a wall-clock time (for timestamps embedded in log lines). Injected
/// so purge and aggregation behavior is testable.
pub trait Clock: Send + Sync + Debug {
    /// Get the current monotonic instant.
    fn now(&self) -> Instant;

    /// Get the current wall-clock time.
    fn wall_time(&self) -> DateTime<Local>;
}

/// Port for appending pre-formatted lines to persistent storage.
///
/// Logging is best effort: implementations swallow their own failures and
/// never report them back. At worst a line is not written.
pub trait LogSink: Send + Sync + Debug {
    /// Append a single pre-formatted line.
    fn append(&self, line: &str);
}

/// Port for surfacing an error message to the user.
///
/// How the message is presented (message box, terminal, ...) is entirely
/// the implementation's concern.
pub trait Notifier: Send + Sync + Debug {
    /// Present a message with a title.
    fn present(&self, title: &str, body: &str);
}

/// Port for looking up fixed label text by key.
///
/// Labels may be templates with `{0}`-style positional placeholders,
/// filled through [`Resources::format`].
pub trait Resources: Send + Sync + Debug {
    /// Look up the label or template registered under `key`. Unknown keys
    /// return the key itself so output stays readable.
    fn lookup(&self, key: &str) -> String;

    /// Look up a template and fill its positional placeholders.
    fn format(&self, key: &str, args: &[&str]) -> String {
        fill_template(&self.lookup(key), args)
    }
}

/// Replace `{0}`-style positional placeholders in a template.
///
/// Placeholders without a matching argument are left in place.
pub fn fill_template(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}

/// Error raised when a stack or thread snapshot cannot be taken.
///
/// Callers of [`StackCapture`] recover from this locally by rendering a
/// fallback line; it never propagates further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureError {
    message: String,
}

impl CaptureError {
    /// Create a capture error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CaptureError {}

/// Port for freezing call stacks and thread states.
///
/// A capture is a snapshot with no ordering guarantee relative to the
/// captured thread's concurrent execution; the formatter accepts whatever
/// frame list the platform walker freezes at call time.
pub trait StackCapture: Send + Sync + Debug {
    /// Capture the calling thread's stack, innermost frame first.
    fn capture_current(&self) -> Result<Vec<StackFrame>, CaptureError>;

    /// Snapshot the calling thread's identity and run state.
    fn current_thread(&self) -> ThreadSnapshot;

    /// Snapshot the run state of every thread in the process.
    fn process_threads(&self) -> Result<Vec<ThreadSnapshot>, CaptureError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_error_display() {
        let err = CaptureError::new("walker unavailable");
        assert_eq!(err.to_string(), "walker unavailable");
        assert_eq!(err.message(), "walker unavailable");
    }

    #[test]
    fn test_fill_template() {
        assert_eq!(fill_template("Thread {0}({1})", &["main", "1"]), "Thread main(1)");
        assert_eq!(fill_template("no placeholders", &["x"]), "no placeholders");
        // Unmatched placeholders stay visible rather than vanishing
        assert_eq!(fill_template("{0} and {1}", &["a"]), "a and {1}");
    }
}
