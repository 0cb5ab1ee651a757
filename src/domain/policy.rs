//! Display and severity policies for error and debug logging.

use tracing::Level;

/// When an error message should be surfaced to the user, in addition to
/// being written to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPolicy {
    /// Surface the message regardless of whether it was logged.
    Always,
    /// Never surface the message.
    Never,
    /// Surface the message only when it was actually logged, i.e. when it
    /// was not suppressed as a duplicate.
    OnlyIfLogged,
}

impl DisplayPolicy {
    /// Decide whether to surface a message, given whether it was new
    /// (logged) or a suppressed duplicate.
    pub fn should_display(self, is_new: bool) -> bool {
        match self {
            DisplayPolicy::Always => true,
            DisplayPolicy::Never => false,
            DisplayPolicy::OnlyIfLogged => is_new,
        }
    }
}

/// Severity of a debug log entry.
///
/// Entries below a logger's threshold are dropped. The ordering is
/// `Informational < Warning < Alarm < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Not very important. For information only.
    Informational,
    /// Important events that are unlikely to cause problems.
    Warning,
    /// Events that may cause problems.
    Alarm,
    /// Events that should almost always be logged.
    Critical,
}

impl Severity {
    /// The `tracing` level this severity maps to when entries are
    /// mirrored into the tracing ecosystem.
    pub fn tracing_level(self) -> Level {
        match self {
            Severity::Informational => Level::DEBUG,
            Severity::Warning => Level::WARN,
            Severity::Alarm | Severity::Critical => Level::ERROR,
        }
    }

    /// Short label used in formatted log lines.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Informational => "INFO",
            Severity::Warning => "WARN",
            Severity::Alarm => "ALARM",
            Severity::Critical => "CRIT",
        }
    }
}
