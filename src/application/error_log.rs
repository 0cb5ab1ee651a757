//! Error-logging façade with duplicate suppression.
//!
//! `ErrorLogger` ties the pieces together: it prefixes incoming error text
//! with the reporting thread's identity, asks the duplicate cache whether
//! the message is new, appends new messages to the error sink, mirrors
//! them to the debug logger at `Alarm` severity, and finally applies the
//! caller's display policy.

use crate::application::debug_log::DebugLogger;
use crate::application::dedup::{DuplicateCache, SubmitOutcome, DEFAULT_AGE_THRESHOLD};
use crate::application::ports::{Clock, LogSink, Notifier, Resources, StackCapture};
use crate::domain::policy::{DisplayPolicy, Severity};
use crate::infrastructure::capture::BacktraceCapture;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::resources::StaticResources;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Characters an application name may not contain; the name feeds
/// path-like collaborator keys.
const RESERVED_NAME_CHARS: [char; 3] = ['\\', '/', '.'];

/// Separator line written before each error block.
const BLOCK_SEPARATOR: &str =
    "--------------------------------------------------------------------------------";

/// Error returned when building an [`ErrorLogger`] fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The application name contains a reserved character.
    InvalidAppName(String),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidAppName(name) => {
                write!(f, "invalid application name {name:?}: must not contain '\\', '/' or '.'")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Builder for [`ErrorLogger`].
///
/// The sink, debug logger, and notifier are required; the remaining
/// collaborators default to the system adapters.
pub struct ErrorLoggerBuilder {
    sink: Arc<dyn LogSink>,
    debug: Arc<DebugLogger>,
    notifier: Arc<dyn Notifier>,
    clock: Option<Arc<dyn Clock>>,
    resources: Option<Arc<dyn Resources>>,
    capture: Option<Arc<dyn StackCapture>>,
    app_name: String,
    age_threshold: Duration,
}

impl ErrorLoggerBuilder {
    fn new(sink: Arc<dyn LogSink>, debug: Arc<DebugLogger>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            sink,
            debug,
            notifier,
            clock: None,
            resources: None,
            capture: None,
            app_name: "MyApp".to_string(),
            age_threshold: DEFAULT_AGE_THRESHOLD,
        }
    }

    /// Set the application name used in notification titles and the log
    /// label. Validated at build time.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Set how long a message suppresses its repeats. Default: 24 hours.
    pub fn with_age_threshold(mut self, age_threshold: Duration) -> Self {
        self.age_threshold = age_threshold;
        self
    }

    /// Replace the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace the built-in label table.
    pub fn with_resources(mut self, resources: Arc<dyn Resources>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Replace the native stack capture adapter.
    pub fn with_capture(mut self, capture: Arc<dyn StackCapture>) -> Self {
        self.capture = Some(capture);
        self
    }

    /// Validate the configuration and build the logger.
    ///
    /// # Errors
    /// Returns [`BuildError::InvalidAppName`] when the application name
    /// contains `\`, `/` or `.`.
    pub fn build(self) -> Result<ErrorLogger, BuildError> {
        if self.app_name.contains(&RESERVED_NAME_CHARS[..]) {
            return Err(BuildError::InvalidAppName(self.app_name));
        }
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        let log_label = format!("{}.err", self.app_name);
        Ok(ErrorLogger {
            cache: DuplicateCache::with_age_threshold(Arc::clone(&clock), self.age_threshold),
            sink: self.sink,
            debug: self.debug,
            notifier: self.notifier,
            resources: self
                .resources
                .unwrap_or_else(|| Arc::new(StaticResources::new())),
            capture: self
                .capture
                .unwrap_or_else(|| Arc::new(BacktraceCapture::new())),
            clock,
            app_name: self.app_name,
            log_label,
        })
    }
}

/// Duplicate-suppressing error logger.
pub struct ErrorLogger {
    cache: DuplicateCache,
    sink: Arc<dyn LogSink>,
    debug: Arc<DebugLogger>,
    notifier: Arc<dyn Notifier>,
    resources: Arc<dyn Resources>,
    capture: Arc<dyn StackCapture>,
    clock: Arc<dyn Clock>,
    app_name: String,
    log_label: String,
}

impl ErrorLogger {
    /// Start building an error logger from its required collaborators.
    pub fn builder(
        sink: Arc<dyn LogSink>,
        debug: Arc<DebugLogger>,
        notifier: Arc<dyn Notifier>,
    ) -> ErrorLoggerBuilder {
        ErrorLoggerBuilder::new(sink, debug, notifier)
    }

    /// The validated application name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// The label shown to the user as the place errors are logged.
    pub fn log_label(&self) -> &str {
        &self.log_label
    }

    /// Log an error if it is not a recent duplicate, then apply the
    /// display policy. Returns the submission outcome.
    ///
    /// The message is prefixed with the reporting thread's name and id
    /// before dedup matching, so identical errors from differently named
    /// threads are tracked separately.
    pub fn log_error(&self, text: &str, display: DisplayPolicy) -> SubmitOutcome {
        let thread = self.capture.current_thread();
        let prefix = self.resources.format(
            "thread-prefix",
            &[thread.display_name(), &thread.id.to_string()],
        );
        let message = format!("{prefix}\n{text}");

        let outcome = self.cache.submit(&message);
        if outcome.is_new {
            self.append_block(&message);
            self.debug.log_action(
                &self.resources.lookup("unhandled-error"),
                &message,
                Severity::Alarm,
            );
        }
        if display.should_display(outcome.is_new) {
            let title = self.resources.format("error-caption", &[&self.app_name]);
            let body = self
                .resources
                .format("error-header", &[&self.log_label, &message]);
            self.notifier.present(&title, &body);
        }
        outcome
    }

    /// Number of messages currently remembered for suppression.
    pub fn remembered(&self) -> usize {
        self.cache.len()
    }

    /// Write one dated error block: separator, timestamp, text, blank.
    fn append_block(&self, message: &str) {
        self.sink.append(BLOCK_SEPARATOR);
        self.sink.append(
            &self
                .clock
                .wall_time()
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
        );
        self.sink.append(message);
        self.sink.append("");
    }
}

impl fmt::Debug for ErrorLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorLogger")
            .field("app_name", &self.app_name)
            .field("log_label", &self.log_label)
            .field("age_threshold", &self.cache.age_threshold())
            .finish_non_exhaustive()
    }
}
