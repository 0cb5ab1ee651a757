//! # logfold
//!
//! Deduplicating error logging and diagnostic reporting with `tracing` integration.
//!
//! This crate provides a small toolkit for long-running desktop and service
//! applications that need readable, low-noise diagnostic logs:
//!
//! - **Error deduplication**: identical error reports within a 24-hour window
//!   are written to the log file only once, so a fault that fires in a tight
//!   loop does not flood the log.
//! - **Debug reporting**: tab-separated report lines with timestamps, thread
//!   identity, and severity filtering, mirrored into the `tracing` ecosystem.
//! - **Call stack snapshots**: captured stacks with library-frame collapsing,
//!   so the application's own frames stand out.
//! - **Timing aggregation**: measure a repeated operation and report the
//!   average duration once every N samples instead of once per call.
//! - **ASCII serialization**: render values with control characters spelled
//!   out (`<CR>`, `<NUL>`), safe to paste into a log line.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logfold::{
//!     DebugLogger, DisplayPolicy, ErrorLogger, FileSink, Severity, SystemClock,
//! };
//! use std::sync::Arc;
//!
//! # struct NoopNotifier;
//! # impl std::fmt::Debug for NoopNotifier {
//! #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//! #         f.write_str("NoopNotifier")
//! #     }
//! # }
//! # impl logfold::Notifier for NoopNotifier {
//! #     fn present(&self, _title: &str, _body: &str) {}
//! # }
//! let debug = Arc::new(DebugLogger::with_threshold(
//!     Arc::new(FileSink::new("myapp.dbg")),
//!     Arc::new(SystemClock::new()),
//!     Arc::new(logfold::BacktraceCapture::new()),
//!     Severity::Informational,
//! ));
//!
//! let logger = ErrorLogger::builder(
//!     Arc::new(FileSink::new("myapp.err")),
//!     debug,
//!     Arc::new(NoopNotifier),
//! )
//! .with_app_name("MyApp")
//! .build()
//! .unwrap();
//!
//! // First occurrence is written and (optionally) shown to the user.
//! logger.log_error("database connection refused", DisplayPolicy::OnlyIfLogged);
//!
//! // A repeat within 24 hours is silently suppressed.
//! logger.log_error("database connection refused", DisplayPolicy::OnlyIfLogged);
//! ```
//!
//! ## Deduplication
//!
//! Reports are deduplicated on their full text, including the thread prefix.
//! The same message logged from two different threads produces two log
//! entries; the same message from the same thread produces one. Entries
//! older than the age threshold (24 hours by default) are purged lazily on
//! the next submission, so a recurring fault reappears in the log about once
//! a day.
//!
//! ## Severity Filtering
//!
//! [`DebugLogger`] filters reports by [`Severity`]. The default threshold is
//! [`Severity::Critical`], which means routine reports (including
//! [`TimedLogger`] flushes, which are `Informational`) are dropped until the
//! threshold is lowered. Accepted reports are also mirrored as `tracing`
//! events under the `logfold` target.
//!
//! ## Timing
//!
//! ```rust,no_run
//! # use logfold::{BacktraceCapture, DebugLogger, FileSink, SystemClock, TimedLogger};
//! # use std::sync::Arc;
//! # let debug = Arc::new(DebugLogger::new(
//! #     Arc::new(FileSink::new("myapp.dbg")),
//! #     Arc::new(SystemClock::new()),
//! #     Arc::new(BacktraceCapture::new()),
//! # ));
//! let timer = TimedLogger::new("parse", debug, Arc::new(SystemClock::new()));
//!
//! for _ in 0..1_000 {
//!     timer.start();
//!     // ... the measured operation ...
//!     timer.finish(); // reports the average once every 100 samples
//! }
//! ```
//!
//! ## Testing Support
//!
//! Enable the `test-helpers` feature to get controllable test doubles:
//! [`infrastructure::mocks::MockClock`], [`infrastructure::mocks::MockSink`],
//! [`infrastructure::mocks::MockNotifier`], and
//! [`infrastructure::mocks::MockCaptureLayer`] for observing the `tracing`
//! mirror.

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    ascii::{asciify, BoundedArray, LogValue},
    entry::LoggedError,
    policy::{DisplayPolicy, Severity},
    stack::{
        format_frames, format_process_threads, format_thread_state, is_std_symbol, StackFrame,
        ThreadRunState, ThreadSnapshot,
    },
    window::AggregationWindow,
};

pub use application::{
    debug_log::DebugLogger,
    dedup::{DuplicateCache, SubmitOutcome, DEFAULT_AGE_THRESHOLD},
    error_log::{BuildError, ErrorLogger, ErrorLoggerBuilder},
    ports::{fill_template, CaptureError, Clock, LogSink, Notifier, Resources, StackCapture},
    timing::{TimedLogger, DEFAULT_LOG_INTERVAL},
};

pub use infrastructure::{
    capture::BacktraceCapture, clock::SystemClock, resources::StaticResources, sink::FileSink,
};
