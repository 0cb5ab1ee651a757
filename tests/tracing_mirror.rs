use logfold::infrastructure::mocks::{MockCaptureLayer, MockClock, MockSink};
use logfold::{
    CaptureError, DebugLogger, Severity, StackCapture, StackFrame, ThreadRunState, ThreadSnapshot,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug)]
struct NoCapture;

impl StackCapture for NoCapture {
    fn capture_current(&self) -> Result<Vec<StackFrame>, CaptureError> {
        Ok(vec![])
    }

    fn current_thread(&self) -> ThreadSnapshot {
        ThreadSnapshot {
            name: None,
            id: 0,
            state: ThreadRunState::Running,
            wait_reason: None,
        }
    }

    fn process_threads(&self) -> Result<Vec<ThreadSnapshot>, CaptureError> {
        Ok(vec![])
    }
}

fn debug_logger(threshold: Severity) -> (DebugLogger, MockSink) {
    let sink = MockSink::new();
    let logger = DebugLogger::with_threshold(
        Arc::new(sink.clone()),
        Arc::new(MockClock::new(Instant::now())),
        Arc::new(NoCapture),
        threshold,
    );
    (logger, sink)
}

#[test]
fn test_entries_mirrored_at_mapped_levels() {
    let capture = MockCaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let (logger, _sink) = debug_logger(Severity::Informational);

    tracing::subscriber::with_default(subscriber, || {
        logger.log_action("src", "routine", Severity::Informational);
        logger.log_action("src", "odd", Severity::Warning);
        logger.log_action("src", "bad", Severity::Alarm);
        logger.log_action("src", "fatal", Severity::Critical);
    });

    let events = capture.get_captured();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].level, Level::DEBUG);
    assert_eq!(events[1].level, Level::WARN);
    assert_eq!(events[2].level, Level::ERROR);
    assert_eq!(events[3].level, Level::ERROR);
    assert!(events.iter().all(|e| e.target == "logfold"));
    assert!(events[1].message.contains("odd"));
}

#[test]
fn test_filtered_entries_not_mirrored() {
    let capture = MockCaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let (logger, sink) = debug_logger(Severity::Critical);

    tracing::subscriber::with_default(subscriber, || {
        logger.log_action("src", "routine", Severity::Informational);
        logger.log_action("src", "bad", Severity::Alarm);
    });

    // Dropped at the sink and in the mirror alike
    assert_eq!(capture.count(), 0);
    assert_eq!(sink.lines().len(), 0);
}

#[test]
fn test_disabled_logger_not_mirrored() {
    let capture = MockCaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let (logger, _sink) = debug_logger(Severity::Informational);
    logger.set_enabled(false);

    tracing::subscriber::with_default(subscriber, || {
        logger.log_action("src", "fatal", Severity::Critical);
    });

    assert_eq!(capture.count(), 0);
}
