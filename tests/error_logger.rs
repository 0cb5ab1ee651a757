use logfold::infrastructure::mocks::{MockClock, MockNotifier, MockSink};
use logfold::{
    CaptureError, DebugLogger, DisplayPolicy, ErrorLogger, Severity, StackCapture, StackFrame,
    ThreadRunState, ThreadSnapshot, DEFAULT_AGE_THRESHOLD,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Capture stub reporting a fixed thread identity, so dedup keys and
/// report prefixes are deterministic.
#[derive(Debug)]
struct NamedThread {
    name: &'static str,
    id: u64,
}

impl StackCapture for NamedThread {
    fn capture_current(&self) -> Result<Vec<StackFrame>, CaptureError> {
        Ok(vec![StackFrame::application("myapp::main")])
    }

    fn current_thread(&self) -> ThreadSnapshot {
        ThreadSnapshot {
            name: Some(self.name.to_string()),
            id: self.id,
            state: ThreadRunState::Running,
            wait_reason: None,
        }
    }

    fn process_threads(&self) -> Result<Vec<ThreadSnapshot>, CaptureError> {
        Ok(vec![self.current_thread()])
    }
}

struct Setup {
    logger: ErrorLogger,
    error_sink: MockSink,
    debug_sink: MockSink,
    notifier: MockNotifier,
    clock: MockClock,
}

fn setup_with_thread(name: &'static str, id: u64) -> Setup {
    let clock = MockClock::new(Instant::now());
    let error_sink = MockSink::new();
    let debug_sink = MockSink::new();
    let notifier = MockNotifier::new();
    let capture = Arc::new(NamedThread { name, id });
    let debug = DebugLogger::with_threshold(
        Arc::new(debug_sink.clone()),
        Arc::new(clock.clone()),
        capture.clone(),
        Severity::Informational,
    );
    let logger = ErrorLogger::builder(
        Arc::new(error_sink.clone()),
        Arc::new(debug),
        Arc::new(notifier.clone()),
    )
    .with_app_name("Demo")
    .with_clock(Arc::new(clock.clone()))
    .with_capture(capture)
    .build()
    .unwrap();
    Setup {
        logger,
        error_sink,
        debug_sink,
        notifier,
        clock,
    }
}

fn setup() -> Setup {
    setup_with_thread("main", 1)
}

#[test]
fn test_first_occurrence_written_with_block_layout() {
    let s = setup();
    let outcome = s.logger.log_error("disk full", DisplayPolicy::Never);

    assert!(outcome.is_new);
    let lines = s.error_sink.lines();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].chars().all(|c| c == '-'));
    assert_eq!(lines[1].len(), 19); // ISO timestamp without offset
    assert_eq!(lines[2], "Thread main(1)\ndisk full");
    assert_eq!(lines[3], "");
}

#[test]
fn test_repeats_suppressed_until_age_threshold() {
    let s = setup();
    assert!(s.logger.log_error("disk full", DisplayPolicy::Never).is_new);

    // Repeats an hour apart stay suppressed
    for _ in 0..5 {
        s.clock.advance(Duration::from_secs(3600));
        assert!(!s.logger.log_error("disk full", DisplayPolicy::Never).is_new);
    }
    assert_eq!(s.error_sink.lines().len(), 4);

    // Past the 24-hour mark the entry has aged out and is logged again
    s.clock.advance(DEFAULT_AGE_THRESHOLD);
    assert!(s.logger.log_error("disk full", DisplayPolicy::Never).is_new);
    assert_eq!(s.error_sink.lines().len(), 8);
}

/// Capture stub cycling through thread identities on successive calls.
#[derive(Debug)]
struct RotatingThread {
    next: std::sync::atomic::AtomicU64,
}

impl StackCapture for RotatingThread {
    fn capture_current(&self) -> Result<Vec<StackFrame>, CaptureError> {
        Ok(vec![])
    }

    fn current_thread(&self) -> ThreadSnapshot {
        let id = self.next.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        ThreadSnapshot {
            name: Some(format!("worker-{id}")),
            id,
            state: ThreadRunState::Running,
            wait_reason: None,
        }
    }

    fn process_threads(&self) -> Result<Vec<ThreadSnapshot>, CaptureError> {
        Ok(vec![])
    }
}

#[test]
fn test_same_text_from_different_threads_logged_separately() {
    let clock = MockClock::new(Instant::now());
    let error_sink = MockSink::new();
    let capture = Arc::new(RotatingThread {
        next: std::sync::atomic::AtomicU64::new(1),
    });
    let debug = DebugLogger::new(
        Arc::new(MockSink::new()),
        Arc::new(clock.clone()),
        capture.clone(),
    );
    let logger = ErrorLogger::builder(
        Arc::new(error_sink.clone()),
        Arc::new(debug),
        Arc::new(MockNotifier::new()),
    )
    .with_clock(Arc::new(clock))
    .with_capture(capture)
    .build()
    .unwrap();

    // The thread prefix participates in the dedup key, so the same text
    // reported under two identities produces two entries.
    assert!(logger.log_error("timeout", DisplayPolicy::Never).is_new);
    assert!(logger.log_error("timeout", DisplayPolicy::Never).is_new);
    assert_eq!(logger.remembered(), 2);

    let lines = error_sink.lines();
    assert!(lines[2].starts_with("Thread worker-1(1)\n"));
    assert!(lines[6].starts_with("Thread worker-2(2)\n"));
}

#[test]
fn test_new_error_mirrored_to_debug_log() {
    let s = setup();
    s.logger.log_error("disk full", DisplayPolicy::Never);
    s.logger.log_error("disk full", DisplayPolicy::Never);

    let debug_lines = s.debug_sink.lines();
    assert_eq!(debug_lines.len(), 1);
    assert!(debug_lines[0].contains("Unhandled error"));
    assert!(debug_lines[0].contains("disk full"));
}

#[test]
fn test_display_policies() {
    let s = setup();

    s.logger.log_error("a", DisplayPolicy::Always);
    s.logger.log_error("a", DisplayPolicy::Always);
    assert_eq!(s.notifier.presented().len(), 2);

    s.logger.log_error("b", DisplayPolicy::OnlyIfLogged);
    s.logger.log_error("b", DisplayPolicy::OnlyIfLogged);
    assert_eq!(s.notifier.presented().len(), 3);

    s.logger.log_error("c", DisplayPolicy::Never);
    assert_eq!(s.notifier.presented().len(), 3);
}

#[test]
fn test_notification_names_app_and_log() {
    let s = setup();
    s.logger.log_error("disk full", DisplayPolicy::Always);

    let shown = s.notifier.presented();
    assert_eq!(shown[0].0, "Demo - Error");
    assert!(shown[0].1.contains("'Demo.err'"));
    assert!(shown[0].1.contains("disk full"));
}

#[test]
fn test_concurrent_duplicates_logged_once() {
    let s = setup();
    let logger = Arc::new(s.logger);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    logger.log_error("contended failure", DisplayPolicy::Never);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // One block of four lines regardless of contention
    assert_eq!(s.error_sink.lines().len(), 4);
    assert_eq!(logger.remembered(), 1);
}
