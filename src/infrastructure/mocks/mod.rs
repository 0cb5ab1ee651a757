//! Mock adapters for testing.
//!
//! These doubles stand in for the real infrastructure so tests can control
//! time, observe log output, and intercept notifications without touching
//! the filesystem or the user's desktop. They are available to downstream
//! crates through the `test-helpers` feature.

pub mod clock;
pub mod layer;
pub mod notifier;
pub mod sink;

pub use clock::MockClock;
pub use layer::{CapturedEvent, MockCaptureLayer};
pub use notifier::MockNotifier;
pub use sink::MockSink;
