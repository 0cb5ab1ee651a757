//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the domain rules through injected collaborators:
//! - Duplicate cache (time-windowed suppression state)
//! - Error logger (suppression + sink + display policy)
//! - Debug logger (severity-filtered entries, stack/thread dumps)
//! - Timed logger (periodic aggregation summaries)
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod debug_log;
pub mod dedup;
pub mod error_log;
pub mod ports;
pub mod timing;
