//! Domain layer - pure logic with no external collaborators.
//!
//! This layer contains the core rules of the toolkit:
//! - ASCII-safe value rendering
//! - Remembered error entries and their aging
//! - Display and severity policies
//! - Stack-frame filtering and collapsing
//! - Elapsed-time aggregation windows
//!
//! All types in this layer are pure and easily testable.

pub mod ascii;
pub mod entry;
pub mod policy;
pub mod stack;
pub mod window;
