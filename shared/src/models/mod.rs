//! Data models
//!
//! Shared between the engine and the presentation layer.
//! Timestamps are `i64` Unix millis; ids are strings.

pub mod employee;
pub mod event;
pub mod lead;
pub mod session;

// Re-exports
pub use employee::*;
pub use event::*;
pub use lead::*;
pub use session::*;
