//! Shared types for the lead console
//!
//! Domain models and the unified error-code system used by the engine and
//! by whatever presentation layer renders it.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
