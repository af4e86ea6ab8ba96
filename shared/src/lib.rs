//! Shared types for the GPS marketplace calculator
//!
//! Models, error types and small utilities used by the fee engine crate and
//! by anything that reads its persisted JSON.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
