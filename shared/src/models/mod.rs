//! Data models
//!
//! Plain serde types shared between the fee engine, its store and any
//! frontend. Field names serialize in camelCase to match the browser's
//! persisted JSON.

pub mod calculator;
pub mod client;
pub mod platform;
pub mod simulation;

// Re-exports
pub use calculator::*;
pub use client::*;
pub use platform::*;
pub use simulation::*;
