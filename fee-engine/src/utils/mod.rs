//! Shared helpers: logging setup and input validation

pub mod logger;
pub mod validation;

pub use logger::{cleanup_old_logs, init_logger_with_file};
pub use validation::{
    validate_amount, validate_rate, validate_state, validate_target_margin, validate_volume,
};
