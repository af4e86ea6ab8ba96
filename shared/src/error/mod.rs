//! Unified error system for the GPS calculator
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified response envelope (used by `--json` output)
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Platform catalog errors
//! - 2xxx: Simulation / planning errors
//! - 3xxx: Client and ad metrics errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::PlatformNotFound);
//!
//! let err = AppError::validation("Product name must not be empty")
//!     .with_detail("field", "productName");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(2));
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
