//! Error types and response envelope

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Carries a standardized [`ErrorCode`], a human-readable message and
/// optional structured details (field names, offending ids, ...).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Platform id missing from the catalog
    pub fn platform_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(ErrorCode::PlatformNotFound, format!("Platform {} not found", id))
            .with_detail("platform_id", id)
    }

    /// Saved simulation missing from history
    pub fn simulation_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(
            ErrorCode::SimulationNotFound,
            format!("Simulation {} not found", id),
        )
        .with_detail("id", id)
    }

    /// Planning scenario missing from storage
    pub fn scenario_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(
            ErrorCode::ScenarioNotFound,
            format!("Planning scenario {} not found", id),
        )
        .with_detail("id", id)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }
}

/// Unified response envelope
///
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(ErrorCode::Success.code()),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message() {
        let err = AppError::new(ErrorCode::ProductNameRequired);
        assert_eq!(err.message, "Product name is required");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_with_detail() {
        let err = AppError::validation("sale price must be finite").with_detail("field", "salePrice");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details["field"], "salePrice");
    }

    #[test]
    fn test_platform_not_found() {
        let err = AppError::platform_not_found("ebay");
        assert_eq!(err.code, ErrorCode::PlatformNotFound);
        assert_eq!(err.to_string(), "Platform ebay not found");
    }

    #[test]
    fn test_error_response_shape() {
        let err = AppError::scenario_not_found("abc");
        let response = ApiResponse::<()>::error(&err);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 2002);
        assert_eq!(json["details"]["id"], "abc");
        assert!(json.get("data").is_none());
    }
}
