//! Unified error codes for the GPS calculator
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Platform catalog errors
//! - 2xxx: Simulation / planning scenario errors
//! - 3xxx: Client and ad metrics errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they serialize compactly
/// and can be shared with a frontend unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Catalog ====================
    /// Platform id not present in the catalog
    PlatformNotFound = 1001,
    /// Catalog has no platforms
    CatalogEmpty = 1002,
    /// Catalog file could not be parsed
    CatalogInvalid = 1003,
    /// Two catalog entries share an id
    DuplicatePlatform = 1004,

    // ==================== 2xxx: Simulation ====================
    /// Saved simulation not found
    SimulationNotFound = 2001,
    /// Planning scenario not found
    ScenarioNotFound = 2002,
    /// Product name is required to save
    ProductNameRequired = 2003,

    // ==================== 3xxx: Metrics ====================
    /// Client not found
    ClientNotFound = 3001,
    /// Client name is required
    ClientNameRequired = 3002,
    /// Weekly metric entry is incomplete or invalid
    MetricInvalid = 3003,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    StorageError = 9002,
    ConfigError = 9005,

    // ==================== 94xx: Storage ====================
    StorageCorrupted = 9403,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Catalog
            ErrorCode::PlatformNotFound => "Platform not found",
            ErrorCode::CatalogEmpty => "Platform catalog is empty",
            ErrorCode::CatalogInvalid => "Platform catalog is invalid",
            ErrorCode::DuplicatePlatform => "Platform id is duplicated in the catalog",

            // Simulation
            ErrorCode::SimulationNotFound => "Simulation not found",
            ErrorCode::ScenarioNotFound => "Planning scenario not found",
            ErrorCode::ProductNameRequired => "Product name is required",

            // Metrics
            ErrorCode::ClientNotFound => "Client not found",
            ErrorCode::ClientNameRequired => "Client name is required",
            ErrorCode::MetricInvalid => "Weekly metric is invalid",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageCorrupted => "Stored data is corrupted",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Catalog
            1001 => Ok(ErrorCode::PlatformNotFound),
            1002 => Ok(ErrorCode::CatalogEmpty),
            1003 => Ok(ErrorCode::CatalogInvalid),
            1004 => Ok(ErrorCode::DuplicatePlatform),

            // Simulation
            2001 => Ok(ErrorCode::SimulationNotFound),
            2002 => Ok(ErrorCode::ScenarioNotFound),
            2003 => Ok(ErrorCode::ProductNameRequired),

            // Metrics
            3001 => Ok(ErrorCode::ClientNotFound),
            3002 => Ok(ErrorCode::ClientNameRequired),
            3003 => Ok(ErrorCode::MetricInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9005 => Ok(ErrorCode::ConfigError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
