//! # Error Types
//!
//! Structured error types for cost_core. Validation failures carry the name of
//! the offending input field so a form can show the message next to it.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::errors::{CostError, CostResult};
//!
//! fn validate_floors(floors: i64) -> CostResult<()> {
//!     if floors < 1 {
//!         return Err(CostError::invalid_input(
//!             "floors",
//!             floors.to_string(),
//!             "Number of floors must be at least 1",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_floors(0).unwrap_err();
//! assert_eq!(err.field(), Some("floors"));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cost_core operations
pub type CostResult<T> = Result<T, CostError>;

/// Structured error type for estimation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CostError {
    /// An input value is invalid (not a number, out of range, empty, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// No unit cost is known for the material.
    ///
    /// Validation should make this unreachable from user input; seeing it
    /// means the rate table and the material list are out of sync.
    #[error("Unknown material: {material}")]
    UnknownMaterial { material: String },

    /// A rate table violates its invariants
    #[error("Invalid rate table: {reason}")]
    InvalidRates { reason: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },

    /// Printable report could not be produced
    #[error("Report generation failed: {reason}")]
    ReportFailed { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CostError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CostError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CostError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownMaterial error
    pub fn unknown_material(material: impl Into<String>) -> Self {
        CostError::UnknownMaterial {
            material: material.into(),
        }
    }

    /// Create an InvalidRates error
    pub fn invalid_rates(reason: impl Into<String>) -> Self {
        CostError::InvalidRates {
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CostError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ReportFailed error
    pub fn report_failed(reason: impl Into<String>) -> Self {
        CostError::ReportFailed {
            reason: reason.into(),
        }
    }

    /// True for user-correctable input problems (the ValidationError class).
    pub fn is_validation(&self) -> bool {
        matches!(self, CostError::InvalidInput { .. } | CostError::MissingField { .. })
    }

    /// Name of the input field this error belongs to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CostError::InvalidInput { field, .. } | CostError::MissingField { field } => Some(field),
            _ => None,
        }
    }

    /// Human-readable reason suitable for display next to a form field
    pub fn reason(&self) -> String {
        match self {
            CostError::InvalidInput { reason, .. } => reason.clone(),
            CostError::MissingField { .. } => "This field is required".to_string(),
            other => other.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CostError::InvalidInput { .. } => "INVALID_INPUT",
            CostError::MissingField { .. } => "MISSING_FIELD",
            CostError::UnknownMaterial { .. } => "UNKNOWN_MATERIAL",
            CostError::InvalidRates { .. } => "INVALID_RATES",
            CostError::ConfigError { .. } => "CONFIG_ERROR",
            CostError::ReportFailed { .. } => "REPORT_FAILED",
            CostError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
