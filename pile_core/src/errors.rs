//! # Error Types
//!
//! Structured error types for pile_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! Capacity shortfalls (no depth meets the requirement, buckling risk,
//! settlement risk) are *not* errors. They are reported as
//! [`DesignWarning`](crate::warnings::DesignWarning)s on the result.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::errors::{CalcError, CalcResult};
//!
//! fn validate_unit_weight(gamma_pcf: f64) -> CalcResult<()> {
//!     if gamma_pcf <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "unit_weight_pcf".to_string(),
//!             value: gamma_pcf.to_string(),
//!             reason: "Unit weight must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pile_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for design operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Foundation element geometry or structural spec is unusable
    #[error("Configuration error in {component}: {reason}")]
    Configuration { component: String, reason: String },

    /// An operation needed at least one soil layer
    #[error("Soil profile is empty - insert at least one layer")]
    EmptyProfile,

    /// A layer was inserted at or above the current deepest layer
    #[error("Layer depth {depth_ft} ft must be deeper than the current deepest layer top at {tail_depth_ft} ft")]
    Ordering { depth_ft: f64, tail_depth_ft: f64 },

    /// No layer in the profile can serve as a bearing medium at the required capacity
    #[error("No suitable bearing medium: {reason}")]
    NoSuitableBearingMedium { reason: String },

    /// An iterative solver ran out of iterations
    #[error("{solver} did not converge after {iterations} iterations: {reason}")]
    Convergence {
        solver: String,
        iterations: usize,
        reason: String,
    },

    /// Calculation failed (degenerate geometry, zero thrust, etc.)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a Configuration error
    pub fn configuration(component: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Configuration {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Create an Ordering error
    pub fn ordering(depth_ft: f64, tail_depth_ft: f64) -> Self {
        CalcError::Ordering {
            depth_ft,
            tail_depth_ft,
        }
    }

    /// Create a NoSuitableBearingMedium error
    pub fn no_suitable_bearing(reason: impl Into<String>) -> Self {
        CalcError::NoSuitableBearingMedium {
            reason: reason.into(),
        }
    }

    /// Create a Convergence error
    pub fn convergence(solver: impl Into<String>, iterations: usize, reason: impl Into<String>) -> Self {
        CalcError::Convergence {
            solver: solver.into(),
            iterations,
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error comes from malformed soil profile construction
    pub fn is_profile_error(&self) -> bool {
        matches!(self, CalcError::EmptyProfile | CalcError::Ordering { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::Configuration { .. } => "CONFIGURATION_ERROR",
            CalcError::EmptyProfile => "EMPTY_PROFILE",
            CalcError::Ordering { .. } => "ORDERING_ERROR",
            CalcError::NoSuitableBearingMedium { .. } => "NO_SUITABLE_BEARING_MEDIUM",
            CalcError::Convergence { .. } => "CONVERGENCE_ERROR",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("unit_weight_pcf", "-5.0", "Unit weight must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::EmptyProfile.error_code(), "EMPTY_PROFILE");
        assert_eq!(
            CalcError::convergence("embedment", 10, "stalled").error_code(),
            "CONVERGENCE_ERROR"
        );
    }

    #[test]
    fn test_profile_errors() {
        assert!(CalcError::ordering(5.0, 10.0).is_profile_error());
        assert!(CalcError::EmptyProfile.is_profile_error());
        assert!(!CalcError::configuration("plates", "bad").is_profile_error());
    }

    #[test]
    fn test_ordering_message() {
        let msg = CalcError::ordering(5.0, 10.0).to_string();
        assert!(msg.contains("5 ft"));
        assert!(msg.contains("10 ft"));
    }
}
