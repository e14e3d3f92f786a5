//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for tool-path planning,
//! parameter validation, and program export.

use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A parameter is non-numeric, negative, or outside its domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),

    /// The parameters are individually valid but leave no room for a pass.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Export was requested before any program was generated.
    #[error("No G-code program has been generated yet; generate first")]
    NoProgramGenerated,

    /// I/O error while exporting a program.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CamToolError {
    /// Check if this error was caused by user input
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            CamToolError::InvalidParameter(_) | CamToolError::DegenerateGeometry(_)
        )
    }
}

/// Errors related to CAM tool parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter is NaN or infinite (typically an unparsable input field).
    #[error("Parameter '{name}' is not a number: {value}")]
    NotFinite { name: String, value: f64 },

    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Parameters are mutually incompatible.
    #[error("Incompatible parameters: {0}")]
    Incompatible(String),

    /// Travel direction is not one of the machine axes a groove can follow.
    #[error("Unknown travel direction '{0}' (expected X or Y)")]
    UnknownDirection(String),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

/// Reject NaN and infinite values.
pub(crate) fn require_finite(name: &str, value: f64) -> ParameterResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::NotFinite {
            name: name.to_string(),
            value,
        })
    }
}

/// Require a finite value strictly greater than zero.
pub(crate) fn require_positive(name: &str, value: f64) -> ParameterResult<f64> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::InvalidValue {
            name: name.to_string(),
            reason: format!("must be greater than zero, got {}", value),
        })
    }
}

/// Require a finite value greater than or equal to zero.
pub(crate) fn require_non_negative(name: &str, value: f64) -> ParameterResult<f64> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::InvalidValue {
            name: name.to_string(),
            reason: format!("must not be negative, got {}", value),
        })
    }
}

/// Require a finite value within `min..=max`.
pub(crate) fn require_in_range(
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) -> ParameterResult<f64> {
    require_finite(name, value)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ParameterError::OutOfRange {
            name: name.to_string(),
            value,
            min,
            max,
        })
    }
}
