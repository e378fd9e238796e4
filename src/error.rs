//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading agreement
//! configuration or calculating pay.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use convenio_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Category code was not found in the configuration.
    #[error("Category not found: {code}")]
    CategoryNotFound {
        /// The category code that was not found.
        code: String,
    },

    /// No constants snapshot is effective for the given period.
    #[error("No agreement constants effective for period {period}")]
    RatesNotFound {
        /// The period for which constants were requested.
        period: NaiveDate,
    },

    /// A percentage rate in the configuration was outside [0, 1].
    #[error("Invalid rate for '{field}': {value} is outside [0, 1]")]
    InvalidRate {
        /// The configuration field holding the rate.
        field: String,
        /// The offending value.
        value: String,
    },

    /// A fixed amount or divisor in the configuration was out of range.
    #[error("Invalid amount for '{field}': {value}")]
    InvalidAmount {
        /// The configuration field holding the amount.
        field: String,
        /// The offending value.
        value: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
