//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during schedule resolution,
//! payroll accrual and period aggregation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// All fallible operations in the engine return this error type, making it easy
/// to map failures onto validation messages in the hosting application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidCycle {
///     work_days: 0,
///     rest_days: 0,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid work cycle 0/0: cycle length must be between 1 and 4294967295 days"
/// );
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

    /// Configuration parsed but holds a value the engine cannot use.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A work cycle with no days, or more days than a `u32` can count.
    #[error("Invalid work cycle {work_days}/{rest_days}: cycle length must be between 1 and 4294967295 days")]
    InvalidCycle {
        /// The number of work days in the rejected cycle.
        work_days: u32,
        /// The number of rest days in the rejected cycle.
        rest_days: u32,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A date range could not be interpreted at the API boundary.
    #[error("Invalid date range: {message}")]
    InvalidRange {
        /// A description of what made the range invalid.
        message: String,
    },

    /// A monetary input carried an amount the engine cannot sum.
    #[error("Invalid {source_kind} amount: {message}")]
    InvalidAmount {
        /// The kind of record the amount came from (e.g. "transaction").
        source_kind: String,
        /// A description of what made the amount invalid.
        message: String,
    },

    /// The exception lookup collaborator could not answer.
    #[error("Exception lookup failed for employee '{employee_id}' on {date}: {message}")]
    LookupFailure {
        /// The employee whose exceptions were requested.
        employee_id: String,
        /// The date that was being classified.
        date: NaiveDate,
        /// A description of the underlying failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
