//! Error types for the FieldTrack engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions in the clock ledger, readers, and reporters.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the FieldTrack engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. Every
/// variant is a local, synchronous failure: either caller misuse
/// (recoverable by correcting input) or genuine data corruption
/// (surfaced, never silently patched).
///
/// # Example
///
/// ```
/// use fieldtrack::error::EngineError;
///
/// let error = EngineError::AlreadyClockedIn { employee_id: 7 };
/// assert_eq!(error.to_string(), "Employee 7 is already clocked in");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A clock-in was attempted while the employee already has an open shift.
    #[error("Employee {employee_id} is already clocked in")]
    AlreadyClockedIn {
        /// The employee that attempted the clock-in.
        employee_id: i64,
    },

    /// A switch or clock-out was attempted while the employee has no open shift.
    #[error("Employee {employee_id} is not clocked in")]
    NotClockedIn {
        /// The employee that attempted the operation.
        employee_id: i64,
    },

    /// The referenced job site is unknown, inactive, or out of the caller's
    /// organizational scope.
    #[error("Invalid job site: {site_id}")]
    InvalidSite {
        /// The job site id that failed validation.
        site_id: i64,
    },

    /// The referenced employee is unknown or inactive.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that failed resolution.
        employee_id: i64,
    },

    /// Ledger state violated an invariant (e.g. an open shift with no open
    /// segment). Indicates a bug, not caller error.
    #[error("Ledger integrity violation: {message}")]
    IntegrityViolation {
        /// A description of the violated invariant.
        message: String,
    },

    /// A date range had its end before its start.
    #[error("Invalid date range: {start} to {end}")]
    InvalidRange {
        /// The start date of the rejected range.
        start: NaiveDate,
        /// The end date of the rejected range.
        end: NaiveDate,
    },

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
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
