//! Response types for the FieldTrack API.
//!
//! This module defines the success bodies for the ledger and status
//! endpoints, plus the error response structure and the mapping from
//! engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{EmployeeId, ShiftId, SiteId};
use crate::tracking::{EmployeeStatus, ShiftView};

/// Response body for a successful `POST /clock-in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockInResponse {
    /// Always true on success.
    pub ok: bool,
    /// The newly opened shift.
    pub shift_id: ShiftId,
}

/// Generic acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    /// Always true on success.
    pub ok: bool,
}

impl OkResponse {
    /// The canonical success acknowledgement.
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for `GET /status/{employee_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Whether the employee currently has an open shift.
    pub clocked_in: bool,
    /// The open shift, when clocked in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<ShiftId>,
    /// Shift start time, when clocked in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<NaiveDateTime>,
    /// Current site id, when clocked in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<SiteId>,
    /// Current site name, when clocked in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
}

impl From<EmployeeStatus> for StatusResponse {
    fn from(status: EmployeeStatus) -> Self {
        match status {
            EmployeeStatus::ClockedOut => Self {
                clocked_in: false,
                shift_id: None,
                since: None,
                site_id: None,
                site_name: None,
            },
            EmployeeStatus::ClockedIn {
                shift_id,
                since,
                site_id,
                site_name,
            } => Self {
                clocked_in: true,
                shift_id: Some(shift_id),
                since: Some(since),
                site_id: Some(site_id),
                site_name: Some(site_name),
            },
        }
    }
}

/// Response body for `GET /hours/{employee_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursResponse {
    /// The employee the hours belong to.
    pub employee_id: EmployeeId,
    /// Total closed-segment hours in the range, rounded to 2 dp.
    pub hours: f64,
}

/// Response body for `GET /shifts/{employee_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftsResponse {
    /// The shifts in the requested range, newest first.
    pub shifts: Vec<ShiftView>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::AlreadyClockedIn { employee_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "ALREADY_CLOCKED_IN",
                    format!("Employee {} is already clocked in", employee_id),
                    "Clock out the open shift before starting a new one",
                ),
            },
            EngineError::NotClockedIn { employee_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "NOT_CLOCKED_IN",
                    format!("Employee {} is not clocked in", employee_id),
                    "The operation requires an open shift",
                ),
            },
            EngineError::InvalidSite { site_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SITE",
                    format!("Invalid job site: {}", site_id),
                    "The site is unknown, inactive, or outside the caller's company",
                ),
            },
            EngineError::EmployeeNotFound { employee_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "EMPLOYEE_NOT_FOUND",
                    format!("Employee not found: {}", employee_id),
                ),
            },
            EngineError::IntegrityViolation { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "INTEGRITY_VIOLATION",
                    "Ledger integrity violation",
                    message,
                ),
            },
            EngineError::InvalidRange { start, end } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "INVALID_RANGE",
                    format!("Invalid date range: {} to {}", start, end),
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}
