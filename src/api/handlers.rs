//! HTTP request handlers for the FieldTrack API.
//!
//! This module contains the handler functions for all endpoints. Every
//! clock timestamp is server-assigned here (`Utc::now()`); callers never
//! supply their own.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{EmployeeId, PayPeriod, SiteId};
use crate::reporting::{
    build_payroll_summary, compute_for_many, compute_hours, round_hours, segment_report,
};
use crate::tracking::{
    active_now, clock_in, clock_out, day_segments, employee_status, shift_history, switch_site,
};

use super::request::{
    ClockInRequest, ClockOutRequest, CompanyQuery, CreateEmployeeRequest, CreateSiteRequest,
    DayQuery, PayrollQuery, RangeQuery, ReportQuery, SwitchSiteRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, ClockInResponse, HoursResponse, OkResponse, ShiftsResponse,
    StatusResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/clock-in", post(clock_in_handler))
        .route("/switch-site", post(switch_site_handler))
        .route("/clock-out", post(clock_out_handler))
        .route("/status/:employee_id", get(status_handler))
        .route("/today-segments/:employee_id", get(today_segments_handler))
        .route("/hours/:employee_id", get(hours_handler))
        .route("/payroll", get(payroll_handler))
        .route("/payroll-summary", get(payroll_summary_handler))
        .route("/shifts/:employee_id", get(shifts_handler))
        .route("/report", get(report_handler))
        .route("/active-now", get(active_now_handler))
        .route("/employees", post(create_employee_handler))
        .route("/employees/:employee_id", delete(deactivate_employee_handler))
        .route("/sites", post(create_site_handler))
        .route("/sites/:site_id", delete(deactivate_site_handler))
        .with_state(state)
}

/// Unpacks a JSON body, turning extraction rejections into API errors.
fn unpack_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response())
        }
    }
}

/// Unpacks a query string, turning extraction rejections into the same
/// JSON error envelope bodies get (never axum's plain-text response).
fn unpack_query<T>(
    query: Result<Query<T>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match query {
        Ok(Query(query)) => Ok(query),
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Query string rejected"
            );
            Err((
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiError::validation_error(body_text)),
            )
                .into_response())
        }
    }
}

/// Handler for `POST /clock-in`.
async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockInRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match unpack_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let now = Utc::now().naive_utc();
    match clock_in(state.store(), request.employee_id, request.site_id, now) {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = request.employee_id,
                site_id = request.site_id,
                shift_id = outcome.shift_id,
                "Employee clocked in"
            );
            Json(ClockInResponse {
                ok: true,
                shift_id: outcome.shift_id,
            })
            .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = request.employee_id,
                error = %err,
                "Clock-in rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /switch-site`.
async fn switch_site_handler(
    State(state): State<AppState>,
    payload: Result<Json<SwitchSiteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match unpack_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let now = Utc::now().naive_utc();
    match switch_site(state.store(), request.employee_id, request.site_id, now) {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = request.employee_id,
                site_id = request.site_id,
                shift_id = outcome.shift_id,
                "Employee switched site"
            );
            Json(OkResponse::new()).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = request.employee_id,
                error = %err,
                "Site switch rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /clock-out`.
async fn clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockOutRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match unpack_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let now = Utc::now().naive_utc();
    match clock_out(state.store(), request.employee_id, now) {
        Ok(shift_id) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = request.employee_id,
                shift_id,
                "Employee clocked out"
            );
            Json(OkResponse::new()).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = request.employee_id,
                error = %err,
                "Clock-out rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /status/{employee_id}`.
async fn status_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
) -> Response {
    match employee_status(state.store(), employee_id) {
        Ok(status) => Json(StatusResponse::from(status)).into_response(),
        Err(err) => {
            warn!(employee_id, error = %err, "Status lookup failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /today-segments/{employee_id}`.
async fn today_segments_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match unpack_query(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let reference_date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    match day_segments(state.store(), employee_id, reference_date) {
        Ok(views) => Json(views).into_response(),
        Err(err) => {
            warn!(employee_id, error = %err, "Day segments lookup failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /hours/{employee_id}`.
async fn hours_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match unpack_query(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let period = match PayPeriod::new(query.start, query.end) {
        Ok(period) => period,
        Err(err) => return ApiErrorResponse::from(err).into_response(),
    };

    match compute_hours(state.store(), employee_id, period) {
        Ok(hours) => Json(HoursResponse {
            employee_id,
            hours: round_hours(hours),
        })
        .into_response(),
        Err(err) => {
            warn!(employee_id, error = %err, "Hours computation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /payroll`.
async fn payroll_handler(
    State(state): State<AppState>,
    query: Result<Query<PayrollQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match unpack_query(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let Some(employee_ids) = query.parse_employee_ids() else {
        return ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error("employee_ids must be a comma-separated id list"),
        }
        .into_response();
    };

    let period = match PayPeriod::new(query.start, query.end) {
        Ok(period) => period,
        Err(err) => return ApiErrorResponse::from(err).into_response(),
    };

    let start_time = Instant::now();
    match compute_for_many(state.store(), &employee_ids, period) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employees = report.lines.len(),
                total_hours = report.totals.hours,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll report generated"
            );
            Json(report).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Payroll report failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /payroll-summary`.
async fn payroll_summary_handler(
    State(state): State<AppState>,
    query: Result<Query<PayrollQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match unpack_query(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let Some(employee_ids) = query.parse_employee_ids() else {
        return ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error("employee_ids must be a comma-separated id list"),
        }
        .into_response();
    };

    let period = match PayPeriod::new(query.start, query.end) {
        Ok(period) => period,
        Err(err) => return ApiErrorResponse::from(err).into_response(),
    };

    let tax_rate = query.tax_rate.unwrap_or(state.config().tax_rate);
    let start_time = Instant::now();
    match build_payroll_summary(state.store(), &employee_ids, period, tax_rate) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                report_id = %summary.report_id,
                employees = summary.lines.len(),
                gross_pay = %summary.totals.gross_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll summary generated"
            );
            Json(summary).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Payroll summary failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /shifts/{employee_id}` (shift history).
async fn shifts_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match unpack_query(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let period = match PayPeriod::new(query.start, query.end) {
        Ok(period) => period,
        Err(err) => return ApiErrorResponse::from(err).into_response(),
    };

    let now = Utc::now().naive_utc();
    match shift_history(state.store(), employee_id, period, now) {
        Ok(shifts) => Json(ShiftsResponse { shifts }).into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id,
                error = %err,
                "Shift history lookup failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /report` (per-segment cost report).
async fn report_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match unpack_query(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let period = match PayPeriod::new(query.start, query.end) {
        Ok(period) => period,
        Err(err) => return ApiErrorResponse::from(err).into_response(),
    };

    let start_time = Instant::now();
    match segment_report(state.store(), query.company_id, period) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                company_id = query.company_id,
                segments = report.rows.len(),
                total_hours = report.totals.hours,
                duration_us = start_time.elapsed().as_micros(),
                "Segment report generated"
            );
            Json(report).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                company_id = query.company_id,
                error = %err,
                "Segment report failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /active-now` (company live view).
async fn active_now_handler(
    State(state): State<AppState>,
    query: Result<Query<CompanyQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match unpack_query(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match active_now(state.store(), query.company_id) {
        Ok(workers) => Json(workers).into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                company_id = query.company_id,
                error = %err,
                "Active-now lookup failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /employees`.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match unpack_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let name = request.name.trim();
    if name.is_empty() {
        return ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error("Employee name required"),
        }
        .into_response();
    }
    if request.hourly_rate.is_sign_negative() {
        return ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error("Hourly rate must be non-negative"),
        }
        .into_response();
    }

    let employee = state
        .store()
        .register_employee(request.company_id, name, request.hourly_rate);
    info!(
        correlation_id = %correlation_id,
        employee_id = employee.id,
        company_id = employee.company_id,
        "Employee registered"
    );
    (StatusCode::CREATED, Json(employee)).into_response()
}

/// Handler for `DELETE /employees/{employee_id}` (soft deactivation).
async fn deactivate_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
) -> Response {
    match state.store().deactivate_employee(employee_id) {
        Ok(()) => Json(OkResponse::new()).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for `POST /sites`.
async fn create_site_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateSiteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match unpack_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let name = request.name.trim();
    if name.is_empty() {
        return ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error("Site name required"),
        }
        .into_response();
    }

    let site = state
        .store()
        .register_site(request.company_id, name, request.address);
    info!(
        correlation_id = %correlation_id,
        site_id = site.id,
        company_id = site.company_id,
        "Job site registered"
    );
    (StatusCode::CREATED, Json(site)).into_response()
}

/// Handler for `DELETE /sites/{site_id}` (soft deactivation).
async fn deactivate_site_handler(
    State(state): State<AppState>,
    Path(site_id): Path<SiteId>,
) -> Response {
    match state.store().deactivate_site(site_id) {
        Ok(()) => Json(OkResponse::new()).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}
