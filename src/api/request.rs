//! Request types for the FieldTrack API.
//!
//! JSON bodies for the ledger and registration endpoints, and query
//! parameter structures for the read endpoints. Dates cross this boundary
//! as `YYYY-MM-DD` calendar dates, inclusive on both ends; the server
//! assigns all clock timestamps itself.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CompanyId, EmployeeId, SiteId};

/// Request body for `POST /clock-in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockInRequest {
    /// The trusted employee identity supplied by the excluded auth layer.
    pub employee_id: EmployeeId,
    /// The job site to start the shift at.
    pub site_id: SiteId,
}

/// Request body for `POST /switch-site`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchSiteRequest {
    /// The trusted employee identity.
    pub employee_id: EmployeeId,
    /// The job site to move to.
    pub site_id: SiteId,
}

/// Request body for `POST /clock-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockOutRequest {
    /// The trusted employee identity.
    pub employee_id: EmployeeId,
}

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// The organizational scope the employee belongs to.
    pub company_id: CompanyId,
    /// Display name used in payroll rows.
    pub name: String,
    /// Hourly rate; must be non-negative.
    pub hourly_rate: Decimal,
}

/// Request body for `POST /sites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSiteRequest {
    /// The organizational scope the site belongs to.
    pub company_id: CompanyId,
    /// Display name of the site.
    pub name: String,
    /// Optional street address.
    #[serde(default)]
    pub address: Option<String>,
}

/// Query parameters for `GET /today-segments/{employee_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DayQuery {
    /// The reference date; defaults to today (UTC) when omitted.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query parameters for `GET /hours/{employee_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeQuery {
    /// The start date of the range (inclusive).
    pub start: NaiveDate,
    /// The end date of the range (inclusive).
    pub end: NaiveDate,
}

/// Query parameters for `GET /payroll` and `GET /payroll-summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollQuery {
    /// The start date of the range (inclusive).
    pub start: NaiveDate,
    /// The end date of the range (inclusive).
    pub end: NaiveDate,
    /// Comma-separated employee ids (e.g. `employee_ids=1,2,3`).
    pub employee_ids: String,
    /// Optional tax-rate override for `/payroll-summary`; defaults to the
    /// configured rate.
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
}

/// Query parameters for `GET /active-now`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyQuery {
    /// The trusted organizational scope of the caller.
    pub company_id: CompanyId,
}

/// Query parameters for `GET /report`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    /// The trusted organizational scope of the caller.
    pub company_id: CompanyId,
    /// The start date of the range (inclusive).
    pub start: NaiveDate,
    /// The end date of the range (inclusive).
    pub end: NaiveDate,
}

impl PayrollQuery {
    /// Parses the comma-separated employee id list.
    ///
    /// Returns `None` when any entry fails to parse as an integer id.
    pub fn parse_employee_ids(&self) -> Option<Vec<EmployeeId>> {
        self.employee_ids
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<EmployeeId>().ok())
            .collect()
    }
}
