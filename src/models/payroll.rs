//! Payroll report and summary models.
//!
//! These are the output types of the aggregation and reporting paths.
//! All monetary amounts and hour figures they carry are already rounded
//! to 2 decimal places for presentation; aggregation accumulates full
//! precision internally and rounds once, here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EmployeeId, PayPeriod};

/// Hours and gross pay for one employee over a pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// The employee this row belongs to.
    pub employee_id: EmployeeId,
    /// The employee's display name.
    pub name: String,
    /// Total closed-segment hours in the period, rounded to 2 dp.
    pub hours: f64,
    /// The employee's current hourly rate.
    pub hourly_rate: Decimal,
    /// Gross pay (hours × rate), rounded to 2 dp.
    pub gross_pay: Decimal,
}

/// Grand totals across all employees of a payroll report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Sum of per-employee hours, rounded to 2 dp after summation.
    pub hours: f64,
    /// Sum of per-employee gross pay, rounded to 2 dp after summation.
    pub gross_pay: Decimal,
}

/// Per-employee payroll rows plus grand totals for a pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// The period the report covers.
    pub period: PayPeriod,
    /// One row per resolved employee, ordered by employee id.
    pub lines: Vec<PayrollLine>,
    /// Grand totals across all rows.
    pub totals: PayrollTotals,
}

/// One employee's row in a payroll summary, including the estimated tax
/// deduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    /// The employee this row belongs to.
    pub employee_id: EmployeeId,
    /// The employee's display name.
    pub name: String,
    /// Total closed-segment hours in the period, rounded to 2 dp.
    pub hours: f64,
    /// The employee's current hourly rate.
    pub hourly_rate: Decimal,
    /// Gross pay before deductions.
    pub gross_pay: Decimal,
    /// Estimated tax (gross × tax rate).
    pub tax: Decimal,
    /// Net pay (gross − tax).
    pub net_pay: Decimal,
}

/// Company-wide totals of a payroll summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    /// Sum of per-employee hours.
    pub hours: f64,
    /// Sum of per-employee gross pay.
    pub gross_pay: Decimal,
    /// Sum of per-employee estimated tax.
    pub tax: Decimal,
    /// Sum of per-employee net pay.
    pub net_pay: Decimal,
}

/// A complete payroll summary: per-employee rows with tax/net plus
/// company totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Unique identifier of this generated report.
    pub report_id: Uuid,
    /// When the report was generated (UTC).
    pub generated_at: DateTime<Utc>,
    /// The period the summary covers.
    pub period: PayPeriod,
    /// The flat estimated tax rate applied to every row.
    pub tax_rate: Decimal,
    /// One row per resolved employee, ordered by employee id.
    pub lines: Vec<SummaryLine>,
    /// Company-wide totals across all rows.
    pub totals: SummaryTotals,
}
