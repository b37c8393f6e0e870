//! Payroll summary with estimated tax.
//!
//! A stateless transform over the aggregator: per-employee gross pay, a
//! flat estimated-tax deduction, and net pay, plus company-wide totals.
//! The tax rate is configuration (default 0.22), an estimate rather than
//! a legal computation.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{EmployeeId, PayPeriod, PayrollSummary, SummaryLine, SummaryTotals};
use crate::store::MemoryStore;

use super::aggregate::{closed_seconds, hours_from_seconds, pay_from_seconds, round_hours};

/// Builds a payroll summary for a set of employees over a period.
///
/// For each employee: `gross = hours × rate`, `tax = gross × tax_rate`,
/// `net = gross − tax`, each rounded to 2 decimal places from the
/// full-precision figure. Unknown employee ids are skipped rather than
/// failing the report (same policy as
/// [`compute_for_many`](super::compute_for_many)); totals accumulate full
/// precision across all rows before rounding.
///
/// # Example
///
/// ```
/// use fieldtrack::models::PayPeriod;
/// use fieldtrack::reporting::build_payroll_summary;
/// use fieldtrack::store::MemoryStore;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let store = MemoryStore::new();
/// let employee = store.register_employee(1, "Field Employee", Decimal::new(2550, 2));
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
/// ).unwrap();
///
/// let summary = build_payroll_summary(&store, &[employee.id], period, Decimal::new(22, 2)).unwrap();
/// assert_eq!(summary.lines.len(), 1);
/// assert_eq!(summary.totals.gross_pay, Decimal::ZERO.round_dp(2));
/// ```
pub fn build_payroll_summary(
    store: &MemoryStore,
    employee_ids: &[EmployeeId],
    period: PayPeriod,
    tax_rate: Decimal,
) -> EngineResult<PayrollSummary> {
    store.read(|s| {
        let mut ids: Vec<EmployeeId> = employee_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut lines = Vec::with_capacity(ids.len());
        let mut total_seconds: i64 = 0;
        let mut total_gross = Decimal::ZERO;
        let mut total_tax = Decimal::ZERO;

        for employee_id in ids {
            let Some(employee) = s.employee(employee_id) else {
                continue;
            };
            let seconds = closed_seconds(s, employee_id, period);
            let gross = pay_from_seconds(seconds, employee.hourly_rate);
            let tax = gross * tax_rate;

            total_seconds += seconds;
            total_gross += gross;
            total_tax += tax;

            lines.push(SummaryLine {
                employee_id,
                name: employee.name.clone(),
                hours: round_hours(hours_from_seconds(seconds)),
                hourly_rate: employee.hourly_rate,
                gross_pay: gross.round_dp(2),
                tax: tax.round_dp(2),
                net_pay: (gross - tax).round_dp(2),
            });
        }

        Ok(PayrollSummary {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            period,
            tax_rate,
            lines,
            totals: SummaryTotals {
                hours: round_hours(hours_from_seconds(total_seconds)),
                gross_pay: total_gross.round_dp(2),
                tax: total_tax.round_dp(2),
                net_pay: (total_gross - total_tax).round_dp(2),
            },
        })
    })
}
