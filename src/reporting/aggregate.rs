//! Hours and pay aggregation.
//!
//! Payroll is computed only on completed time: an in-progress segment
//! contributes zero until it is closed. Segment membership in a range is
//! decided by the segment's start calendar date, so a segment starting at
//! 23:50 on the end date is included even if it runs past midnight.
//!
//! Durations accumulate as whole seconds and convert to fractional hours
//! (or decimal pay) exactly once at the end, never round-then-sum.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeId, PayPeriod, PayrollLine, PayrollReport, PayrollTotals};
use crate::store::{MemoryStore, StoreInner};

const SECONDS_PER_HOUR: i64 = 3600;

/// Sums the closed-segment seconds of an employee's shifts whose start
/// date falls within the period.
pub(crate) fn closed_seconds(
    inner: &StoreInner,
    employee_id: EmployeeId,
    period: PayPeriod,
) -> i64 {
    inner
        .employee_segments(employee_id)
        .into_iter()
        .filter(|segment| period.contains_date(segment.started_at.date()))
        .filter_map(|segment| segment.duration_seconds())
        .sum()
}

/// Converts whole seconds to fractional hours for presentation.
pub(crate) fn hours_from_seconds(seconds: i64) -> f64 {
    seconds as f64 / SECONDS_PER_HOUR as f64
}

/// Converts whole seconds to exact decimal hours for pay arithmetic.
pub(crate) fn decimal_hours_from_seconds(seconds: i64) -> Decimal {
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}

/// Prices whole worked seconds at an hourly rate, full precision.
///
/// Single definition of the gross-pay formula; every report path goes
/// through here so rounding policy stays a caller concern.
pub(crate) fn pay_from_seconds(seconds: i64, hourly_rate: Decimal) -> Decimal {
    decimal_hours_from_seconds(seconds) * hourly_rate
}

/// Rounds an hour figure to 2 decimal places for presentation.
pub(crate) fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Computes an employee's total closed-segment hours over a period.
///
/// Zero matching segments is a valid result of 0.0, not an error.
///
/// # Errors
///
/// - [`EngineError::EmployeeNotFound`] if the employee id is unknown.
///
/// # Example
///
/// ```
/// use fieldtrack::models::PayPeriod;
/// use fieldtrack::reporting::compute_hours;
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
/// assert_eq!(compute_hours(&store, employee.id, period).unwrap(), 0.0);
/// ```
pub fn compute_hours(
    store: &MemoryStore,
    employee_id: EmployeeId,
    period: PayPeriod,
) -> EngineResult<f64> {
    store.read(|s| {
        s.employee(employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })?;
        Ok(hours_from_seconds(closed_seconds(s, employee_id, period)))
    })
}

/// Computes an employee's gross pay over a period at the given hourly rate.
///
/// The rate is the employee's *current* rate at computation time; rates
/// are not versioned. The returned amount carries full precision; callers
/// round to 2 decimal places at presentation.
pub fn compute_pay(
    store: &MemoryStore,
    employee_id: EmployeeId,
    period: PayPeriod,
    hourly_rate: Decimal,
) -> EngineResult<Decimal> {
    store.read(|s| {
        s.employee(employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })?;
        let seconds = closed_seconds(s, employee_id, period);
        Ok(pay_from_seconds(seconds, hourly_rate))
    })
}

/// Computes hours and pay for a set of employees plus a grand total.
///
/// Rows are ordered by employee id for deterministic output. Unknown
/// employee ids are skipped rather than failing the whole report;
/// deactivated employees are included since their historical time is
/// still payable. Totals sum full-precision values before rounding.
pub fn compute_for_many(
    store: &MemoryStore,
    employee_ids: &[EmployeeId],
    period: PayPeriod,
) -> EngineResult<PayrollReport> {
    // One read scope so every row reflects the same ledger snapshot.
    store.read(|s| {
        let mut ids: Vec<EmployeeId> = employee_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut lines = Vec::with_capacity(ids.len());
        let mut total_seconds: i64 = 0;
        let mut total_pay = Decimal::ZERO;

        for employee_id in ids {
            let Some(employee) = s.employee(employee_id) else {
                continue;
            };
            let seconds = closed_seconds(s, employee_id, period);
            let gross = pay_from_seconds(seconds, employee.hourly_rate);

            total_seconds += seconds;
            total_pay += gross;

            lines.push(PayrollLine {
                employee_id,
                name: employee.name.clone(),
                hours: round_hours(hours_from_seconds(seconds)),
                hourly_rate: employee.hourly_rate,
                gross_pay: gross.round_dp(2),
            });
        }

        Ok(PayrollReport {
            period,
            lines,
            totals: PayrollTotals {
                hours: round_hours(hours_from_seconds(total_seconds)),
                gross_pay: total_pay.round_dp(2),
            },
        })
    })
}
