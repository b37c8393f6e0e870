//! Company-wide segment cost report.
//!
//! One row per segment worked under the company during the period, joined
//! with the employee's name and current rate and the site name, priced at
//! the employee's current rate. An open segment appears in the report but
//! carries zero hours and zero cost until it is closed.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{CompanyId, PayPeriod, SegmentReport, SegmentReportRow, SegmentReportTotals};
use crate::store::MemoryStore;

use super::aggregate::{hours_from_seconds, pay_from_seconds, round_hours};

/// Builds the per-segment cost report for a company over a period.
///
/// Segment membership follows the same rule as the aggregator: a segment
/// belongs to the period when its *start* calendar date falls inside it.
/// Rows are ordered by segment start ascending; totals accumulate whole
/// seconds and full-precision cost before rounding.
///
/// # Errors
///
/// - [`EngineError::IntegrityViolation`] if a segment references an
///   unknown employee or site.
pub fn segment_report(
    store: &MemoryStore,
    company_id: CompanyId,
    period: PayPeriod,
) -> EngineResult<SegmentReport> {
    store.read(|s| {
        let mut pairs: Vec<_> = s
            .company_segments(company_id)
            .into_iter()
            .filter(|(segment, _)| period.contains_date(segment.started_at.date()))
            .collect();
        pairs.sort_by_key(|(segment, _)| segment.started_at);

        let mut rows = Vec::with_capacity(pairs.len());
        let mut total_seconds: i64 = 0;
        let mut total_cost = Decimal::ZERO;

        for (segment, shift) in pairs {
            let employee =
                s.employee(shift.employee_id)
                    .ok_or_else(|| EngineError::IntegrityViolation {
                        message: format!(
                            "shift {} references unknown employee {}",
                            shift.id, shift.employee_id
                        ),
                    })?;
            let site = s
                .site(segment.site_id)
                .ok_or_else(|| EngineError::IntegrityViolation {
                    message: format!(
                        "segment {} references unknown site {}",
                        segment.id, segment.site_id
                    ),
                })?;

            // Open segments stay at zero until they close
            let seconds = segment.duration_seconds().unwrap_or(0);
            let cost = pay_from_seconds(seconds, employee.hourly_rate);

            total_seconds += seconds;
            total_cost += cost;

            rows.push(SegmentReportRow {
                segment_id: segment.id,
                employee_id: employee.id,
                employee_name: employee.name.clone(),
                site_id: site.id,
                site_name: site.name.clone(),
                started_at: segment.started_at,
                ended_at: segment.ended_at(),
                hours: round_hours(hours_from_seconds(seconds)),
                cost: cost.round_dp(2),
            });
        }

        Ok(SegmentReport {
            period,
            rows,
            totals: SegmentReportTotals {
                hours: round_hours(hours_from_seconds(total_seconds)),
                cost: total_cost.round_dp(2),
            },
        })
    })
}
