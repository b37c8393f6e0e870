//! Segment cost report models.
//!
//! Output types of the company-wide per-segment report: each row is one
//! segment joined with its employee's name and current rate and its site's
//! name, priced at `hours × rate`.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, PayPeriod, SegmentId, SiteId};

/// One segment of a company's work, priced at the employee's current rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentReportRow {
    /// The segment's id.
    pub segment_id: SegmentId,
    /// The employee who worked the segment.
    pub employee_id: EmployeeId,
    /// The employee's display name.
    pub employee_name: String,
    /// The site worked during the segment.
    pub site_id: SiteId,
    /// The resolved site name.
    pub site_name: String,
    /// When the segment started.
    pub started_at: NaiveDateTime,
    /// When the segment ended, or `None` while still active.
    pub ended_at: Option<NaiveDateTime>,
    /// Worked hours, rounded to 2 dp; 0 while the segment is open.
    pub hours: f64,
    /// Hours × the employee's current rate, rounded to 2 dp.
    pub cost: Decimal,
}

/// Company-wide totals of a segment report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentReportTotals {
    /// Sum of row hours, rounded to 2 dp after summation.
    pub hours: f64,
    /// Sum of row costs, rounded to 2 dp after summation.
    pub cost: Decimal,
}

/// Per-segment cost rows plus company totals for a pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentReport {
    /// The period the report covers.
    pub period: PayPeriod,
    /// One row per segment, ordered by segment start ascending.
    pub rows: Vec<SegmentReportRow>,
    /// Company-wide totals across all rows.
    pub totals: SegmentReportTotals,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_segment_report_serialization() {
        let report = SegmentReport {
            period: PayPeriod::new(
                NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
                NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
            )
            .unwrap(),
            rows: vec![SegmentReportRow {
                segment_id: 1,
                employee_id: 2,
                employee_name: "Field Employee".to_string(),
                site_id: 3,
                site_name: "Downtown Site A".to_string(),
                started_at: NaiveDateTime::parse_from_str(
                    "2026-01-15 09:00:00",
                    "%Y-%m-%d %H:%M:%S",
                )
                .unwrap(),
                ended_at: None,
                hours: 0.0,
                cost: Decimal::new(0, 2),
            }],
            totals: SegmentReportTotals {
                hours: 0.0,
                cost: Decimal::new(0, 2),
            },
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"employee_name\":\"Field Employee\""));
        assert!(json.contains("\"ended_at\":null"));
        assert!(json.contains("\"cost\":\"0.00\""));
    }
}
