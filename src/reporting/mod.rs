//! Aggregation and payroll reporting for the FieldTrack engine.
//!
//! The aggregator converts closed segments into hours and pay over an
//! inclusive calendar-date range; the payroll reporter composes aggregator
//! output into per-employee and company-wide summaries with a flat
//! estimated-tax deduction. Both are pure read paths over the ledger.

mod aggregate;
mod report;
mod summary;

pub use aggregate::{compute_for_many, compute_hours, compute_pay};
pub(crate) use aggregate::round_hours;
pub use report::segment_report;
pub use summary::build_payroll_summary;
