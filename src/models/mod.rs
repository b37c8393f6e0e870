//! Core data models for the FieldTrack engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod job_site;
mod pay_period;
mod payroll;
mod report;
mod shift;

pub use employee::Employee;
pub use job_site::JobSite;
pub use pay_period::PayPeriod;
pub use payroll::{
    PayrollLine, PayrollReport, PayrollSummary, PayrollTotals, SummaryLine, SummaryTotals,
};
pub use report::{SegmentReport, SegmentReportRow, SegmentReportTotals};
pub use shift::{Segment, SegmentState, Shift, ShiftState};

/// Identifier of an employee record.
pub type EmployeeId = i64;
/// Identifier of a job site record.
pub type SiteId = i64;
/// Identifier of a shift record.
pub type ShiftId = i64;
/// Identifier of a segment record.
pub type SegmentId = i64;
/// Identifier of the company (organizational scope) a record belongs to.
pub type CompanyId = i64;
