//! Clock ledger operations.
//!
//! Each employee is either `OFF` (no open shift) or `ON` (one open shift
//! with exactly one open segment pointing at a job site). The three
//! operations below are the only legal transitions. Every operation runs
//! its state check and its mutations inside a single store write
//! transaction, so a failed operation leaves the ledger exactly as it was
//! and two concurrent operations for the same employee can never both
//! observe stale state.
//!
//! Timestamps are supplied by the caller (the API layer passes the server
//! wall clock) and taken as given; the ledger assumes a trusted,
//! monotonically non-decreasing clock source per request.

use chrono::NaiveDateTime;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeId, SegmentId, ShiftId, SiteId};
use crate::store::MemoryStore;

/// The result of a successful clock-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockInOutcome {
    /// The newly opened shift.
    pub shift_id: ShiftId,
    /// The shift's first (open) segment.
    pub segment_id: SegmentId,
}

/// The result of a successful site switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchOutcome {
    /// The shift the switch happened within.
    pub shift_id: ShiftId,
    /// The newly opened segment at the new site.
    pub segment_id: SegmentId,
}

/// Clocks an employee in at a job site.
///
/// Creates a new open shift and one open segment starting at `at`, moving
/// the employee from `OFF` to `ON`.
///
/// # Errors
///
/// - [`EngineError::EmployeeNotFound`] if the employee is unknown or inactive.
/// - [`EngineError::InvalidSite`] if the site is unknown, inactive, or
///   belongs to a different company than the employee.
/// - [`EngineError::AlreadyClockedIn`] if the employee already has an
///   open shift; the existing shift and segment are left unchanged.
///
/// # Example
///
/// ```
/// use fieldtrack::store::MemoryStore;
/// use fieldtrack::tracking::clock_in;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let store = MemoryStore::new();
/// let employee = store.register_employee(1, "Field Employee", Decimal::new(2550, 2));
/// let site = store.register_site(1, "Downtown Site A", None);
///
/// let at = NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let outcome = clock_in(&store, employee.id, site.id, at).unwrap();
/// assert_eq!(outcome.shift_id, 1);
/// ```
pub fn clock_in(
    store: &MemoryStore,
    employee_id: EmployeeId,
    site_id: SiteId,
    at: NaiveDateTime,
) -> EngineResult<ClockInOutcome> {
    store.write(|s| {
        let company_id = s
            .active_employee(employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })?
            .company_id;

        if s.assignable_site(site_id, company_id).is_none() {
            return Err(EngineError::InvalidSite { site_id });
        }

        if s.open_shift(employee_id).is_some() {
            return Err(EngineError::AlreadyClockedIn { employee_id });
        }

        let shift_id = s.append_shift(employee_id, company_id, at);
        let segment_id = s.append_segment(shift_id, site_id, at);

        Ok(ClockInOutcome {
            shift_id,
            segment_id,
        })
    })
}

/// Moves a clocked-in employee to a different job site.
///
/// Closes the currently open segment and opens a new one at `new_site_id`,
/// both at the same `at`; the shared boundary timestamp is what guarantees
/// segments stay contiguous, with no gap and no overlap.
///
/// # Errors
///
/// - [`EngineError::EmployeeNotFound`] if the employee is unknown or inactive.
/// - [`EngineError::InvalidSite`] if the new site fails validation.
/// - [`EngineError::NotClockedIn`] if the employee has no open shift.
/// - [`EngineError::IntegrityViolation`] if the open shift has no open
///   segment, which indicates ledger corruption, not caller error.
pub fn switch_site(
    store: &MemoryStore,
    employee_id: EmployeeId,
    new_site_id: SiteId,
    at: NaiveDateTime,
) -> EngineResult<SwitchOutcome> {
    store.write(|s| {
        let company_id = s
            .active_employee(employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })?
            .company_id;

        if s.assignable_site(new_site_id, company_id).is_none() {
            return Err(EngineError::InvalidSite {
                site_id: new_site_id,
            });
        }

        let shift_id = s
            .open_shift(employee_id)
            .ok_or(EngineError::NotClockedIn { employee_id })?
            .id;

        let open_segment_id = s
            .open_segment(shift_id)
            .ok_or_else(|| EngineError::IntegrityViolation {
                message: format!("open shift {shift_id} has no open segment"),
            })?
            .id;

        s.close_segment(open_segment_id, at);
        let segment_id = s.append_segment(shift_id, new_site_id, at);

        Ok(SwitchOutcome {
            shift_id,
            segment_id,
        })
    })
}

/// Clocks an employee out, ending the shift.
///
/// Closes the open segment and the shift at the same `at`. Both are closed
/// within the same transaction: either both succeed or the ledger is left
/// untouched.
///
/// # Errors
///
/// - [`EngineError::EmployeeNotFound`] if the employee is unknown.
/// - [`EngineError::NotClockedIn`] if the employee has no open shift.
/// - [`EngineError::IntegrityViolation`] if the open shift has no open
///   segment.
pub fn clock_out(
    store: &MemoryStore,
    employee_id: EmployeeId,
    at: NaiveDateTime,
) -> EngineResult<ShiftId> {
    store.write(|s| {
        // Deactivated employees may still close a shift they opened.
        s.employee(employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })?;

        let shift_id = s
            .open_shift(employee_id)
            .ok_or(EngineError::NotClockedIn { employee_id })?
            .id;

        let open_segment_id = s
            .open_segment(shift_id)
            .ok_or_else(|| EngineError::IntegrityViolation {
                message: format!("open shift {shift_id} has no open segment"),
            })?
            .id;

        s.close_segment(open_segment_id, at);
        s.close_shift(shift_id, at);

        Ok(shift_id)
    })
}
