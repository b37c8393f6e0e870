//! In-memory ledger store.

use std::sync::{PoisonError, RwLock};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CompanyId, Employee, EmployeeId, JobSite, Segment, SegmentId, SegmentState, Shift, ShiftId,
    ShiftState, SiteId,
};

/// The tables and id counters behind a [`MemoryStore`].
///
/// All methods are plain synchronous record operations; atomicity comes
/// from the enclosing [`MemoryStore::read`]/[`MemoryStore::write`] scope.
#[derive(Debug, Default)]
pub struct StoreInner {
    employees: Vec<Employee>,
    sites: Vec<JobSite>,
    shifts: Vec<Shift>,
    segments: Vec<Segment>,
    next_employee_id: EmployeeId,
    next_site_id: SiteId,
    next_shift_id: ShiftId,
    next_segment_id: SegmentId,
}

impl StoreInner {
    /// Registers a new active employee and returns the stored record.
    pub fn register_employee(
        &mut self,
        company_id: CompanyId,
        name: impl Into<String>,
        hourly_rate: Decimal,
    ) -> Employee {
        self.next_employee_id += 1;
        let employee = Employee {
            id: self.next_employee_id,
            company_id,
            name: name.into(),
            hourly_rate,
            active: true,
        };
        self.employees.push(employee.clone());
        employee
    }

    /// Registers a new active job site and returns the stored record.
    pub fn register_site(
        &mut self,
        company_id: CompanyId,
        name: impl Into<String>,
        address: Option<String>,
    ) -> JobSite {
        self.next_site_id += 1;
        let site = JobSite {
            id: self.next_site_id,
            company_id,
            name: name.into(),
            address,
            active: true,
        };
        self.sites.push(site.clone());
        site
    }

    /// Soft-deletes a job site. Historical segments keep resolving to it.
    pub fn deactivate_site(&mut self, site_id: SiteId) -> EngineResult<()> {
        let site = self
            .sites
            .iter_mut()
            .find(|s| s.id == site_id)
            .ok_or(EngineError::InvalidSite { site_id })?;
        site.active = false;
        Ok(())
    }

    /// Soft-deletes an employee. Historical shifts and segments remain.
    pub fn deactivate_employee(&mut self, employee_id: EmployeeId) -> EngineResult<()> {
        let employee = self
            .employees
            .iter_mut()
            .find(|e| e.id == employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })?;
        employee.active = false;
        Ok(())
    }

    /// Updates an employee's hourly rate. Affects only future aggregation;
    /// past reports are never recomputed.
    pub fn set_hourly_rate(
        &mut self,
        employee_id: EmployeeId,
        hourly_rate: Decimal,
    ) -> EngineResult<()> {
        let employee = self
            .employees
            .iter_mut()
            .find(|e| e.id == employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })?;
        employee.hourly_rate = hourly_rate;
        Ok(())
    }

    /// Looks up an employee by id, active or not.
    pub fn employee(&self, employee_id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == employee_id)
    }

    /// Looks up an active employee by id.
    pub fn active_employee(&self, employee_id: EmployeeId) -> Option<&Employee> {
        self.employee(employee_id).filter(|e| e.active)
    }

    /// Looks up a job site by id, active or not.
    pub fn site(&self, site_id: SiteId) -> Option<&JobSite> {
        self.sites.iter().find(|s| s.id == site_id)
    }

    /// Looks up a site usable for a new segment: it must exist, be active,
    /// and belong to the given organizational scope.
    pub fn assignable_site(&self, site_id: SiteId, company_id: CompanyId) -> Option<&JobSite> {
        self.site(site_id)
            .filter(|s| s.active && s.company_id == company_id)
    }

    /// Returns the employee's open shift, if any. The ledger guarantees
    /// at most one exists.
    pub fn open_shift(&self, employee_id: EmployeeId) -> Option<&Shift> {
        self.shifts
            .iter()
            .find(|s| s.employee_id == employee_id && s.is_open())
    }

    /// Returns the shift's open segment, if any. The ledger guarantees
    /// at most one exists per shift.
    pub fn open_segment(&self, shift_id: ShiftId) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|s| s.shift_id == shift_id && s.is_open())
    }

    /// Appends a new open shift and returns its id.
    pub fn append_shift(
        &mut self,
        employee_id: EmployeeId,
        company_id: CompanyId,
        started_at: NaiveDateTime,
    ) -> ShiftId {
        self.next_shift_id += 1;
        self.shifts.push(Shift {
            id: self.next_shift_id,
            employee_id,
            company_id,
            started_at,
            state: ShiftState::Open,
        });
        self.next_shift_id
    }

    /// Appends a new open segment to a shift and returns its id.
    pub fn append_segment(
        &mut self,
        shift_id: ShiftId,
        site_id: SiteId,
        started_at: NaiveDateTime,
    ) -> SegmentId {
        self.next_segment_id += 1;
        self.segments.push(Segment {
            id: self.next_segment_id,
            shift_id,
            site_id,
            started_at,
            state: SegmentState::Open,
        });
        self.next_segment_id
    }

    /// Closes a segment at the given timestamp.
    pub fn close_segment(&mut self, segment_id: SegmentId, ended_at: NaiveDateTime) {
        if let Some(segment) = self.segments.iter_mut().find(|s| s.id == segment_id) {
            segment.close(ended_at);
        }
    }

    /// Closes a shift at the given timestamp.
    pub fn close_shift(&mut self, shift_id: ShiftId, ended_at: NaiveDateTime) {
        if let Some(shift) = self.shifts.iter_mut().find(|s| s.id == shift_id) {
            shift.close(ended_at);
        }
    }

    /// Returns a shift's segments ordered by start timestamp ascending.
    pub fn segments_of_shift(&self, shift_id: ShiftId) -> Vec<&Segment> {
        let mut segments: Vec<&Segment> = self
            .segments
            .iter()
            .filter(|s| s.shift_id == shift_id)
            .collect();
        segments.sort_by_key(|s| s.started_at);
        segments
    }

    /// Returns all segments belonging to the employee's shifts, in
    /// insertion order.
    pub fn employee_segments(&self, employee_id: EmployeeId) -> Vec<&Segment> {
        self.segments
            .iter()
            .filter(|segment| {
                self.shifts
                    .iter()
                    .any(|shift| shift.id == segment.shift_id && shift.employee_id == employee_id)
            })
            .collect()
    }

    /// Returns all of the employee's shifts, in insertion order.
    pub fn employee_shifts(&self, employee_id: EmployeeId) -> Vec<&Shift> {
        self.shifts
            .iter()
            .filter(|shift| shift.employee_id == employee_id)
            .collect()
    }

    /// Returns every open shift recorded under the company, in insertion
    /// order.
    pub fn open_company_shifts(&self, company_id: CompanyId) -> Vec<&Shift> {
        self.shifts
            .iter()
            .filter(|shift| shift.company_id == company_id && shift.is_open())
            .collect()
    }

    /// Returns every segment recorded under the company, paired with its
    /// shift, in insertion order.
    pub fn company_segments(&self, company_id: CompanyId) -> Vec<(&Segment, &Shift)> {
        self.segments
            .iter()
            .filter_map(|segment| {
                self.shifts
                    .iter()
                    .find(|shift| shift.id == segment.shift_id && shift.company_id == company_id)
                    .map(|shift| (segment, shift))
            })
            .collect()
    }
}

/// Thread-safe in-memory ledger store.
///
/// The `read`/`write` closure helpers are the transaction boundary: a
/// ledger operation performs its "am I clocked in" check and its
/// inserts/updates inside one `write` call, so two concurrent clock-ins
/// for the same employee can never both observe the pre-mutation state.
/// Reads never observe a half-applied transition (a closed segment whose
/// shift is still being closed, or vice versa).
///
/// Shared by cloning an `Arc<MemoryStore>` into each caller; nothing in
/// the engine holds it as process-wide state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a read-only transaction over the store.
    pub fn read<T>(&self, f: impl FnOnce(&StoreInner) -> T) -> T {
        // A poisoned lock only means a panic elsewhere; the data itself
        // is still consistent because transitions are applied checks-first.
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Runs a read-modify-write transaction over the store.
    pub fn write<T>(&self, f: impl FnOnce(&mut StoreInner) -> T) -> T {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Registers a new active employee.
    pub fn register_employee(
        &self,
        company_id: CompanyId,
        name: impl Into<String>,
        hourly_rate: Decimal,
    ) -> Employee {
        self.write(|s| s.register_employee(company_id, name, hourly_rate))
    }

    /// Registers a new active job site.
    pub fn register_site(
        &self,
        company_id: CompanyId,
        name: impl Into<String>,
        address: Option<String>,
    ) -> JobSite {
        self.write(|s| s.register_site(company_id, name, address))
    }

    /// Soft-deletes a job site.
    pub fn deactivate_site(&self, site_id: SiteId) -> EngineResult<()> {
        self.write(|s| s.deactivate_site(site_id))
    }

    /// Soft-deletes an employee.
    pub fn deactivate_employee(&self, employee_id: EmployeeId) -> EngineResult<()> {
        self.write(|s| s.deactivate_employee(employee_id))
    }

    /// Updates an employee's hourly rate for future aggregation.
    pub fn set_hourly_rate(&self, employee_id: EmployeeId, rate: Decimal) -> EngineResult<()> {
        self.write(|s| s.set_hourly_rate(employee_id, rate))
    }
}
