//! Shift and segment models.
//!
//! A shift is one continuous clocked-in period for an employee, from
//! clock-in to clock-out. A shift is partitioned into segments by job-site
//! switches: each segment attributes a sub-interval of the shift to exactly
//! one site, and consecutive segments share a boundary timestamp so the
//! shift has no gaps and no overlaps.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{CompanyId, EmployeeId, SegmentId, ShiftId, SiteId};

/// Whether a shift is still in progress or has been clocked out.
///
/// A shift with no end timestamp is open (in progress); persistence layers
/// may represent this as a nullable column, but the domain layer always
/// works with this explicit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ShiftState {
    /// The employee is still clocked in.
    Open,
    /// The employee has clocked out.
    Closed {
        /// The clock-out timestamp.
        ended_at: NaiveDateTime,
    },
}

/// Whether a segment is the currently active one or has been closed by a
/// site switch or clock-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SegmentState {
    /// The segment is the shift's currently active interval.
    Open,
    /// The segment was ended by a site switch or clock-out.
    Closed {
        /// The timestamp the segment ended.
        ended_at: NaiveDateTime,
    },
}

/// One continuous work session for one employee.
///
/// Shifts are append-only: they are created on clock-in, closed on
/// clock-out, and never deleted. At most one shift per employee may be
/// open at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: ShiftId,
    /// The employee this shift belongs to.
    pub employee_id: EmployeeId,
    /// The organizational scope the shift was recorded under.
    pub company_id: CompanyId,
    /// The clock-in timestamp.
    pub started_at: NaiveDateTime,
    /// Open while clocked in, closed once clocked out.
    pub state: ShiftState,
}

impl Shift {
    /// Returns true while the shift has not been clocked out.
    pub fn is_open(&self) -> bool {
        matches!(self.state, ShiftState::Open)
    }

    /// Returns the clock-out timestamp, or `None` while the shift is open.
    pub fn ended_at(&self) -> Option<NaiveDateTime> {
        match self.state {
            ShiftState::Open => None,
            ShiftState::Closed { ended_at } => Some(ended_at),
        }
    }

    /// Closes the shift at the given timestamp.
    pub fn close(&mut self, ended_at: NaiveDateTime) {
        self.state = ShiftState::Closed { ended_at };
    }
}

/// A sub-interval of a shift attributed to exactly one job site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Unique identifier for the segment.
    pub id: SegmentId,
    /// The shift this segment belongs to.
    pub shift_id: ShiftId,
    /// The job site worked during this segment.
    pub site_id: SiteId,
    /// The timestamp the segment started.
    pub started_at: NaiveDateTime,
    /// Open while active, closed once ended by a switch or clock-out.
    pub state: SegmentState,
}

impl Segment {
    /// Returns true while the segment is the shift's active interval.
    pub fn is_open(&self) -> bool {
        matches!(self.state, SegmentState::Open)
    }

    /// Returns the end timestamp, or `None` while the segment is open.
    pub fn ended_at(&self) -> Option<NaiveDateTime> {
        match self.state {
            SegmentState::Open => None,
            SegmentState::Closed { ended_at } => Some(ended_at),
        }
    }

    /// Closes the segment at the given timestamp.
    pub fn close(&mut self, ended_at: NaiveDateTime) {
        self.state = SegmentState::Closed { ended_at };
    }

    /// Returns the worked duration in whole seconds, or `None` while the
    /// segment is still open.
    ///
    /// Durations are accumulated as whole seconds so summation over many
    /// segments stays exact; conversion to fractional hours happens once,
    /// at the end of aggregation.
    pub fn duration_seconds(&self) -> Option<i64> {
        self.ended_at()
            .map(|ended_at| (ended_at - self.started_at).num_seconds())
    }

    /// Returns true if the segment started on the given calendar date.
    pub fn starts_on(&self, date: NaiveDate) -> bool {
        self.started_at.date() == date
    }
}
