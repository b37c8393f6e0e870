//! Time tracking for the FieldTrack engine.
//!
//! This module contains the clock ledger, which enforces legal state
//! transitions for an employee's work time (clock-in, site switch,
//! clock-out), and the status reader, which answers "what is this
//! employee doing right now" without mutating anything.

mod clock;
mod status;

pub use clock::{ClockInOutcome, SwitchOutcome, clock_in, clock_out, switch_site};
pub use status::{
    ActiveWorker, EmployeeStatus, SegmentView, ShiftView, active_now, day_segments,
    employee_status, shift_history,
};
