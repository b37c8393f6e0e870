//! Status reader.
//!
//! Pure read paths over the ledger: current clock-in status and the
//! activity feed of a single day. Each call recomputes from current
//! ledger state; nothing here mutates.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CompanyId, EmployeeId, PayPeriod, SegmentId, ShiftId, SiteId};
use crate::reporting::round_hours;
use crate::store::MemoryStore;

/// What an employee is doing right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeStatus {
    /// No open shift.
    ClockedOut,
    /// An open shift with its currently active site.
    ClockedIn {
        /// The open shift.
        shift_id: ShiftId,
        /// When the shift started.
        since: NaiveDateTime,
        /// The site of the open segment.
        site_id: SiteId,
        /// The resolved site name.
        site_name: String,
    },
}

/// One segment of an employee's day, with its site resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentView {
    /// The segment's id.
    pub segment_id: SegmentId,
    /// The site worked during the segment.
    pub site_id: SiteId,
    /// The resolved site name.
    pub site_name: String,
    /// When the segment started.
    pub started_at: NaiveDateTime,
    /// When the segment ended, or `None` while still active.
    pub ended_at: Option<NaiveDateTime>,
}

/// Derives an employee's current status from the ledger.
///
/// An open shift must have exactly one open segment; if it has none, the
/// ledger is corrupt and this surfaces as
/// [`EngineError::IntegrityViolation`] instead of silently defaulting.
///
/// # Errors
///
/// - [`EngineError::EmployeeNotFound`] if the employee is unknown.
/// - [`EngineError::IntegrityViolation`] if an open shift has no open
///   segment or its site cannot be resolved.
pub fn employee_status(
    store: &MemoryStore,
    employee_id: EmployeeId,
) -> EngineResult<EmployeeStatus> {
    store.read(|s| {
        s.employee(employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })?;

        let Some(shift) = s.open_shift(employee_id) else {
            return Ok(EmployeeStatus::ClockedOut);
        };

        let segment =
            s.open_segment(shift.id)
                .ok_or_else(|| EngineError::IntegrityViolation {
                    message: format!("open shift {} has no open segment", shift.id),
                })?;

        let site = s
            .site(segment.site_id)
            .ok_or_else(|| EngineError::IntegrityViolation {
                message: format!("segment {} references unknown site {}", segment.id, segment.site_id),
            })?;

        Ok(EmployeeStatus::ClockedIn {
            shift_id: shift.id,
            since: shift.started_at,
            site_id: site.id,
            site_name: site.name.clone(),
        })
    })
}

/// Returns all of the employee's segments (open or closed) that started on
/// `reference_date`, with resolved site names, ordered by start timestamp
/// ascending.
///
/// Used for activity feeds. Dates are interpreted in the reporting
/// timezone of the stored timestamps (UTC at the API boundary).
pub fn day_segments(
    store: &MemoryStore,
    employee_id: EmployeeId,
    reference_date: NaiveDate,
) -> EngineResult<Vec<SegmentView>> {
    store.read(|s| {
        s.employee(employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })?;

        let mut views = s
            .employee_segments(employee_id)
            .into_iter()
            .filter(|segment| segment.starts_on(reference_date))
            .map(|segment| {
                let site =
                    s.site(segment.site_id)
                        .ok_or_else(|| EngineError::IntegrityViolation {
                            message: format!(
                                "segment {} references unknown site {}",
                                segment.id, segment.site_id
                            ),
                        })?;
                Ok(SegmentView {
                    segment_id: segment.id,
                    site_id: site.id,
                    site_name: site.name.clone(),
                    started_at: segment.started_at,
                    ended_at: segment.ended_at(),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        views.sort_by_key(|view| view.started_at);
        Ok(views)
    })
}

/// One currently clocked-in worker, for the company-wide live view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveWorker {
    /// The clocked-in employee.
    pub employee_id: EmployeeId,
    /// The employee's display name.
    pub employee_name: String,
    /// The open shift.
    pub shift_id: ShiftId,
    /// When the shift started.
    pub since: NaiveDateTime,
    /// The site of the open segment.
    pub site_id: SiteId,
    /// The resolved site name.
    pub site_name: String,
}

/// One shift in an employee's history, with its first site resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftView {
    /// The shift's id.
    pub shift_id: ShiftId,
    /// The clock-in timestamp.
    pub started_at: NaiveDateTime,
    /// The clock-out timestamp, or `None` while still in progress.
    pub ended_at: Option<NaiveDateTime>,
    /// The name of the site the shift started at.
    pub site_name: String,
    /// Worked hours, rounded to 2 dp; open shifts count elapsed time.
    pub hours: f64,
}

/// Lists every currently clocked-in worker of a company, newest shift
/// first.
///
/// # Errors
///
/// - [`EngineError::IntegrityViolation`] if an open shift has no open
///   segment, references an unknown employee, or its site cannot be
///   resolved.
pub fn active_now(store: &MemoryStore, company_id: CompanyId) -> EngineResult<Vec<ActiveWorker>> {
    store.read(|s| {
        let mut workers = s
            .open_company_shifts(company_id)
            .into_iter()
            .map(|shift| {
                let employee =
                    s.employee(shift.employee_id)
                        .ok_or_else(|| EngineError::IntegrityViolation {
                            message: format!(
                                "shift {} references unknown employee {}",
                                shift.id, shift.employee_id
                            ),
                        })?;
                let segment =
                    s.open_segment(shift.id)
                        .ok_or_else(|| EngineError::IntegrityViolation {
                            message: format!("open shift {} has no open segment", shift.id),
                        })?;
                let site = s.site(segment.site_id).ok_or_else(|| {
                    EngineError::IntegrityViolation {
                        message: format!(
                            "segment {} references unknown site {}",
                            segment.id, segment.site_id
                        ),
                    }
                })?;
                Ok(ActiveWorker {
                    employee_id: employee.id,
                    employee_name: employee.name.clone(),
                    shift_id: shift.id,
                    since: shift.started_at,
                    site_id: site.id,
                    site_name: site.name.clone(),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        workers.sort_by(|a, b| b.since.cmp(&a.since));
        Ok(workers)
    })
}

/// Returns the employee's shifts whose start date falls in the period,
/// newest first.
///
/// Each shift is labeled with its first segment's site name. Worked hours
/// are rounded to 2 dp; an in-progress shift counts elapsed time up to
/// `now`, which the caller supplies from the server clock.
///
/// # Errors
///
/// - [`EngineError::EmployeeNotFound`] if the employee is unknown.
/// - [`EngineError::IntegrityViolation`] if a shift has no segments or a
///   site cannot be resolved.
pub fn shift_history(
    store: &MemoryStore,
    employee_id: EmployeeId,
    period: PayPeriod,
    now: NaiveDateTime,
) -> EngineResult<Vec<ShiftView>> {
    store.read(|s| {
        s.employee(employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })?;

        let mut views = s
            .employee_shifts(employee_id)
            .into_iter()
            .filter(|shift| period.contains_date(shift.started_at.date()))
            .map(|shift| {
                let segments = s.segments_of_shift(shift.id);
                let first =
                    segments
                        .first()
                        .ok_or_else(|| EngineError::IntegrityViolation {
                            message: format!("shift {} has no segments", shift.id),
                        })?;
                let site = s.site(first.site_id).ok_or_else(|| {
                    EngineError::IntegrityViolation {
                        message: format!(
                            "segment {} references unknown site {}",
                            first.id, first.site_id
                        ),
                    }
                })?;

                let worked_until = shift.ended_at().unwrap_or(now);
                let seconds = (worked_until - shift.started_at).num_seconds();

                Ok(ShiftView {
                    shift_id: shift.id,
                    started_at: shift.started_at,
                    ended_at: shift.ended_at(),
                    site_name: site.name.clone(),
                    hours: round_hours(seconds as f64 / 3600.0),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        views.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(views)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{clock_in, clock_out, switch_site};
    use rust_decimal::Decimal;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_status_clocked_out_by_default() {
        let store = MemoryStore::new();
        let employee = store.register_employee(1, "Field Employee", Decimal::new(2550, 2));
        let status = employee_status(&store, employee.id).unwrap();
        assert_eq!(status, EmployeeStatus::ClockedOut);
    }

    #[test]
    fn test_status_reflects_open_shift_and_site() {
        let store = MemoryStore::new();
        let employee = store.register_employee(1, "Field Employee", Decimal::new(2550, 2));
        let site = store.register_site(1, "Downtown Site A", None);
        let at = make_datetime("2026-01-15 09:00:00");
        let outcome = clock_in(&store, employee.id, site.id, at).unwrap();

        let status = employee_status(&store, employee.id).unwrap();
        assert_eq!(
            status,
            EmployeeStatus::ClockedIn {
                shift_id: outcome.shift_id,
                since: at,
                site_id: site.id,
                site_name: "Downtown Site A".to_string(),
            }
        );
    }

    #[test]
    fn test_status_follows_site_switches() {
        let store = MemoryStore::new();
        let employee = store.register_employee(1, "Field Employee", Decimal::new(2550, 2));
        let site_a = store.register_site(1, "Downtown Site A", None);
        let site_b = store.register_site(1, "Highway Site B", None);
        clock_in(&store, employee.id, site_a.id, make_datetime("2026-01-15 09:00:00")).unwrap();
        switch_site(&store, employee.id, site_b.id, make_datetime("2026-01-15 11:30:00")).unwrap();

        match employee_status(&store, employee.id).unwrap() {
            EmployeeStatus::ClockedIn { site_name, .. } => {
                assert_eq!(site_name, "Highway Site B");
            }
            other => panic!("expected clocked in, got {:?}", other),
        }
    }

    #[test]
    fn test_status_after_clock_out_is_clocked_out() {
        let store = MemoryStore::new();
        let employee = store.register_employee(1, "Field Employee", Decimal::new(2550, 2));
        let site = store.register_site(1, "Downtown Site A", None);
        clock_in(&store, employee.id, site.id, make_datetime("2026-01-15 09:00:00")).unwrap();
        clock_out(&store, employee.id, make_datetime("2026-01-15 17:00:00")).unwrap();

        let status = employee_status(&store, employee.id).unwrap();
        assert_eq!(status, EmployeeStatus::ClockedOut);
    }

    #[test]
    fn test_status_surfaces_missing_open_segment_as_integrity_error() {
        let store = MemoryStore::new();
        let employee = store.register_employee(1, "Field Employee", Decimal::new(2550, 2));
        // Corrupt the ledger: open shift with no segment at all
        store.write(|s| {
            s.append_shift(employee.id, 1, make_datetime("2026-01-15 09:00:00"));
        });

        let result = employee_status(&store, employee.id);
        assert!(matches!(result, Err(EngineError::IntegrityViolation { .. })));
    }

    #[test]
    fn test_status_unknown_employee() {
        let store = MemoryStore::new();
        let result = employee_status(&store, 99);
        assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
    }

    #[test]
    fn test_day_segments_scenario_two_sites() {
        let store = MemoryStore::new();
        let employee = store.register_employee(1, "Field Employee", Decimal::new(2550, 2));
        let site_a = store.register_site(1, "Downtown Site A", None);
        let site_b = store.register_site(1, "Highway Site B", None);
        clock_in(&store, employee.id, site_a.id, make_datetime("2026-01-15 09:00:00")).unwrap();
        switch_site(&store, employee.id, site_b.id, make_datetime("2026-01-15 11:30:00")).unwrap();
        clock_out(&store, employee.id, make_datetime("2026-01-15 17:00:00")).unwrap();

        let views = day_segments(&store, employee.id, make_date("2026-01-15")).unwrap();
        assert_eq!(views.len(), 2);

        assert_eq!(views[0].site_name, "Downtown Site A");
        assert_eq!(views[0].started_at, make_datetime("2026-01-15 09:00:00"));
        assert_eq!(views[0].ended_at, Some(make_datetime("2026-01-15 11:30:00")));

        assert_eq!(views[1].site_name, "Highway Site B");
        assert_eq!(views[1].started_at, make_datetime("2026-01-15 11:30:00"));
        assert_eq!(views[1].ended_at, Some(make_datetime("2026-01-15 17:00:00")));
    }

    #[test]
    fn test_day_segments_includes_open_segment() {
        let store = MemoryStore::new();
        let employee = store.register_employee(1, "Field Employee", Decimal::new(2550, 2));
        let site = store.register_site(1, "Downtown Site A", None);
        clock_in(&store, employee.id, site.id, make_datetime("2026-01-15 09:00:00")).unwrap();

        let views = day_segments(&store, employee.id, make_date("2026-01-15")).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].ended_at, None);
    }

    #[test]
    fn test_day_segments_filters_by_start_date() {
        let store = MemoryStore::new();
        let employee = store.register_employee(1, "Field Employee", Decimal::new(2550, 2));
        let site = store.register_site(1, "Downtown Site A", None);
        clock_in(&store, employee.id, site.id, make_datetime("2026-01-14 22:00:00")).unwrap();
        clock_out(&store, employee.id, make_datetime("2026-01-15 06:00:00")).unwrap();

        // The overnight segment started on the 14th
        assert_eq!(
            day_segments(&store, employee.id, make_date("2026-01-14"))
                .unwrap()
                .len(),
            1
        );
        assert!(day_segments(&store, employee.id, make_date("2026-01-15"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_day_segments_only_for_requested_employee() {
        let store = MemoryStore::new();
        let alice = store.register_employee(1, "Alice", Decimal::new(2550, 2));
        let bob = store.register_employee(1, "Bob", Decimal::new(3000, 2));
        let site = store.register_site(1, "Downtown Site A", None);
        clock_in(&store, alice.id, site.id, make_datetime("2026-01-15 09:00:00")).unwrap();

        assert!(day_segments(&store, bob.id, make_date("2026-01-15"))
            .unwrap()
            .is_empty());
    }

    fn make_period(start: &str, end: &str) -> PayPeriod {
        PayPeriod::new(make_date(start), make_date(end)).unwrap()
    }

    #[test]
    fn test_active_now_lists_open_shifts_newest_first() {
        let store = MemoryStore::new();
        let alice = store.register_employee(1, "Alice", Decimal::new(2550, 2));
        let bob = store.register_employee(1, "Bob", Decimal::new(3000, 2));
        let carol = store.register_employee(1, "Carol", Decimal::new(2800, 2));
        let site_a = store.register_site(1, "Downtown Site A", None);
        let site_b = store.register_site(1, "Highway Site B", None);

        clock_in(&store, alice.id, site_a.id, make_datetime("2026-01-15 08:00:00")).unwrap();
        clock_in(&store, bob.id, site_b.id, make_datetime("2026-01-15 09:30:00")).unwrap();
        // Carol already finished; she must not appear
        clock_in(&store, carol.id, site_a.id, make_datetime("2026-01-15 06:00:00")).unwrap();
        clock_out(&store, carol.id, make_datetime("2026-01-15 07:00:00")).unwrap();

        let workers = active_now(&store, 1).unwrap();
        assert_eq!(workers.len(), 2);
        assert_eq!(workers[0].employee_name, "Bob");
        assert_eq!(workers[0].site_name, "Highway Site B");
        assert_eq!(workers[0].since, make_datetime("2026-01-15 09:30:00"));
        assert_eq!(workers[1].employee_name, "Alice");
        assert_eq!(workers[1].site_name, "Downtown Site A");
    }

    #[test]
    fn test_active_now_shows_the_current_site_after_a_switch() {
        let store = MemoryStore::new();
        let alice = store.register_employee(1, "Alice", Decimal::new(2550, 2));
        let site_a = store.register_site(1, "Downtown Site A", None);
        let site_b = store.register_site(1, "Highway Site B", None);
        clock_in(&store, alice.id, site_a.id, make_datetime("2026-01-15 09:00:00")).unwrap();
        switch_site(&store, alice.id, site_b.id, make_datetime("2026-01-15 11:30:00")).unwrap();

        let workers = active_now(&store, 1).unwrap();
        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].site_name, "Highway Site B");
        // The shift start, not the segment start
        assert_eq!(workers[0].since, make_datetime("2026-01-15 09:00:00"));
    }

    #[test]
    fn test_active_now_is_scoped_to_the_company() {
        let store = MemoryStore::new();
        let alice = store.register_employee(1, "Alice", Decimal::new(2550, 2));
        let rival = store.register_employee(2, "Rival Worker", Decimal::new(2000, 2));
        let site_a = store.register_site(1, "Downtown Site A", None);
        let yard = store.register_site(2, "Rival Yard", None);
        clock_in(&store, alice.id, site_a.id, make_datetime("2026-01-15 09:00:00")).unwrap();
        clock_in(&store, rival.id, yard.id, make_datetime("2026-01-15 09:00:00")).unwrap();

        let workers = active_now(&store, 1).unwrap();
        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].employee_name, "Alice");
    }

    #[test]
    fn test_active_now_empty_company_is_empty() {
        let store = MemoryStore::new();
        assert!(active_now(&store, 1).unwrap().is_empty());
    }

    #[test]
    fn test_active_now_surfaces_corrupt_open_shift() {
        let store = MemoryStore::new();
        let alice = store.register_employee(1, "Alice", Decimal::new(2550, 2));
        // Open shift with no segment at all
        store.write(|s| {
            s.append_shift(alice.id, 1, make_datetime("2026-01-15 09:00:00"));
        });

        let result = active_now(&store, 1);
        assert!(matches!(result, Err(EngineError::IntegrityViolation { .. })));
    }

    #[test]
    fn test_shift_history_newest_first_with_first_site() {
        let store = MemoryStore::new();
        let alice = store.register_employee(1, "Alice", Decimal::new(2550, 2));
        let site_a = store.register_site(1, "Downtown Site A", None);
        let site_b = store.register_site(1, "Highway Site B", None);

        clock_in(&store, alice.id, site_a.id, make_datetime("2026-01-14 09:00:00")).unwrap();
        switch_site(&store, alice.id, site_b.id, make_datetime("2026-01-14 11:30:00")).unwrap();
        clock_out(&store, alice.id, make_datetime("2026-01-14 17:00:00")).unwrap();
        clock_in(&store, alice.id, site_b.id, make_datetime("2026-01-15 09:00:00")).unwrap();
        clock_out(&store, alice.id, make_datetime("2026-01-15 13:00:00")).unwrap();

        let shifts = shift_history(
            &store,
            alice.id,
            make_period("2026-01-13", "2026-01-26"),
            make_datetime("2026-01-20 00:00:00"),
        )
        .unwrap();

        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].started_at, make_datetime("2026-01-15 09:00:00"));
        assert_eq!(shifts[0].site_name, "Highway Site B");
        assert_eq!(shifts[0].hours, 4.0);
        // The 14th's shift is labeled with the site it started at
        assert_eq!(shifts[1].site_name, "Downtown Site A");
        assert_eq!(shifts[1].hours, 8.0);
        assert_eq!(shifts[1].ended_at, Some(make_datetime("2026-01-14 17:00:00")));
    }

    #[test]
    fn test_shift_history_open_shift_counts_elapsed_time() {
        let store = MemoryStore::new();
        let alice = store.register_employee(1, "Alice", Decimal::new(2550, 2));
        let site = store.register_site(1, "Downtown Site A", None);
        clock_in(&store, alice.id, site.id, make_datetime("2026-01-15 09:00:00")).unwrap();

        let shifts = shift_history(
            &store,
            alice.id,
            make_period("2026-01-15", "2026-01-15"),
            make_datetime("2026-01-15 11:30:00"),
        )
        .unwrap();

        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].ended_at, None);
        assert_eq!(shifts[0].hours, 2.5);
    }

    #[test]
    fn test_shift_history_filters_by_start_date() {
        let store = MemoryStore::new();
        let alice = store.register_employee(1, "Alice", Decimal::new(2550, 2));
        let site = store.register_site(1, "Downtown Site A", None);
        clock_in(&store, alice.id, site.id, make_datetime("2026-01-10 09:00:00")).unwrap();
        clock_out(&store, alice.id, make_datetime("2026-01-10 17:00:00")).unwrap();

        let shifts = shift_history(
            &store,
            alice.id,
            make_period("2026-01-13", "2026-01-26"),
            make_datetime("2026-01-20 00:00:00"),
        )
        .unwrap();
        assert!(shifts.is_empty());
    }

    #[test]
    fn test_shift_history_unknown_employee() {
        let store = MemoryStore::new();
        let result = shift_history(
            &store,
            99,
            make_period("2026-01-13", "2026-01-26"),
            make_datetime("2026-01-20 00:00:00"),
        );
        assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
    }
}
