//! Schedule resolution.
//!
//! This module decides whether a calendar day is a scheduled work day for a
//! [`WorkCycle`] measured from the process-wide [`ScheduleAnchor`].

use chrono::NaiveDate;

use crate::models::{ScheduleAnchor, WorkCycle};

/// Returns the position of `date` within the cycle, in `0..cycle.len()`.
///
/// Days before the anchor wrap backwards through the cycle, so the anchor
/// itself is phase 0, the day before it is the last phase, and so on.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::cycle_phase;
/// use payroll_engine::models::{ScheduleAnchor, WorkCycle};
/// use chrono::NaiveDate;
///
/// let anchor = ScheduleAnchor::default(); // Monday 2024-01-01
/// let cycle = WorkCycle::five_two();
///
/// assert_eq!(cycle_phase(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), cycle, anchor), 0);
/// assert_eq!(cycle_phase(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(), cycle, anchor), 6);
/// ```
pub fn cycle_phase(date: NaiveDate, cycle: WorkCycle, anchor: ScheduleAnchor) -> u32 {
    let days_since_anchor = (date - anchor.date()).num_days();
    // rem_euclid floors toward negative infinity, unlike `%`
    days_since_anchor.rem_euclid(i64::from(cycle.len())) as u32
}

/// Determines whether `date` is a scheduled work day.
///
/// The first `work_days` phases of every cycle are work, the remaining
/// `rest_days` phases are rest. A cycle with no work days is always rest and a
/// cycle with no rest days is always work.
///
/// # Arguments
///
/// * `date` - The calendar day to classify
/// * `cycle` - The employee's work/rest pattern
/// * `anchor` - The phase-zero reference date
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::is_scheduled_work_day;
/// use payroll_engine::models::{ScheduleAnchor, WorkCycle};
/// use chrono::NaiveDate;
///
/// let anchor = ScheduleAnchor::default();
/// let cycle = WorkCycle::five_two();
///
/// // 2026-01-16 is a Friday, 2026-01-17 a Saturday
/// assert!(is_scheduled_work_day(NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(), cycle, anchor));
/// assert!(!is_scheduled_work_day(NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(), cycle, anchor));
/// ```
pub fn is_scheduled_work_day(date: NaiveDate, cycle: WorkCycle, anchor: ScheduleAnchor) -> bool {
    cycle_phase(date, cycle, anchor) < cycle.work_days()
}
