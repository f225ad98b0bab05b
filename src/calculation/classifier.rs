//! Effective day classification.
//!
//! Combines the scheduled work/rest pattern with day exceptions to produce the
//! [`EffectiveDayType`] of one employee on one day.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::exceptions::ExceptionLookup;
use super::schedule::is_scheduled_work_day;
use crate::error::EngineResult;
use crate::models::{Employee, ExceptionKind, ScheduleAnchor};

/// What a day actually is for an employee once exceptions are applied.
///
/// Derived on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveDayType {
    /// A work day according to the cycle, with no exception.
    ScheduledWork,
    /// A rest day according to the cycle, with no exception.
    ScheduledRest,
    /// Sick leave.
    Sick,
    /// Paid vacation.
    VacationPaid,
    /// Unpaid vacation.
    VacationUnpaid,
    /// Work forced onto the day.
    WorkOverride,
}

impl EffectiveDayType {
    /// Every variant, in declaration order.
    pub const ALL: [EffectiveDayType; 6] = [
        EffectiveDayType::ScheduledWork,
        EffectiveDayType::ScheduledRest,
        EffectiveDayType::Sick,
        EffectiveDayType::VacationPaid,
        EffectiveDayType::VacationUnpaid,
        EffectiveDayType::WorkOverride,
    ];

    /// Returns true if the day contributes the daily rate to salary.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::calculation::EffectiveDayType;
    ///
    /// assert!(EffectiveDayType::WorkOverride.is_paid());
    /// assert!(EffectiveDayType::VacationPaid.is_paid());
    /// assert!(!EffectiveDayType::Sick.is_paid());
    /// ```
    pub fn is_paid(self) -> bool {
        matches!(
            self,
            EffectiveDayType::ScheduledWork
                | EffectiveDayType::VacationPaid
                | EffectiveDayType::WorkOverride
        )
    }
}

impl From<ExceptionKind> for EffectiveDayType {
    fn from(kind: ExceptionKind) -> Self {
        match kind {
            ExceptionKind::Sick => EffectiveDayType::Sick,
            ExceptionKind::VacationPaid => EffectiveDayType::VacationPaid,
            ExceptionKind::VacationUnpaid => EffectiveDayType::VacationUnpaid,
            ExceptionKind::WorkOverride => EffectiveDayType::WorkOverride,
        }
    }
}

impl fmt::Display for EffectiveDayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectiveDayType::ScheduledWork => write!(f, "Scheduled work"),
            EffectiveDayType::ScheduledRest => write!(f, "Scheduled rest"),
            EffectiveDayType::Sick => write!(f, "Sick"),
            EffectiveDayType::VacationPaid => write!(f, "Paid vacation"),
            EffectiveDayType::VacationUnpaid => write!(f, "Unpaid vacation"),
            EffectiveDayType::WorkOverride => write!(f, "Work override"),
        }
    }
}

/// Classifies one day for one employee.
///
/// An exception on the day wins outright. Without one, the employee's cycle
/// decides between [`EffectiveDayType::ScheduledWork`] and
/// [`EffectiveDayType::ScheduledRest`].
///
/// # Errors
///
/// Propagates any error returned by `exceptions`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{classify_day, EffectiveDayType, ExceptionStore};
/// use payroll_engine::models::{DayException, Employee, ExceptionKind, ScheduleAnchor, WorkCycle};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", Decimal::new(2000, 0), WorkCycle::five_two()).unwrap();
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
///
/// let mut exceptions = ExceptionStore::new();
/// let rest = classify_day(&employee, saturday, ScheduleAnchor::default(), &exceptions).unwrap();
/// assert_eq!(rest, EffectiveDayType::ScheduledRest);
///
/// exceptions.upsert(DayException::new("emp_001", saturday, ExceptionKind::WorkOverride));
/// let worked = classify_day(&employee, saturday, ScheduleAnchor::default(), &exceptions).unwrap();
/// assert!(worked.is_paid());
/// ```
pub fn classify_day<L>(
    employee: &Employee,
    date: NaiveDate,
    anchor: ScheduleAnchor,
    exceptions: &L,
) -> EngineResult<EffectiveDayType>
where
    L: ExceptionLookup + ?Sized,
{
    if let Some(kind) = exceptions.exception_for(&employee.id, date)? {
        return Ok(kind.into());
    }

    Ok(if is_scheduled_work_day(date, employee.cycle, anchor) {
        EffectiveDayType::ScheduledWork
    } else {
        EffectiveDayType::ScheduledRest
    })
}
