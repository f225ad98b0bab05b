//! Day exception model.
//!
//! A [`DayException`] overrides an employee's scheduled classification on one
//! calendar day: sick leave, paid or unpaid vacation, or forced work.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of override recorded for a single day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ExceptionKind;
///
/// assert_eq!(serde_json::to_string(&ExceptionKind::VacationPaid).unwrap(), "\"vacation_paid\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionKind {
    /// Sick leave. Never salary-bearing.
    Sick,
    /// Paid vacation. Always salary-bearing.
    VacationPaid,
    /// Unpaid vacation. Never salary-bearing.
    VacationUnpaid,
    /// Work forced onto the day regardless of schedule. Always salary-bearing.
    WorkOverride,
}

/// A per-employee, per-day override of the schedule.
///
/// At most one exception exists per `(employee_id, date)`; writing another
/// replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayException {
    /// The employee the exception applies to.
    pub employee_id: String,
    /// The calendar day being overridden.
    pub date: NaiveDate,
    /// The override kind.
    pub kind: ExceptionKind,
    /// Free-form notes entered with the exception.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DayException {
    /// Creates an exception without notes.
    pub fn new(employee_id: impl Into<String>, date: NaiveDate, kind: ExceptionKind) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            kind,
            notes: None,
        }
    }

    /// Attaches notes to the exception.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
