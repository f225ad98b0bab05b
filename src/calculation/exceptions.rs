//! Day exception lookup.
//!
//! Classification asks an [`ExceptionLookup`] whether an employee has an
//! override on a given day. The in-memory [`ExceptionStore`] is the usual
//! implementation; any closure with the right signature also works, which lets
//! a caller put a real persistence query behind the same seam.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{DateRange, DayException, ExceptionKind};

/// Answers "does this employee have an exception on this day?".
///
/// Keys are the employee id and a calendar day, never a formatted string.
/// A failing lookup must return an error rather than `Ok(None)`, so that an
/// unreachable store is never mistaken for "no exception".
pub trait ExceptionLookup {
    /// Returns the exception kind recorded for `(employee_id, date)`, if any.
    fn exception_for(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Option<ExceptionKind>>;
}

impl<F> ExceptionLookup for F
where
    F: Fn(&str, NaiveDate) -> EngineResult<Option<ExceptionKind>>,
{
    fn exception_for(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Option<ExceptionKind>> {
        self(employee_id, date)
    }
}

/// An in-memory snapshot of day exceptions, unique per employee and day.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{ExceptionLookup, ExceptionStore};
/// use payroll_engine::models::{DayException, ExceptionKind};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
/// let mut store = ExceptionStore::new();
/// store.upsert(DayException::new("emp_001", date, ExceptionKind::Sick));
/// store.upsert(DayException::new("emp_001", date, ExceptionKind::VacationPaid));
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(
///     store.exception_for("emp_001", date).unwrap(),
///     Some(ExceptionKind::VacationPaid)
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExceptionStore {
    by_employee: HashMap<String, BTreeMap<NaiveDate, DayException>>,
}

impl ExceptionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from records, applying them in order so that a later
    /// record for the same employee and day replaces an earlier one.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = DayException>,
    {
        let mut store = Self::new();
        for record in records {
            store.upsert(record);
        }
        store
    }

    /// Inserts or replaces the exception for its employee and day.
    ///
    /// Returns the exception it replaced, if any.
    pub fn upsert(&mut self, exception: DayException) -> Option<DayException> {
        self.by_employee
            .entry(exception.employee_id.clone())
            .or_default()
            .insert(exception.date, exception)
    }

    /// Deletes the exception for `(employee_id, date)`, returning it.
    pub fn remove(&mut self, employee_id: &str, date: NaiveDate) -> Option<DayException> {
        let days = self.by_employee.get_mut(employee_id)?;
        let removed = days.remove(&date);
        if days.is_empty() {
            self.by_employee.remove(employee_id);
        }
        removed
    }

    /// Deletes every exception of an employee, returning how many were removed.
    pub fn remove_employee(&mut self, employee_id: &str) -> usize {
        self.by_employee
            .remove(employee_id)
            .map_or(0, |days| days.len())
    }

    /// Returns the full exception record for `(employee_id, date)`.
    pub fn get(&self, employee_id: &str, date: NaiveDate) -> Option<&DayException> {
        self.by_employee.get(employee_id)?.get(&date)
    }

    /// Lists an employee's exceptions inside `range`, in date order.
    pub fn in_range<'a>(
        &'a self,
        employee_id: &str,
        range: DateRange,
    ) -> impl Iterator<Item = &'a DayException> + 'a {
        let days = if range.is_empty() {
            None
        } else {
            self.by_employee.get(employee_id)
        };
        days.into_iter()
            .flat_map(move |days| days.range(range.start..=range.end).map(|(_, e)| e))
    }

    /// Total number of stored exceptions.
    pub fn len(&self) -> usize {
        self.by_employee.values().map(BTreeMap::len).sum()
    }

    /// Returns true if no exceptions are stored.
    pub fn is_empty(&self) -> bool {
        self.by_employee.is_empty()
    }
}

impl ExceptionLookup for ExceptionStore {
    fn exception_for(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Option<ExceptionKind>> {
        Ok(self.get(employee_id, date).map(|e| e.kind))
    }
}
