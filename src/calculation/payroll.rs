//! Salary accrual over date ranges.
//!
//! This module walks a date range day by day for one or many employees,
//! classifies every day and sums the salary-bearing ones. Accruing a year at
//! once and accruing each month separately then merging give identical totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classifier::{EffectiveDayType, classify_day};
use super::exceptions::ExceptionLookup;
use crate::error::EngineResult;
use crate::models::{DateRange, Employee, ScheduleAnchor};

/// Accrued salary and day counts for one employee over one range.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{accrue_salary, ExceptionStore};
/// use payroll_engine::models::{DateRange, Employee, ScheduleAnchor, WorkCycle};
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", Decimal::new(100, 0), WorkCycle::five_two()).unwrap();
/// // Monday 2026-01-12 to Sunday 2026-01-18
/// let week = DateRange::parse("2026-01-12", "2026-01-18").unwrap();
///
/// let result = accrue_salary(&employee, week, ScheduleAnchor::default(), &ExceptionStore::new()).unwrap();
/// assert_eq!(result.paid_days, 5);
/// assert_eq!(result.salary, Decimal::new(500, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The employee the result belongs to.
    pub employee_id: String,
    /// Number of salary-bearing days.
    pub paid_days: u32,
    /// `paid_days × daily_rate`, unrounded.
    pub salary: Decimal,
    /// How many days of each effective type the range contained.
    pub counts_by_type: BTreeMap<EffectiveDayType, u32>,
}

impl PayrollResult {
    /// A zero-valued result, as produced by an empty range.
    pub fn empty(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            paid_days: 0,
            salary: Decimal::ZERO,
            counts_by_type: BTreeMap::new(),
        }
    }

    /// Number of days of the given type, zero if none.
    pub fn count(&self, day_type: EffectiveDayType) -> u32 {
        self.counts_by_type.get(&day_type).copied().unwrap_or(0)
    }

    /// Total number of days walked.
    pub fn total_days(&self) -> u32 {
        self.counts_by_type.values().sum()
    }

    /// Adds another result for the same employee into this one.
    ///
    /// Used to build a long-range result out of per-month results.
    pub fn merge(&mut self, other: &PayrollResult) {
        debug_assert_eq!(self.employee_id, other.employee_id);
        self.paid_days += other.paid_days;
        self.salary += other.salary;
        for (day_type, count) in &other.counts_by_type {
            *self.counts_by_type.entry(*day_type).or_insert(0) += count;
        }
    }
}

/// One classified day in an employee's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The calendar day.
    pub date: NaiveDate,
    /// The effective classification.
    pub day_type: EffectiveDayType,
    /// Whether the day is salary-bearing.
    pub is_paid: bool,
    /// The amount accrued on this day, zero when unpaid.
    pub amount: Decimal,
}

/// Accrues salary for one employee over an inclusive date range.
///
/// Every day from `range.start` to `range.end` is classified with
/// [`classify_day`]; salary-bearing days each contribute the employee's daily
/// rate. An inverted range yields a zero-valued result rather than an error.
///
/// # Arguments
///
/// * `employee` - The employee to accrue for
/// * `range` - The inclusive window to walk
/// * `anchor` - The schedule phase-zero date
/// * `exceptions` - Lookup for per-day overrides
///
/// # Errors
///
/// Returns the first error produced by `exceptions`; no partial result is
/// returned in that case.
pub fn accrue_salary<L>(
    employee: &Employee,
    range: DateRange,
    anchor: ScheduleAnchor,
    exceptions: &L,
) -> EngineResult<PayrollResult>
where
    L: ExceptionLookup + ?Sized,
{
    let mut result = PayrollResult::empty(employee.id.clone());

    for date in range.days() {
        let day_type = classify_day(employee, date, anchor, exceptions)?;
        if day_type.is_paid() {
            result.paid_days += 1;
        }
        *result.counts_by_type.entry(day_type).or_insert(0) += 1;
    }
    result.salary = Decimal::from(result.paid_days) * employee.daily_rate;

    debug!(
        employee_id = %employee.id,
        start = %range.start,
        end = %range.end,
        paid_days = result.paid_days,
        salary = %result.salary,
        "Accrued salary"
    );

    Ok(result)
}

/// Payroll for several employees over the same range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The range that was accrued.
    pub range: DateRange,
    /// One result per employee, in input order.
    pub employees: Vec<PayrollResult>,
    /// Sum of all employees' paid days.
    pub total_paid_days: u32,
    /// Sum of all employees' salaries, unrounded.
    pub total_salary: Decimal,
}

/// Accrues salary for every employee over the same range.
///
/// Employees are independent of one another; totals are plain sums of the
/// per-employee results.
pub fn accrue_payroll<L>(
    employees: &[Employee],
    range: DateRange,
    anchor: ScheduleAnchor,
    exceptions: &L,
) -> EngineResult<PayrollSummary>
where
    L: ExceptionLookup + ?Sized,
{
    let results = employees
        .iter()
        .map(|employee| accrue_salary(employee, range, anchor, exceptions))
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(PayrollSummary {
        range,
        total_paid_days: results.iter().map(|r| r.paid_days).sum(),
        total_salary: results.iter().map(|r| r.salary).sum(),
        employees: results,
    })
}

/// Lists every day of the range with its classification and accrued amount.
///
/// This is the per-day view behind an employee calendar; summing `amount`
/// over the result equals the salary returned by [`accrue_salary`] for the
/// same inputs.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{day_calendar, EffectiveDayType, ExceptionStore};
/// use payroll_engine::models::{DateRange, Employee, ScheduleAnchor, WorkCycle};
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", Decimal::new(100, 0), WorkCycle::five_two()).unwrap();
/// // Friday 2026-01-16 and Saturday 2026-01-17
/// let range = DateRange::parse("2026-01-16", "2026-01-17").unwrap();
///
/// let days = day_calendar(&employee, range, ScheduleAnchor::default(), &ExceptionStore::new()).unwrap();
/// assert_eq!(days[0].day_type, EffectiveDayType::ScheduledWork);
/// assert_eq!(days[1].amount, Decimal::ZERO);
/// ```
pub fn day_calendar<L>(
    employee: &Employee,
    range: DateRange,
    anchor: ScheduleAnchor,
    exceptions: &L,
) -> EngineResult<Vec<CalendarDay>>
where
    L: ExceptionLookup + ?Sized,
{
    range
        .days()
        .map(|date| {
            let day_type = classify_day(employee, date, anchor, exceptions)?;
            let is_paid = day_type.is_paid();
            Ok(CalendarDay {
                date,
                day_type,
                is_paid,
                amount: if is_paid {
                    employee.daily_rate
                } else {
                    Decimal::ZERO
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::ExceptionStore;
    use crate::error::EngineError;
    use crate::models::{DayException, ExceptionKind, MonthKey, WorkCycle};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(make_date(start), make_date(end))
    }

    fn employee(id: &str, rate: &str, work: u32, rest: u32) -> Employee {
        Employee::new(id, dec(rate), WorkCycle::new(work, rest).unwrap()).unwrap()
    }

    fn anchor() -> ScheduleAnchor {
        ScheduleAnchor::default()
    }

    // ==========================================================================
    // PA-001: plain month on a 5/2 cycle
    // ==========================================================================
    #[test]
    fn test_pa_001_plain_month() {
        // March 2026: starts on a Sunday, 22 weekdays
        let result = accrue_salary(
            &employee("emp_001", "2000", 5, 2),
            range("2026-03-01", "2026-03-31"),
            anchor(),
            &ExceptionStore::new(),
        )
        .unwrap();

        assert_eq!(result.paid_days, 22);
        assert_eq!(result.salary, dec("44000"));
        assert_eq!(result.count(EffectiveDayType::ScheduledWork), 22);
        assert_eq!(result.count(EffectiveDayType::ScheduledRest), 9);
        assert_eq!(result.total_days(), 31);
    }

    // ==========================================================================
    // PA-002: exceptions move days between paid and unpaid
    // ==========================================================================
    #[test]
    fn test_pa_002_exceptions_adjust_paid_days() {
        let store = ExceptionStore::from_records([
            // Monday: sick
            DayException::new("emp_001", make_date("2026-03-02"), ExceptionKind::Sick),
            // Tuesday: unpaid vacation
            DayException::new("emp_001", make_date("2026-03-03"), ExceptionKind::VacationUnpaid),
            // Wednesday: paid vacation, still paid
            DayException::new("emp_001", make_date("2026-03-04"), ExceptionKind::VacationPaid),
            // Saturday: override
            DayException::new("emp_001", make_date("2026-03-07"), ExceptionKind::WorkOverride),
        ]);

        let result = accrue_salary(
            &employee("emp_001", "2000", 5, 2),
            range("2026-03-01", "2026-03-31"),
            anchor(),
            &store,
        )
        .unwrap();

        assert_eq!(result.paid_days, 22 - 2 + 1);
        assert_eq!(result.salary, dec("42000"));
        assert_eq!(result.count(EffectiveDayType::Sick), 1);
        assert_eq!(result.count(EffectiveDayType::VacationUnpaid), 1);
        assert_eq!(result.count(EffectiveDayType::VacationPaid), 1);
        assert_eq!(result.count(EffectiveDayType::WorkOverride), 1);
        assert_eq!(result.count(EffectiveDayType::ScheduledWork), 19);
        assert_eq!(result.count(EffectiveDayType::ScheduledRest), 8);
    }

    // ==========================================================================
    // PA-003: inverted range is zero, not an error
    // ==========================================================================
    #[test]
    fn test_pa_003_inverted_range_is_zero() {
        let result = accrue_salary(
            &employee("emp_001", "2000", 5, 2),
            range("2026-03-10", "2026-03-01"),
            anchor(),
            &ExceptionStore::new(),
        )
        .unwrap();

        assert_eq!(result.paid_days, 0);
        assert_eq!(result.salary, Decimal::ZERO);
        assert!(result.counts_by_type.is_empty());
    }

    // ==========================================================================
    // PA-004: year equals sum of months
    // ==========================================================================
    #[test]
    fn test_pa_004_year_equals_sum_of_months() {
        let worker = employee("emp_001", "137.45", 2, 2);
        let store = ExceptionStore::from_records([
            DayException::new("emp_001", make_date("2024-02-29"), ExceptionKind::WorkOverride),
            DayException::new("emp_001", make_date("2024-07-15"), ExceptionKind::Sick),
            DayException::new("emp_001", make_date("2024-12-31"), ExceptionKind::VacationPaid),
        ]);

        let year = accrue_salary(&worker, range("2024-01-01", "2024-12-31"), anchor(), &store).unwrap();

        let mut merged = PayrollResult::empty("emp_001");
        for month in range("2024-01-01", "2024-12-31").months() {
            let part = accrue_salary(&worker, DateRange::for_month(month), anchor(), &store).unwrap();
            merged.merge(&part);
        }

        assert_eq!(merged, year);
        assert_eq!(year.total_days(), 366);
    }

    // ==========================================================================
    // PA-005: zero daily rate accrues nothing but still counts days
    // ==========================================================================
    #[test]
    fn test_pa_005_zero_rate() {
        let result = accrue_salary(
            &employee("intern", "0", 5, 2),
            range("2026-03-02", "2026-03-06"),
            anchor(),
            &ExceptionStore::new(),
        )
        .unwrap();
        assert_eq!(result.paid_days, 5);
        assert_eq!(result.salary, Decimal::ZERO);
    }

    // ==========================================================================
    // PA-006: lookup failure aborts the walk
    // ==========================================================================
    #[test]
    fn test_pa_006_lookup_failure_propagates() {
        let failing_after = make_date("2026-03-15");
        let lookup = |employee_id: &str, date: NaiveDate| -> EngineResult<Option<ExceptionKind>> {
            if date >= failing_after {
                Err(EngineError::LookupFailure {
                    employee_id: employee_id.to_string(),
                    date,
                    message: "connection lost".to_string(),
                })
            } else {
                Ok(None)
            }
        };

        let result = accrue_salary(
            &employee("emp_001", "2000", 5, 2),
            range("2026-03-01", "2026-03-31"),
            anchor(),
            &lookup,
        );
        assert!(matches!(result, Err(EngineError::LookupFailure { .. })));
    }

    #[test]
    fn test_accrue_payroll_sums_employees() {
        let staff = vec![
            employee("emp_001", "2000", 5, 2),
            employee("emp_002", "1500", 2, 2),
        ];
        let store = ExceptionStore::new();
        let week = range("2026-03-02", "2026-03-08");

        let summary = accrue_payroll(&staff, week, anchor(), &store).unwrap();

        assert_eq!(summary.employees.len(), 2);
        assert_eq!(summary.employees[0].employee_id, "emp_001");
        assert_eq!(
            summary.total_paid_days,
            summary.employees.iter().map(|r| r.paid_days).sum::<u32>()
        );
        assert_eq!(
            summary.total_salary,
            summary.employees[0].salary + summary.employees[1].salary
        );
    }

    #[test]
    fn test_accrue_payroll_empty_roster() {
        let summary = accrue_payroll(
            &[],
            range("2026-01-01", "2026-12-31"),
            anchor(),
            &ExceptionStore::new(),
        )
        .unwrap();
        assert!(summary.employees.is_empty());
        assert_eq!(summary.total_salary, Decimal::ZERO);
    }

    #[test]
    fn test_day_calendar_amounts_sum_to_salary() {
        let worker = employee("emp_001", "2000", 5, 2);
        let store = ExceptionStore::from_records([DayException::new(
            "emp_001",
            make_date("2026-03-10"),
            ExceptionKind::Sick,
        )]);
        let march = DateRange::for_month(MonthKey::new(2026, 3).unwrap());

        let days = day_calendar(&worker, march, anchor(), &store).unwrap();
        let accrued = accrue_salary(&worker, march, anchor(), &store).unwrap();

        assert_eq!(days.len(), 31);
        assert_eq!(days.iter().map(|d| d.amount).sum::<Decimal>(), accrued.salary);
        let sick = days.iter().find(|d| d.date == make_date("2026-03-10")).unwrap();
        assert_eq!(sick.day_type, EffectiveDayType::Sick);
        assert!(!sick.is_paid);
    }

    #[test]
    fn test_payroll_result_serializes_counts_by_name() {
        let result = accrue_salary(
            &employee("emp_001", "10", 5, 2),
            range("2026-03-02", "2026-03-02"),
            anchor(),
            &ExceptionStore::new(),
        )
        .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["counts_by_type"]["scheduled_work"], 1);
        assert_eq!(json["salary"], "10");
    }
}
