//! Calculation logic for the Payroll Engine.
//!
//! This module contains schedule resolution against a repeating work cycle,
//! day exception lookup, effective day classification, salary accrual over date
//! ranges, recurring expense projection, and monthly period aggregation.

mod aggregation;
mod classifier;
mod exceptions;
mod payroll;
mod recurring;
mod schedule;

pub use aggregation::{AggregationInput, aggregate};
pub use classifier::{EffectiveDayType, classify_day};
pub use exceptions::{ExceptionLookup, ExceptionStore};
pub use payroll::{
    CalendarDay, PayrollResult, PayrollSummary, accrue_payroll, accrue_salary, day_calendar,
};
pub use recurring::{
    Occurrence, Occurrences, WEEKS_PER_MONTH, monthly_equivalent, monthly_equivalent_with,
    occurrences,
};
pub use schedule::{cycle_phase, is_scheduled_work_day};
