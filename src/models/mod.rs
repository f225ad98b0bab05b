//! Core data models for the Payroll Engine.
//!
//! This module contains the domain inputs (employees, schedules, exceptions,
//! ledger records), date ranges, and the aggregate report outputs.

mod employee;
mod exception;
mod finance;
mod period;
mod report;
mod schedule;

pub use employee::Employee;
pub use exception::{DayException, ExceptionKind};
pub use finance::{Frequency, RecurringExpense, Transaction, TransactionType};
pub use period::{DateRange, MonthKey};
pub use report::{AggregateReport, CategoryBreakdown, ExpenseSplit, MonthBucket, SummaryMetrics};
pub use schedule::{DEFAULT_ANCHOR_DATE, ScheduleAnchor, WorkCycle};
