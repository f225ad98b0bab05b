//! Payroll Schedule Resolution & Financial Aggregation Engine
//!
//! This crate decides which days an employee is scheduled to work under a
//! repeating work/rest cycle, applies per-day exceptions, accrues salary over
//! arbitrary date ranges, and aggregates salaries, transactions and recurring
//! expenses into monthly income/expense/profit reports.
//!
//! All computation is pure: callers load employees, exceptions and ledger
//! records first and pass them in as snapshots.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
