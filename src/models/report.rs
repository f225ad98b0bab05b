//! Aggregate report models.
//!
//! This module contains the [`AggregateReport`] type and its parts: the monthly
//! series, category breakdowns, the fixed/variable/salary split and the summary
//! metrics. All amounts are kept exact; [`AggregateReport::rounded`] produces
//! the presentation copy.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DateRange, MonthKey};
use crate::calculation::PayrollResult;
use crate::config::ReportingConfig;

/// Percentages are always presented with two decimal places.
const PERCENT_SCALE: u32 = 2;

fn round(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// One calendar month of the report series.
///
/// `expense` is the sum of the three expense parts; `profit` is always
/// `income - expense`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// The calendar month.
    pub month: MonthKey,
    /// Income transactions booked in the month.
    pub income: Decimal,
    /// Total expenses of the month.
    pub expense: Decimal,
    /// `income - expense`.
    pub profit: Decimal,
    /// Expense transactions booked in the month.
    pub variable_expense: Decimal,
    /// Monthly equivalents of active recurring expenses.
    pub fixed_expense: Decimal,
    /// Salary accrued on days of the month inside the window.
    pub salary_expense: Decimal,
}

impl MonthBucket {
    /// An empty bucket for the given month.
    pub fn new(month: MonthKey) -> Self {
        Self {
            month,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            profit: Decimal::ZERO,
            variable_expense: Decimal::ZERO,
            fixed_expense: Decimal::ZERO,
            salary_expense: Decimal::ZERO,
        }
    }

    /// Adds income.
    pub fn add_income(&mut self, amount: Decimal) {
        self.income += amount;
        self.refresh();
    }

    /// Adds an ad-hoc expense.
    pub fn add_variable_expense(&mut self, amount: Decimal) {
        self.variable_expense += amount;
        self.refresh();
    }

    /// Adds a recurring expense's monthly contribution.
    pub fn add_fixed_expense(&mut self, amount: Decimal) {
        self.fixed_expense += amount;
        self.refresh();
    }

    /// Adds accrued salary.
    pub fn add_salary_expense(&mut self, amount: Decimal) {
        self.salary_expense += amount;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.expense = self.variable_expense + self.fixed_expense + self.salary_expense;
        self.profit = self.income - self.expense;
    }

    fn rounded(&self, scale: u32) -> Self {
        let mut bucket = Self::new(self.month);
        bucket.income = round(self.income, scale);
        bucket.variable_expense = round(self.variable_expense, scale);
        bucket.fixed_expense = round(self.fixed_expense, scale);
        bucket.salary_expense = round(self.salary_expense, scale);
        bucket.expense = round(self.expense, scale);
        bucket.profit = round(self.profit, scale);
        bucket
    }
}

/// Transaction totals per category, income and expense kept apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Income per category.
    pub income: BTreeMap<String, Decimal>,
    /// Expense per category.
    pub expense: BTreeMap<String, Decimal>,
}

impl CategoryBreakdown {
    fn rounded(&self, scale: u32) -> Self {
        let round_map = |map: &BTreeMap<String, Decimal>| {
            map.iter()
                .map(|(category, amount)| (category.clone(), round(*amount, scale)))
                .collect()
        };
        Self {
            income: round_map(&self.income),
            expense: round_map(&self.expense),
        }
    }
}

/// Expenses split by origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSplit {
    /// Recurring expenses, as monthly equivalents summed over the window's months.
    pub fixed: Decimal,
    /// Expense transactions.
    pub variable: Decimal,
    /// Accrued salaries.
    pub salary: Decimal,
}

impl ExpenseSplit {
    /// Sum of all three parts.
    pub fn total(&self) -> Decimal {
        self.fixed + self.variable + self.salary
    }

    fn rounded(&self, scale: u32) -> Self {
        Self {
            fixed: round(self.fixed, scale),
            variable: round(self.variable, scale),
            salary: round(self.salary, scale),
        }
    }
}

/// Scalar summary of a report.
///
/// Carries no series, only the headline figures of the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Number of months in the series.
    pub month_count: u32,
    /// Sum of all bucket income.
    pub total_income: Decimal,
    /// Sum of all bucket expenses.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`.
    pub net_profit: Decimal,
    /// `total_income / total_expenses × 100`, zero without expenses.
    pub efficiency: Decimal,
    /// `net_profit / total_income × 100`, zero without income.
    pub profit_margin: Decimal,
    /// Percentage change of average profit over the trailing months versus the
    /// months before them; zero when there is nothing to compare against.
    pub trend: Decimal,
    /// Average income per month.
    pub average_monthly_income: Decimal,
    /// Average expenses per month.
    pub average_monthly_expense: Decimal,
    /// Average profit per month.
    pub average_monthly_profit: Decimal,
}

impl SummaryMetrics {
    fn rounded(&self, scale: u32) -> Self {
        Self {
            month_count: self.month_count,
            total_income: round(self.total_income, scale),
            total_expenses: round(self.total_expenses, scale),
            net_profit: round(self.net_profit, scale),
            efficiency: round(self.efficiency, PERCENT_SCALE),
            profit_margin: round(self.profit_margin, PERCENT_SCALE),
            trend: round(self.trend, PERCENT_SCALE),
            average_monthly_income: round(self.average_monthly_income, scale),
            average_monthly_expense: round(self.average_monthly_expense, scale),
            average_monthly_profit: round(self.average_monthly_profit, scale),
        }
    }
}

/// The complete result of aggregating a business over a window.
///
/// Recomputed from scratch on every request. Amounts are exact; call
/// [`AggregateReport::rounded`] before display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// The business the report covers.
    pub business_id: Uuid,
    /// The requested window.
    pub window: DateRange,
    /// One bucket per calendar month touched by the window, ascending.
    pub buckets: Vec<MonthBucket>,
    /// Transaction totals per category.
    pub categories: CategoryBreakdown,
    /// Expenses by origin.
    pub expense_split: ExpenseSplit,
    /// Per-employee payroll over the window, in roster order.
    pub payroll: Vec<PayrollResult>,
    /// Scalar summary.
    pub summary: SummaryMetrics,
}

impl AggregateReport {
    /// Returns a copy with every amount rounded half away from zero to
    /// `scale` decimal places. Percentages keep two decimal places.
    pub fn rounded(&self, scale: u32) -> Self {
        Self {
            business_id: self.business_id,
            window: self.window,
            buckets: self.buckets.iter().map(|b| b.rounded(scale)).collect(),
            categories: self.categories.rounded(scale),
            expense_split: self.expense_split.rounded(scale),
            payroll: self
                .payroll
                .iter()
                .map(|p| {
                    let mut p = p.clone();
                    p.salary = round(p.salary, scale);
                    p
                })
                .collect(),
            summary: self.summary.rounded(scale),
        }
    }

    /// Rounds with the configured `reporting.currency_scale`.
    ///
    /// Shorthand for `self.rounded(reporting.currency_scale)`.
    pub fn rounded_for(&self, reporting: &ReportingConfig) -> Self {
        self.rounded(reporting.currency_scale)
    }

    /// The scalar summary only.
    pub fn summary(&self) -> &SummaryMetrics {
        &self.summary
    }
}
