//! Period aggregation.
//!
//! Buckets transactions, recurring expenses and accrued salaries into calendar
//! months across a window and derives category breakdowns, the expense split
//! and summary metrics.
//!
//! Salaries are accrued per month, restricted to the days of the month that
//! fall inside the window, so a bucket's salary never depends on how the
//! surrounding window was chosen.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use super::exceptions::ExceptionLookup;
use super::payroll::{PayrollResult, accrue_salary};
use super::recurring::monthly_equivalent_with;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{
    AggregateReport, CategoryBreakdown, DateRange, Employee, ExpenseSplit, MonthBucket, MonthKey,
    RecurringExpense, SummaryMetrics, Transaction, TransactionType,
};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Everything a single aggregation needs, fully materialized by the caller.
///
/// Transactions and recurring expenses belonging to another business are
/// ignored, as are transactions dated outside the window and recurring
/// expenses created after the window's last month.
#[derive(Debug)]
pub struct AggregationInput<'a, L: ?Sized> {
    /// The business being reported on.
    pub business_id: Uuid,
    /// The inclusive reporting window.
    pub window: DateRange,
    /// The employee roster.
    pub employees: &'a [Employee],
    /// Day exception lookup for the roster.
    pub exceptions: &'a L,
    /// Ledger transactions.
    pub transactions: &'a [Transaction],
    /// Recurring expenses.
    pub recurring_expenses: &'a [RecurringExpense],
}

/// Builds the aggregate report for one business over one window.
///
/// # Steps
///
/// 1. One empty [`MonthBucket`] per calendar month touched by the window.
/// 2. Each transaction in the window is added to its month as income or expense.
/// 3. Each recurring expense adds its monthly equivalent to every bucket from
///    the month it was created in onward.
/// 4. Each employee's salary is accrued month by month over the days of the
///    month inside the window and added to that month's expenses.
/// 5. Category breakdown, expense split and summary metrics are derived from
///    the exact (unrounded) buckets.
///
/// An empty window yields no buckets and an all-zero summary; empty inputs
/// yield all-zero buckets.
///
/// # Errors
///
/// - `InvalidAmount` if a transaction dated inside the window, or a recurring
///   expense created by the end of the window's last month, has a negative
///   amount. Records that never reach the report are not checked. Inputs are
///   checked before any work.
/// - Any error returned by the exception lookup.
pub fn aggregate<L>(
    input: &AggregationInput<'_, L>,
    config: &EngineConfig,
) -> EngineResult<AggregateReport>
where
    L: ExceptionLookup + ?Sized,
{
    let window = input.window;
    // last day of the last bucket; nothing recurring reaches the report past it
    let horizon = (!window.is_empty()).then(|| MonthKey::from_date(window.end).last_day());

    let transactions: Vec<&Transaction> = input
        .transactions
        .iter()
        .filter(|t| t.business_id == input.business_id && window.contains(t.date))
        .collect();
    let recurring: Vec<&RecurringExpense> = input
        .recurring_expenses
        .iter()
        .filter(|e| e.business_id == input.business_id)
        .filter(|e| horizon.is_some_and(|last| e.created_on() <= last))
        .collect();

    for transaction in &transactions {
        transaction.validate()?;
    }
    for expense in &recurring {
        expense.validate()?;
    }

    info!(
        business_id = %input.business_id,
        start = %window.start,
        end = %window.end,
        employees = input.employees.len(),
        transactions = transactions.len(),
        recurring_expenses = recurring.len(),
        "Aggregating period"
    );

    let mut buckets: Vec<MonthBucket> = window.months().map(MonthBucket::new).collect();
    let index: BTreeMap<MonthKey, usize> = buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| (bucket.month, i))
        .collect();

    let mut categories = CategoryBreakdown::default();
    let mut split = ExpenseSplit::default();

    for transaction in &transactions {
        let Some(&i) = index.get(&MonthKey::from_date(transaction.date)) else {
            continue;
        };
        let bucket = &mut buckets[i];
        let by_category = match transaction.transaction_type {
            TransactionType::Income => {
                bucket.add_income(transaction.amount);
                &mut categories.income
            }
            TransactionType::Expense => {
                bucket.add_variable_expense(transaction.amount);
                split.variable += transaction.amount;
                &mut categories.expense
            }
        };
        *by_category
            .entry(transaction.category.clone())
            .or_insert(Decimal::ZERO) += transaction.amount;
    }

    for expense in &recurring {
        let monthly = monthly_equivalent_with(expense, config.recurring.weeks_per_month);
        let created_on = expense.created_on();
        for bucket in buckets.iter_mut().filter(|b| b.month.last_day() >= created_on) {
            bucket.add_fixed_expense(monthly);
            split.fixed += monthly;
        }
    }

    let mut payroll = Vec::with_capacity(input.employees.len());
    for employee in input.employees {
        let mut total = PayrollResult::empty(employee.id.clone());
        for bucket in buckets.iter_mut() {
            let Some(days) = DateRange::for_month(bucket.month).intersect(&window) else {
                continue;
            };
            let accrued = accrue_salary(employee, days, config.anchor(), input.exceptions)?;
            bucket.add_salary_expense(accrued.salary);
            split.salary += accrued.salary;
            total.merge(&accrued);
        }
        payroll.push(total);
    }

    let summary = summarize(&buckets, config.reporting.trend_window_months as usize);

    info!(
        business_id = %input.business_id,
        months = buckets.len(),
        total_income = %summary.total_income,
        total_expenses = %summary.total_expenses,
        "Aggregated period"
    );

    Ok(AggregateReport {
        business_id: input.business_id,
        window,
        buckets,
        categories,
        expense_split: split,
        payroll,
        summary,
    })
}

/// Derives scalar metrics from a bucket series.
fn summarize(buckets: &[MonthBucket], trend_window: usize) -> SummaryMetrics {
    let total_income: Decimal = buckets.iter().map(|b| b.income).sum();
    let total_expenses: Decimal = buckets.iter().map(|b| b.expense).sum();
    let net_profit = total_income - total_expenses;
    let month_count = buckets.len();

    let per_month = |total: Decimal| {
        if month_count == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(month_count)
        }
    };

    let profits: Vec<Decimal> = buckets.iter().map(|b| b.profit).collect();

    SummaryMetrics {
        month_count: month_count as u32,
        total_income,
        total_expenses,
        net_profit,
        efficiency: percentage(total_income, total_expenses),
        profit_margin: percentage(net_profit, total_income),
        trend: trend(&profits, trend_window),
        average_monthly_income: per_month(total_income),
        average_monthly_expense: per_month(total_expenses),
        average_monthly_profit: per_month(net_profit),
    }
}

/// `numerator / denominator × 100`, zero when `denominator` is zero.
///
/// A ratio too large for a `Decimal` saturates to `Decimal::MAX` or
/// `Decimal::MIN` according to its sign.
fn percentage(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or_else(|| {
            saturated(numerator.is_sign_negative() != denominator.is_sign_negative())
        })
}

fn saturated(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

/// Percentage change of the average of the last `window` profits against the
/// average of up to `window` profits immediately before them.
///
/// Zero when there are no prior months or the prior average is exactly zero.
/// A prior average close to zero is not guarded and can give very large values,
/// saturating at `Decimal::MAX` or `Decimal::MIN` like [`percentage`].
fn trend(profits: &[Decimal], window: usize) -> Decimal {
    let recent_start = profits.len().saturating_sub(window);
    let prior_start = recent_start.saturating_sub(window);
    let recent = &profits[recent_start..];
    let prior = &profits[prior_start..recent_start];

    if recent.is_empty() || prior.is_empty() {
        return Decimal::ZERO;
    }

    let recent_avg = average(recent);
    let prior_avg = average(prior);
    if prior_avg.is_zero() {
        debug!("Prior profit average is zero, reporting flat trend");
        return Decimal::ZERO;
    }

    match recent_avg.checked_sub(prior_avg) {
        Some(change) => percentage(change, prior_avg),
        // only averages of opposite sign overflow, so the change has recent_avg's sign
        None => saturated(recent_avg.is_sign_negative() != prior_avg.is_sign_negative()),
    }
}

fn average(values: &[Decimal]) -> Decimal {
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}
