//! Recurring expense projection.
//!
//! A recurring expense can be viewed two ways: as an average amount per month
//! for dashboards, or as a list of dated charges for itemized exports.

use std::iter::FusedIterator;

use chrono::{Datelike, Duration, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::{DateRange, Frequency, RecurringExpense};

/// Default weekly-to-monthly conversion factor (4.33 weeks per month).
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Returns the average amount the expense costs per month.
///
/// Monthly amounts are unchanged, weekly amounts are multiplied by
/// [`WEEKS_PER_MONTH`] and yearly amounts are divided by twelve. Nothing is
/// rounded.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::monthly_equivalent;
/// use payroll_engine::models::{Frequency, RecurringExpense};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let weekly = RecurringExpense::new(Uuid::new_v4(), "Cleaning", Decimal::new(300, 0), Frequency::Weekly, Utc::now());
/// assert_eq!(monthly_equivalent(&weekly), Decimal::new(1299, 0));
/// ```
pub fn monthly_equivalent(expense: &RecurringExpense) -> Decimal {
    monthly_equivalent_with(expense, WEEKS_PER_MONTH)
}

/// Same as [`monthly_equivalent`] with an explicit weekly factor.
pub fn monthly_equivalent_with(expense: &RecurringExpense, weeks_per_month: Decimal) -> Decimal {
    match expense.frequency {
        Frequency::Monthly => expense.amount,
        Frequency::Weekly => expense.amount * weeks_per_month,
        Frequency::Yearly => expense.amount / MONTHS_PER_YEAR,
    }
}

/// One dated charge of a recurring expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// The recurring expense this charge comes from.
    pub expense_id: Uuid,
    /// The day the charge falls on.
    pub date: NaiveDate,
    /// The charged amount.
    pub amount: Decimal,
    /// The expense's category.
    pub category: String,
}

/// Lazy, finite sequence of [`Occurrence`]s within a range.
///
/// Created by [`occurrences`]. Once exhausted it stays exhausted.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    expense: &'a RecurringExpense,
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.next.filter(|date| *date <= self.end)?;
        self.next = step(date, self.expense.frequency);
        if self.next.is_some_and(|next| next > self.end) {
            self.next = None;
        }
        Some(Occurrence {
            expense_id: self.expense.id,
            date,
            amount: self.expense.amount,
            category: self.expense.category.clone(),
        })
    }
}

impl FusedIterator for Occurrences<'_> {}

/// Expands a recurring expense into its charges within `range`.
///
/// The walk starts at the later of the expense's creation day and
/// `range.start`. Monthly expenses are charged on the 1st of each month, weekly
/// expenses every Monday and yearly expenses on January 1st. Charges after
/// `range.end` are never produced.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::occurrences;
/// use payroll_engine::models::{DateRange, Frequency, RecurringExpense};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let created = Utc.with_ymd_and_hms(2026, 1, 20, 9, 0, 0).unwrap();
/// let rent = RecurringExpense::new(Uuid::new_v4(), "Rent", Decimal::new(9000, 0), Frequency::Monthly, created);
/// let range = DateRange::parse("2026-01-01", "2026-04-15").unwrap();
///
/// let dates: Vec<_> = occurrences(&rent, range).map(|o| o.date.to_string()).collect();
/// assert_eq!(dates, vec!["2026-02-01", "2026-03-01", "2026-04-01"]);
/// ```
pub fn occurrences(expense: &RecurringExpense, range: DateRange) -> Occurrences<'_> {
    let start = expense.created_on().max(range.start);
    let first = if range.is_empty() {
        None
    } else {
        first_charge_on_or_after(start, expense.frequency)
    };

    debug!(
        expense_id = %expense.id,
        frequency = ?expense.frequency,
        start = %start,
        end = %range.end,
        "Projecting recurring expense occurrences"
    );

    Occurrences {
        expense,
        next: first,
        end: range.end,
    }
}

fn first_charge_on_or_after(date: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::Monthly => {
            if date.day() == 1 {
                Some(date)
            } else {
                date.with_day(1)?.checked_add_months(Months::new(1))
            }
        }
        Frequency::Weekly => {
            let days_to_monday = (7 - date.weekday().num_days_from_monday()) % 7;
            date.checked_add_signed(Duration::days(i64::from(days_to_monday)))
        }
        Frequency::Yearly => {
            let jan_first = NaiveDate::from_ymd_opt(date.year(), 1, 1)?;
            if date == jan_first {
                Some(date)
            } else {
                NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
            }
        }
    }
}

fn step(date: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::Weekly => date.checked_add_signed(Duration::days(7)),
        Frequency::Yearly => date.checked_add_months(Months::new(12)),
    }
}
