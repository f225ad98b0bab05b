//! Ledger inputs: ad-hoc transactions and recurring expenses.
//!
//! Both are read-only snapshots owned by the finance side of the application;
//! the engine only sums them and derives monthly equivalents and occurrence
//! dates from them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Direction of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

/// A single dated ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction.
    pub id: Uuid,
    /// The business that owns the transaction.
    pub business_id: Uuid,
    /// The calendar day the transaction is booked on.
    pub date: NaiveDate,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Free-form category label used for breakdowns.
    pub category: String,
    /// The non-negative amount.
    pub amount: Decimal,
}

impl Transaction {
    /// Creates a transaction with a fresh id.
    pub fn new(
        business_id: Uuid,
        date: NaiveDate,
        transaction_type: TransactionType,
        category: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            business_id,
            date,
            transaction_type,
            category: category.into(),
            amount,
        }
    }

    /// Rejects negative amounts.
    pub fn validate(&self) -> EngineResult<()> {
        ensure_non_negative("transaction", self.id, self.amount)
    }
}

/// How often a recurring expense is charged.
///
/// The set is closed: an unknown frequency fails at deserialization instead of
/// silently contributing nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Charged every Monday.
    Weekly,
    /// Charged on the first day of every month.
    Monthly,
    /// Charged on the first of January.
    Yearly,
}

/// A fixed cost charged on a regular cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringExpense {
    /// Unique identifier for the recurring expense.
    pub id: Uuid,
    /// The business that owns the expense.
    pub business_id: Uuid,
    /// Human readable name, e.g. "Office rent".
    pub name: String,
    /// Category used when the expense is itemized.
    #[serde(default = "default_recurring_category")]
    pub category: String,
    /// The non-negative amount charged per occurrence.
    pub amount: Decimal,
    /// How often the amount is charged.
    pub frequency: Frequency,
    /// When the expense was recorded; no occurrence precedes it.
    pub created_at: DateTime<Utc>,
}

fn default_recurring_category() -> String {
    "recurring".to_string()
}

impl RecurringExpense {
    /// Creates a recurring expense with a fresh id and the default category.
    pub fn new(
        business_id: Uuid,
        name: impl Into<String>,
        amount: Decimal,
        frequency: Frequency,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            business_id,
            name: name.into(),
            category: default_recurring_category(),
            amount,
            frequency,
            created_at,
        }
    }

    /// The calendar day the expense was created on (UTC).
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Rejects negative amounts.
    pub fn validate(&self) -> EngineResult<()> {
        ensure_non_negative("recurring expense", self.id, self.amount)
    }
}

fn ensure_non_negative(source_kind: &str, id: Uuid, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            source_kind: source_kind.to_string(),
            message: format!("{} on record {} is negative", amount, id),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_transaction_uses_type_field() {
        let json = r#"{
            "id": "6f1c1f7e-8a51-4c1b-9f34-3f4a0d2b9a10",
            "business_id": "0b4f6a8e-1c2d-4e5f-8a9b-0c1d2e3f4a5b",
            "date": "2026-02-14",
            "type": "income",
            "category": "sales",
            "amount": "1250.75"
        }"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(transaction.transaction_type, TransactionType::Income);
        assert_eq!(transaction.category, "sales");
        assert_eq!(transaction.amount, dec("1250.75"));
    }

    #[test]
    fn test_deserialize_recurring_expense_defaults_category() {
        let json = r#"{
            "id": "6f1c1f7e-8a51-4c1b-9f34-3f4a0d2b9a10",
            "business_id": "0b4f6a8e-1c2d-4e5f-8a9b-0c1d2e3f4a5b",
            "name": "Office rent",
            "amount": "9000",
            "frequency": "monthly",
            "created_at": "2025-06-15T10:30:00Z"
        }"#;

        let expense: RecurringExpense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.frequency, Frequency::Monthly);
        assert_eq!(expense.category, "recurring");
        assert_eq!(expense.created_on(), NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    }

    #[test]
    fn test_deserialize_rejects_unknown_frequency() {
        let json = r#"{
            "id": "6f1c1f7e-8a51-4c1b-9f34-3f4a0d2b9a10",
            "business_id": "0b4f6a8e-1c2d-4e5f-8a9b-0c1d2e3f4a5b",
            "name": "Cleaning",
            "amount": "100",
            "frequency": "fortnightly",
            "created_at": "2025-06-15T10:30:00Z"
        }"#;
        assert!(serde_json::from_str::<RecurringExpense>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_transaction() {
        let transaction = Transaction::new(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            TransactionType::Expense,
            "supplies",
            dec("-3.50"),
        );
        match transaction.validate() {
            Err(EngineError::InvalidAmount { source_kind, .. }) => {
                assert_eq!(source_kind, "transaction")
            }
            other => panic!("Expected InvalidAmount error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_zero_amount() {
        let expense = RecurringExpense::new(
            Uuid::new_v4(),
            "Free tier",
            Decimal::ZERO,
            Frequency::Yearly,
            Utc::now(),
        );
        assert!(expense.validate().is_ok());
    }
}
