//! Employee model.
//!
//! This module defines the [`Employee`] struct: an identifier, a daily rate
//! and the work cycle that determines which days are scheduled.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WorkCycle;
use crate::error::{EngineError, EngineResult};

/// Represents an employee whose salary accrues per paid day.
///
/// Invariants are checked when the employee is constructed or deserialized:
/// the id is non-empty and the daily rate is not negative. The cycle carries
/// its own validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EmployeeRecord")]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Amount earned for each salary-bearing day.
    pub daily_rate: Decimal,
    /// The repeating work/rest pattern.
    pub cycle: WorkCycle,
}

#[derive(Deserialize)]
struct EmployeeRecord {
    id: String,
    daily_rate: Decimal,
    cycle: WorkCycle,
}

impl TryFrom<EmployeeRecord> for Employee {
    type Error = EngineError;

    fn try_from(record: EmployeeRecord) -> Result<Self, Self::Error> {
        Employee::new(record.id, record.daily_rate, record.cycle)
    }
}

impl Employee {
    /// Creates an employee, validating id and daily rate.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, WorkCycle};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new("emp_001", Decimal::new(2000, 0), WorkCycle::five_two()).unwrap();
    /// assert_eq!(employee.cycle.len(), 7);
    ///
    /// assert!(Employee::new("emp_002", Decimal::new(-1, 0), WorkCycle::five_two()).is_err());
    /// ```
    pub fn new(id: impl Into<String>, daily_rate: Decimal, cycle: WorkCycle) -> EngineResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if daily_rate < Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "daily_rate".to_string(),
                message: format!("{} is negative", daily_rate),
            });
        }
        Ok(Self {
            id,
            daily_rate,
            cycle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": "emp_001",
            "daily_rate": "2000.00",
            "cycle": {"work_days": 5, "rest_days": 2}
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.daily_rate, dec("2000.00"));
        assert_eq!(employee.cycle, WorkCycle::five_two());
    }

    #[test]
    fn test_deserialize_rejects_negative_rate() {
        let json = r#"{
            "id": "emp_001",
            "daily_rate": "-10",
            "cycle": {"work_days": 5, "rest_days": 2}
        }"#;
        assert!(serde_json::from_str::<Employee>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_empty_cycle() {
        let json = r#"{
            "id": "emp_001",
            "daily_rate": "100",
            "cycle": {"work_days": 0, "rest_days": 0}
        }"#;
        assert!(serde_json::from_str::<Employee>(json).is_err());
    }

    #[test]
    fn test_new_rejects_blank_id() {
        match Employee::new("  ", dec("100"), WorkCycle::five_two()) {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "id"),
            other => panic!("Expected InvalidEmployee error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_accepts_zero_rate() {
        let employee = Employee::new("volunteer", Decimal::ZERO, WorkCycle::five_two()).unwrap();
        assert_eq!(employee.daily_rate, Decimal::ZERO);
    }

    #[test]
    fn test_serialize_employee() {
        let employee = Employee::new("emp_001", dec("1500.50"), WorkCycle::new(2, 2).unwrap()).unwrap();
        let json = serde_json::to_string(&employee).unwrap();

        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }
}
