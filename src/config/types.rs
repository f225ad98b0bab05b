//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::WEEKS_PER_MONTH;
use crate::error::{EngineError, EngineResult};
use crate::models::ScheduleAnchor;

/// Schedule settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleConfig {
    /// The Monday on which every work cycle is at phase zero.
    #[serde(default)]
    pub anchor: ScheduleAnchor,
}

/// Recurring expense settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RecurringConfig {
    /// Factor converting a weekly amount to its monthly equivalent.
    #[serde(default = "default_weeks_per_month")]
    pub weeks_per_month: Decimal,
}

impl Default for RecurringConfig {
    fn default() -> Self {
        Self {
            weeks_per_month: default_weeks_per_month(),
        }
    }
}

fn default_weeks_per_month() -> Decimal {
    WEEKS_PER_MONTH
}

/// Report settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// How many trailing months are compared against the months before them.
    #[serde(default = "default_trend_window_months")]
    pub trend_window_months: u32,
    /// Decimal places kept when a report is rounded for presentation with
    /// [`AggregateReport::rounded_for`](crate::models::AggregateReport::rounded_for).
    #[serde(default)]
    pub currency_scale: u32,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            trend_window_months: default_trend_window_months(),
            currency_scale: 0,
        }
    }
}

fn default_trend_window_months() -> u32 {
    3
}

/// The complete engine configuration.
///
/// Every section is optional in the YAML file and falls back to its default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Schedule settings.
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Recurring expense settings.
    #[serde(default)]
    pub recurring: RecurringConfig,
    /// Report settings.
    #[serde(default)]
    pub reporting: ReportingConfig,
}

impl EngineConfig {
    /// Returns the schedule anchor.
    pub fn anchor(&self) -> ScheduleAnchor {
        self.schedule.anchor
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> EngineResult<()> {
        if self.recurring.weeks_per_month <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "recurring.weeks_per_month".to_string(),
                message: format!("{} must be positive", self.recurring.weeks_per_month),
            });
        }
        if self.reporting.trend_window_months == 0 {
            return Err(EngineError::InvalidConfig {
                field: "reporting.trend_window_months".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.reporting.currency_scale > 10 {
            return Err(EngineError::InvalidConfig {
                field: "reporting.currency_scale".to_string(),
                message: format!("{} exceeds 10 decimal places", self.reporting.currency_scale),
            });
        }
        Ok(())
    }
}
