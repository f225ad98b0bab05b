//! Configuration loading and management for the Payroll Engine.
//!
//! This module loads the engine configuration from YAML: the schedule anchor,
//! the weekly-to-monthly factor for recurring expenses and report settings.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap().into_config();
//! println!("Trend window: {} months", config.reporting.trend_window_months);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{EngineConfig, RecurringConfig, ReportingConfig, ScheduleConfig};
