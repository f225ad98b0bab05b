//! Work cycle and schedule anchor models.
//!
//! A [`WorkCycle`] describes a repeating pattern of work days followed by rest
//! days. A [`ScheduleAnchor`] fixes the calendar date on which every cycle is at
//! phase zero, so that all employees sharing a cycle length line up on the same
//! calendar week structure.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A repeating pattern of `work_days` work days followed by `rest_days` rest days.
///
/// Common patterns are 5/2, 2/2 and 6/1. A cycle must contain at least one day;
/// the 0/0 cycle is rejected at construction and on deserialization.
///
/// # Example
///
/// ```
/// use payroll_engine::models::WorkCycle;
///
/// let cycle = WorkCycle::new(5, 2).unwrap();
/// assert_eq!(cycle.len(), 7);
/// assert_eq!(cycle.to_string(), "5/2");
///
/// assert!(WorkCycle::new(0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWorkCycle")]
pub struct WorkCycle {
    work_days: u32,
    rest_days: u32,
}

#[derive(Deserialize)]
struct RawWorkCycle {
    work_days: u32,
    rest_days: u32,
}

impl TryFrom<RawWorkCycle> for WorkCycle {
    type Error = EngineError;

    fn try_from(raw: RawWorkCycle) -> Result<Self, Self::Error> {
        WorkCycle::new(raw.work_days, raw.rest_days)
    }
}

impl WorkCycle {
    /// Creates a work cycle.
    ///
    /// Rejects a cycle with no days at all and one whose total length does
    /// not fit in a `u32`.
    pub fn new(work_days: u32, rest_days: u32) -> EngineResult<Self> {
        if work_days.checked_add(rest_days).is_none_or(|len| len == 0) {
            return Err(EngineError::InvalidCycle {
                work_days,
                rest_days,
            });
        }
        Ok(Self {
            work_days,
            rest_days,
        })
    }

    /// The classic Monday-to-Friday week.
    pub fn five_two() -> Self {
        Self {
            work_days: 5,
            rest_days: 2,
        }
    }

    /// Number of consecutive work days at the start of each cycle.
    pub fn work_days(&self) -> u32 {
        self.work_days
    }

    /// Number of consecutive rest days closing each cycle.
    pub fn rest_days(&self) -> u32 {
        self.rest_days
    }

    /// Total cycle length in days. Always at least one.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u32 {
        self.work_days + self.rest_days
    }
}

impl fmt::Display for WorkCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.work_days, self.rest_days)
    }
}

/// The reference date at which every work cycle is at phase zero.
///
/// The anchor is a process-wide value, not per employee, and must be a Monday
/// so that 5/2 and 6/1 cycles start their work block at the start of the
/// calendar week.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ScheduleAnchor;
/// use chrono::NaiveDate;
///
/// let anchor = ScheduleAnchor::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
/// assert_eq!(anchor, ScheduleAnchor::default());
///
/// // 2024-01-02 is a Tuesday
/// assert!(ScheduleAnchor::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "NaiveDate", into = "NaiveDate")]
pub struct ScheduleAnchor(NaiveDate);

/// The default anchor, Monday 2024-01-01.
pub const DEFAULT_ANCHOR_DATE: (i32, u32, u32) = (2024, 1, 1);

impl ScheduleAnchor {
    /// Creates an anchor, rejecting any date that is not a Monday.
    pub fn new(date: NaiveDate) -> EngineResult<Self> {
        if date.weekday() != Weekday::Mon {
            return Err(EngineError::InvalidConfig {
                field: "schedule.anchor".to_string(),
                message: format!("{} is a {}, expected a Monday", date, date.weekday()),
            });
        }
        Ok(Self(date))
    }

    /// The anchor date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl Default for ScheduleAnchor {
    fn default() -> Self {
        let (year, month, day) = DEFAULT_ANCHOR_DATE;
        Self(NaiveDate::from_ymd_opt(year, month, day).expect("default anchor is a valid date"))
    }
}

impl TryFrom<NaiveDate> for ScheduleAnchor {
    type Error = EngineError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        ScheduleAnchor::new(date)
    }
}

impl From<ScheduleAnchor> for NaiveDate {
    fn from(anchor: ScheduleAnchor) -> Self {
        anchor.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_cycles_with_a_zero_side() {
        assert!(WorkCycle::new(0, 3).is_ok());
        assert!(WorkCycle::new(7, 0).is_ok());
    }

    #[test]
    fn test_new_rejects_empty_cycle() {
        match WorkCycle::new(0, 0) {
            Err(EngineError::InvalidCycle {
                work_days,
                rest_days,
            }) => {
                assert_eq!(work_days, 0);
                assert_eq!(rest_days, 0);
            }
            other => panic!("Expected InvalidCycle error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_cycle_longer_than_u32() {
        match WorkCycle::new(u32::MAX, 1) {
            Err(EngineError::InvalidCycle {
                work_days,
                rest_days,
            }) => {
                assert_eq!(work_days, u32::MAX);
                assert_eq!(rest_days, 1);
            }
            other => panic!("Expected InvalidCycle error, got {:?}", other),
        }
        assert_eq!(WorkCycle::new(u32::MAX, 0).unwrap().len(), u32::MAX);
    }

    #[test]
    fn test_deserialize_overflowing_cycle_fails() {
        let json = r#"{"work_days": 4294967295, "rest_days": 1}"#;
        assert!(serde_json::from_str::<WorkCycle>(json).is_err());
    }

    #[test]
    fn test_deserialize_cycle() {
        let cycle: WorkCycle = serde_json::from_str(r#"{"work_days": 2, "rest_days": 2}"#).unwrap();
        assert_eq!(cycle.work_days(), 2);
        assert_eq!(cycle.rest_days(), 2);
        assert_eq!(cycle.len(), 4);
    }

    #[test]
    fn test_deserialize_empty_cycle_fails() {
        let result = serde_json::from_str::<WorkCycle>(r#"{"work_days": 0, "rest_days": 0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_five_two_matches_new() {
        assert_eq!(WorkCycle::five_two(), WorkCycle::new(5, 2).unwrap());
    }

    #[test]
    fn test_default_anchor_is_a_monday() {
        assert_eq!(ScheduleAnchor::default().date().weekday(), Weekday::Mon);
    }

    #[test]
    fn test_anchor_rejects_sunday() {
        let sunday = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
        match ScheduleAnchor::new(sunday) {
            Err(EngineError::InvalidConfig { field, message }) => {
                assert_eq!(field, "schedule.anchor");
                assert!(message.contains("Sun"));
            }
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_anchor_serializes_as_plain_date() {
        let anchor = ScheduleAnchor::default();
        assert_eq!(serde_json::to_string(&anchor).unwrap(), "\"2024-01-01\"");

        let parsed: ScheduleAnchor = serde_json::from_str("\"2026-01-12\"").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());

        assert!(serde_json::from_str::<ScheduleAnchor>("\"2026-01-13\"").is_err());
    }
}
