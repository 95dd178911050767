//! Day detection logic.
//!
//! This module provides utilities for classifying a calendar date as a
//! weekday, Saturday, or Sunday, and for naming the day of the week.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Represents the type of day for payday conflict checks.
///
/// # Example
///
/// ```
/// use payroll_calendar::calculation::DayType;
///
/// let day_type = DayType::Saturday;
/// assert_eq!(format!("{:?}", day_type), "Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayType {
    /// Returns `true` for Saturday and Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, DayType::Saturday | DayType::Sunday)
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
        }
    }
}

/// Determines the day type for a given date.
///
/// # Example
///
/// ```
/// use payroll_calendar::calculation::{get_day_type, DayType};
/// use chrono::NaiveDate;
///
/// // 2024-01-20 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
/// assert_eq!(get_day_type(saturday), DayType::Saturday);
///
/// // 2024-01-17 is a Wednesday
/// let wednesday = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
/// assert_eq!(get_day_type(wednesday), DayType::Weekday);
/// ```
pub fn get_day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// Returns `true` if `date` falls on a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    get_day_type(date).is_weekend()
}

/// Returns the full English weekday name for `date` (e.g., "Monday").
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Number of days to step back from `date` to reach the preceding Friday.
///
/// Only meaningful for weekend dates: Saturday yields 1, Sunday yields 2.
/// Weekdays yield 0.
pub fn days_back_to_friday(date: NaiveDate) -> u64 {
    let from_monday = u64::from(date.weekday().num_days_from_monday());
    from_monday.saturating_sub(4)
}
