//! Calendar run settings.
//!
//! [`CalendarSettings`] is the configuration surface handed to the engine by
//! the HTTP API and the command line. Settings are validated here, before any
//! period is generated.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::PayFrequency;

/// Permitted number of pay periods per run.
pub const PERIOD_COUNT_RANGE: RangeInclusive<u32> = 6..=52;

/// Permitted payday offset, in days after the period end.
pub const PAYDAY_OFFSET_RANGE: RangeInclusive<u32> = 0..=10;

/// Number of periods generated when none is given.
pub const DEFAULT_PERIOD_COUNT: u32 = 26;

/// Payday offset used when none is given.
pub const DEFAULT_PAYDAY_OFFSET_DAYS: u32 = 3;

/// Country used when none is given.
pub const DEFAULT_COUNTRY: &str = "US";

/// Subdivision used when none is given.
pub const DEFAULT_SUBDIVISION: &str = "CA";

/// Settings for one payroll calendar run.
///
/// # Example
///
/// ```
/// use payroll_calendar::config::CalendarSettings;
/// use payroll_calendar::models::PayFrequency;
///
/// let start = CalendarSettings::parse_start_date("2024-01-01").unwrap();
/// let settings = CalendarSettings::new(start, PayFrequency::BiWeekly);
///
/// assert_eq!(settings.period_count, 26);
/// assert_eq!(settings.payday_offset_days, 3);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// The date the first period's cursor starts on.
    pub start_date: NaiveDate,
    /// The pay frequency.
    pub frequency: PayFrequency,
    /// How many periods to generate.
    #[serde(default = "default_period_count")]
    pub period_count: u32,
    /// Days between a period's end and its nominal payday.
    #[serde(default = "default_payday_offset_days")]
    pub payday_offset_days: u32,
    /// Country whose holidays apply.
    #[serde(default = "default_country")]
    pub country: String,
    /// Optional state or province within the country.
    #[serde(default)]
    pub subdivision: Option<String>,
}

fn default_period_count() -> u32 {
    DEFAULT_PERIOD_COUNT
}

fn default_payday_offset_days() -> u32 {
    DEFAULT_PAYDAY_OFFSET_DAYS
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl CalendarSettings {
    /// Creates settings with the default count, offset, country and subdivision.
    pub fn new(start_date: NaiveDate, frequency: PayFrequency) -> Self {
        Self {
            start_date,
            frequency,
            period_count: DEFAULT_PERIOD_COUNT,
            payday_offset_days: DEFAULT_PAYDAY_OFFSET_DAYS,
            country: DEFAULT_COUNTRY.to_string(),
            subdivision: Some(DEFAULT_SUBDIVISION.to_string()),
        }
    }

    /// Parses a `YYYY-MM-DD` start date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDateFormat`] for anything else.
    pub fn parse_start_date(input: &str) -> EngineResult<NaiveDate> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
            EngineError::InvalidDateFormat {
                input: input.to_string(),
            }
        })
    }

    /// Returns the subdivision, treating a blank value as absent.
    pub fn subdivision(&self) -> Option<&str> {
        self.subdivision
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Checks every setting against its permitted range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSetting`] naming the first offending field.
    pub fn validate(&self) -> EngineResult<()> {
        if !PERIOD_COUNT_RANGE.contains(&self.period_count) {
            return Err(EngineError::InvalidSetting {
                field: "period_count".to_string(),
                message: format!(
                    "must be between {} and {}, got {}",
                    PERIOD_COUNT_RANGE.start(),
                    PERIOD_COUNT_RANGE.end(),
                    self.period_count
                ),
            });
        }

        if !PAYDAY_OFFSET_RANGE.contains(&self.payday_offset_days) {
            return Err(EngineError::InvalidSetting {
                field: "payday_offset_days".to_string(),
                message: format!(
                    "must be between {} and {}, got {}",
                    PAYDAY_OFFSET_RANGE.start(),
                    PAYDAY_OFFSET_RANGE.end(),
                    self.payday_offset_days
                ),
            });
        }

        if self.country.trim().is_empty() {
            return Err(EngineError::InvalidSetting {
                field: "country".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
