//! Pay frequency model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// How often an employee is paid.
///
/// The frequency determines both the length of a pay period and the rule used
/// to roll the cursor forward to the next period.
///
/// # Example
///
/// ```
/// use payroll_calendar::models::PayFrequency;
///
/// let freq: PayFrequency = "Bi-weekly".parse().unwrap();
/// assert_eq!(freq, PayFrequency::BiWeekly);
/// assert_eq!(freq.to_string(), "Bi-weekly");
/// assert!("Quarterly".parse::<PayFrequency>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayFrequency {
    /// Seven-day periods starting on the cursor.
    Weekly,
    /// Fourteen-day periods starting on the cursor.
    BiWeekly,
    /// Two periods per month: the 1st to the 15th, and the 16th to month end.
    SemiMonthly,
    /// One period per calendar month.
    Monthly,
}

impl PayFrequency {
    /// All supported frequencies, in the order they are offered to users.
    pub const ALL: [PayFrequency; 4] = [
        PayFrequency::Weekly,
        PayFrequency::BiWeekly,
        PayFrequency::SemiMonthly,
        PayFrequency::Monthly,
    ];

    /// Returns the display label for this frequency.
    pub fn label(&self) -> &'static str {
        match self {
            PayFrequency::Weekly => "Weekly",
            PayFrequency::BiWeekly => "Bi-weekly",
            PayFrequency::SemiMonthly => "Semi-monthly",
            PayFrequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for PayFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PayFrequency {
    type Err = EngineError;

    /// Parses a frequency label.
    ///
    /// Matching ignores case, and treats `-`, `_` and spaces as the same
    /// separator, so `Bi-weekly`, `bi_weekly` and `biweekly` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "weekly" => Ok(PayFrequency::Weekly),
            "biweekly" => Ok(PayFrequency::BiWeekly),
            "semimonthly" => Ok(PayFrequency::SemiMonthly),
            "monthly" => Ok(PayFrequency::Monthly),
            _ => Err(EngineError::InvalidFrequency {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for PayFrequency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PayFrequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PayFrequency::from_str(&s).map_err(serde::de::Error::custom)
    }
}
