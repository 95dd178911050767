//! Configuration types for holiday tables.
//!
//! This module contains the strongly-typed structures that are deserialized
//! from the per-country YAML holiday files.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// How a holiday's date is determined each year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HolidayRule {
    /// The same month and day every year (e.g., 25 December).
    Fixed {
        /// Month number, 1-12.
        month: u32,
        /// Day of month.
        day: u32,
    },
    /// The n-th given weekday of a month; `n = -1` means the last one.
    NthWeekday {
        /// Month number, 1-12.
        month: u32,
        /// The weekday to count.
        weekday: Weekday,
        /// Occurrence index, 1-based from the start or negative from the end.
        n: i32,
    },
    /// The last given weekday falling on or before a fixed date.
    WeekdayOnOrBefore {
        /// Month number, 1-12.
        month: u32,
        /// Day of month of the anchor date.
        day: u32,
        /// The weekday to find.
        weekday: Weekday,
    },
    /// Western (Gregorian) Easter Sunday.
    Easter,
}

/// How a holiday falling on a weekend is observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Observance {
    /// No substitute day.
    #[default]
    None,
    /// Saturday is observed on the Friday before, Sunday on the Monday after.
    NearestWeekday,
    /// Observed on the next weekday that is not already a holiday.
    NextWeekday,
}

/// A single holiday definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayDefinition {
    /// The holiday name (e.g., "Independence Day").
    pub name: String,
    /// The rule that places the holiday in a year.
    pub rule: HolidayRule,
    /// Substitute-day behaviour when the holiday falls on a weekend.
    #[serde(default)]
    pub observance: Observance,
    /// Days added to the rule's date (e.g., -2 from Easter for Good Friday).
    #[serde(default)]
    pub offset_days: i64,
    /// First year the holiday applies, inclusive.
    #[serde(default)]
    pub since: Option<i32>,
    /// Last year the holiday applies, inclusive.
    #[serde(default)]
    pub until: Option<i32>,
}

impl HolidayDefinition {
    /// Returns `true` if the holiday is in force during `year`.
    pub fn applies_in(&self, year: i32) -> bool {
        self.since.is_none_or(|since| year >= since) && self.until.is_none_or(|until| year <= until)
    }
}

/// A state, province or constituent country within a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdivision {
    /// Human-readable name of the subdivision.
    pub name: String,
    /// Holidays observed in addition to the country-wide ones.
    #[serde(default)]
    pub holidays: Vec<HolidayDefinition>,
}

/// A country's holiday table, as loaded from one YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryHolidays {
    /// Country code (e.g., "US").
    pub code: String,
    /// Human-readable country name.
    pub name: String,
    /// Suffix used to name substitute days (e.g., "observed").
    #[serde(default = "default_observed_label")]
    pub observed_label: String,
    /// Holidays observed country-wide.
    #[serde(default)]
    pub holidays: Vec<HolidayDefinition>,
    /// Subdivision tables keyed by subdivision code.
    #[serde(default)]
    pub subdivisions: BTreeMap<String, Subdivision>,
}

fn default_observed_label() -> String {
    "observed".to_string()
}

impl CountryHolidays {
    /// Looks up a subdivision by code, ignoring case.
    pub fn subdivision(&self, code: &str) -> Option<(&str, &Subdivision)> {
        self.subdivisions
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(code))
            .map(|(key, sub)| (key.as_str(), sub))
    }
}
